use super::record::{AlleleCall, Genotypes, VariantRecord};
use std::{fs, path::PathBuf};

pub fn diploid(calls: &[(u32, u32)]) -> Genotypes {
    Genotypes::new(
        calls
            .iter()
            .flat_map(|&(a1, a2)| [AlleleCall::Index(a1), AlleleCall::Index(a2)])
            .collect(),
    )
}

pub fn make_record(
    reference: &str,
    alts: &[&str],
    qual: Option<f32>,
    genotypes: Option<Genotypes>,
) -> VariantRecord {
    let alleles = std::iter::once(reference)
        .chain(alts.iter().copied())
        .map(String::from)
        .collect();
    VariantRecord {
        chrom: "chr1".to_string(),
        pos: 100,
        id: "rs1".to_string(),
        alleles,
        qual,
        genotypes,
    }
}

pub fn make_temp_path(stem: &str, ext: &str) -> PathBuf {
    let prefix = format!("vcf2table_test_{stem}_");
    let suffix = format!(".{ext}");
    let (_, path) = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(&suffix)
        .tempfile_in(std::env::temp_dir())
        .expect("temp file should be creatable")
        .keep()
        .expect("temp file should be persistable");
    path
}

pub fn make_temp_vcf(contents: &str) -> PathBuf {
    let path = make_temp_path("input", "vcf");
    fs::write(&path, contents).expect("test VCF should be writable");
    path
}
