use crate::{
    constants::STDIO_PATH,
    core::{
        header::VariantHeader,
        record::{AlleleCall, Genotypes, VariantRecord},
    },
    utils::util::Result,
};
use rust_htslib::{
    bcf::{self, record::Numeric, Read},
    bgzf,
    errors::Error as HtslibError,
};
use std::{io::Read as ReadIo, path::Path, str};

/// A stream of variant records sharing one fixed header.
pub trait VariantSource {
    fn header(&self) -> &VariantHeader;

    /// Next record, `None` once the source is exhausted.
    fn next_record(&mut self) -> Result<Option<VariantRecord>>;
}

fn looks_like_bcf(p: &[u8]) -> bool {
    p.len() >= 5 && &p[..3] == b"BCF" && p[3] == 0x02
}

fn looks_like_vcf(p: &[u8]) -> bool {
    let mut p = p;
    // Strip the UTF-8 BOM if present
    if p.starts_with(&[0xEF, 0xBB, 0xBF]) {
        p = &p[3..];
    }
    p.starts_with(b"##fileformat=VCF")
}

/// Named pipes, process substitutions and devices cannot be read twice, so
/// only regular files get the signature check.
fn is_regular_file(path: &Path) -> bool {
    std::fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// GT undefined in the header or absent from the record means no genotypes.
fn genotypes_absent(err: &HtslibError) -> bool {
    matches!(
        err,
        HtslibError::BcfUndefinedTag { .. } | HtslibError::BcfMissingTag { .. }
    )
}

/// Checks the (decompressed) start of a file for a VCF or BCF signature
/// before handing it to htslib.
pub fn validate_variant_file(file: &Path) -> Result<()> {
    let mut r = bgzf::Reader::from_path(file)
        .map_err(|e| crate::vcf2table_error!("Failed to open {}: {e}", file.display()))?;
    let mut buf = vec![0u8; 512];
    let n = r
        .read(&mut buf)
        .map_err(|e| crate::vcf2table_error!("Failed to read {}: {e}", file.display()))?;
    buf.truncate(n);

    if buf.is_empty() {
        return Err(crate::vcf2table_error!("File {} is empty", file.display()));
    }
    if looks_like_vcf(&buf) || looks_like_bcf(&buf) {
        Ok(())
    } else {
        Err(crate::vcf2table_error!(
            "File {} does not look like VCF or BCF",
            file.display()
        ))
    }
}

pub struct VcfReader {
    reader: bcf::Reader,
    current_record: bcf::Record,
    header: VariantHeader,
}

impl VcfReader {
    /// Opens a VCF, VCF.gz or BCF file, or standard input for `-`.
    pub fn from_path(input: &str) -> Result<Self> {
        log::trace!("Start loading VCF {}", input);
        let reader = if input == STDIO_PATH {
            bcf::Reader::from_stdin()
        } else {
            let path = Path::new(input);
            if is_regular_file(path) {
                validate_variant_file(path)?;
            }
            bcf::Reader::from_path(input)
        }
        .map_err(|e| crate::vcf2table_error!("Failed to open VCF file {}: {}", input, e))?;

        let samples = reader
            .header()
            .samples()
            .into_iter()
            .map(|sample| str::from_utf8(sample).map(str::to_string))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| crate::vcf2table_error!("Invalid sample name in {}: {}", input, e))?;
        log::debug!("{} samples n = {}", input, samples.len());

        let current_record = reader.empty_record();
        Ok(VcfReader {
            reader,
            current_record,
            header: VariantHeader::new(samples),
        })
    }

    pub fn advance(&mut self) -> Result<bool> {
        match self.reader.read(&mut self.current_record) {
            Some(Ok(())) => Ok(true),
            Some(Err(e)) => Err(crate::vcf2table_error!("Error reading record from VCF: {e}")),
            None => Ok(false),
        }
    }

    fn to_variant_record(&self) -> Result<VariantRecord> {
        let record = &self.current_record;
        let rid = record.rid().ok_or_else(|| {
            crate::vcf2table_error!("Record at position {} has no contig", record.pos() + 1)
        })?;
        let chrom = str::from_utf8(self.reader.header().rid2name(rid)?)?.to_string();
        let pos = record.pos() + 1;
        let id = String::from_utf8_lossy(&record.id()).into_owned();
        let alleles = record
            .alleles()
            .into_iter()
            .map(|allele| str::from_utf8(allele).map(str::to_string))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let qual = record.qual();
        let qual = if qual.is_missing() { None } else { Some(qual) };

        Ok(VariantRecord {
            chrom,
            pos,
            id,
            alleles,
            qual,
            genotypes: self.read_genotypes()?,
        })
    }

    fn read_genotypes(&self) -> Result<Option<Genotypes>> {
        match self.current_record.format(b"GT").integer() {
            Ok(values) => Ok(Some(Genotypes::new(
                values
                    .iter()
                    .flat_map(|sample| sample.iter().map(|&v| AlleleCall::from_encoded(v)))
                    .collect(),
            ))),
            Err(e) if genotypes_absent(&e) => {
                log::trace!(
                    "No genotypes at record {}: {e}",
                    self.current_record.pos() + 1
                );
                Ok(None)
            }
            Err(e) => Err(crate::vcf2table_error!(
                "Error reading genotypes at record {}: {e}",
                self.current_record.pos() + 1
            )),
        }
    }
}

impl VariantSource for VcfReader {
    fn header(&self) -> &VariantHeader {
        &self.header
    }

    fn next_record(&mut self) -> Result<Option<VariantRecord>> {
        if !self.advance()? {
            return Ok(None);
        }
        self.to_variant_record().map(Some)
    }
}
