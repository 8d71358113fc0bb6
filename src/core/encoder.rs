use crate::{
    constants::{
        ALT_SEPARATOR, DIPLOID, FIELD_SEPARATOR, HETEROZYGOUS_TOKEN, MISSING_FIELD,
        MISSING_GENOTYPE_TOKEN,
    },
    core::record::{AlleleCall, VariantRecord},
    error::Vcf2TableError,
    utils::util::Result,
};

/// Encodes variant records into table rows.
///
/// The line buffer is reused between records and cleared on entry of every
/// [`RecordEncoder::encode`] call, so a skipped or rejected record never leaves
/// fields behind for the next one.
pub struct RecordEncoder {
    sample_n: usize,
    line: String,
}

impl RecordEncoder {
    pub fn new(sample_n: usize) -> Self {
        RecordEncoder {
            sample_n,
            line: String::new(),
        }
    }

    /// Returns the encoded row, or `None` when the record has no genotype data.
    ///
    /// Records whose genotype array is not exactly diploid are rejected with
    /// [`Vcf2TableError::PloidyMismatch`], unless no sample carries a called
    /// allele: htslib stores an all-`.` GT column with ploidy 1, and such a
    /// record encodes as `N` for every sample.
    pub fn encode(&mut self, record: &VariantRecord) -> Result<Option<&str>> {
        self.line.clear();

        let genotypes = match record.genotypes.as_ref() {
            Some(genotypes) if !genotypes.is_empty() && self.sample_n > 0 => genotypes,
            _ => return Ok(None),
        };
        let uncalled = genotypes.is_uncalled();
        if !uncalled && genotypes.ploidy(self.sample_n) != Some(DIPLOID) {
            return Err(Vcf2TableError::PloidyMismatch {
                chrom: record.chrom.clone(),
                pos: record.pos,
                ploidy: genotypes.len() / self.sample_n,
            });
        }

        self.line.push_str(&record.chrom);
        self.push_field(&record.pos.to_string());
        self.push_field(&record.id);
        self.push_field(record.reference());
        self.push_field(&alt_field(record.alts()));
        self.push_field(&qual_field(record.qual));
        for sample_idx in 0..self.sample_n {
            let token = if uncalled {
                MISSING_GENOTYPE_TOKEN
            } else {
                genotype_token(record, genotypes.sample(sample_idx, DIPLOID))
            };
            self.push_field(token);
        }
        self.line.push('\n');

        Ok(Some(&self.line))
    }

    fn push_field(&mut self, value: &str) {
        self.line.push_str(FIELD_SEPARATOR);
        self.line.push_str(value);
    }
}

pub fn alt_field(alts: &[String]) -> String {
    if alts.is_empty() {
        return MISSING_FIELD.to_string();
    }
    alts.join(ALT_SEPARATOR)
}

pub fn qual_field(qual: Option<f32>) -> String {
    match qual {
        Some(qual) => format!("{qual:.1}"),
        None => MISSING_FIELD.to_string(),
    }
}

/// Collapses one diploid call: `N` if any slot is uncalled, the allele itself
/// when homozygous, `H` otherwise.
pub fn genotype_token<'a>(record: &'a VariantRecord, call: &[AlleleCall]) -> &'a str {
    let (Some(a1), Some(a2)) = (call[0].index(), call[1].index()) else {
        return MISSING_GENOTYPE_TOKEN;
    };
    if a1 != a2 {
        return HETEROZYGOUS_TOKEN;
    }
    match record.allele(a1) {
        Some(allele) => allele,
        None => {
            log::debug!(
                "Allele index {} out of range at {}:{}",
                a1,
                record.chrom,
                record.pos
            );
            MISSING_GENOTYPE_TOKEN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        record::Genotypes,
        test_utils::{diploid, make_record},
    };

    #[test]
    fn test_encode_homozygous_ref_and_heterozygous() {
        let record = make_record("A", &["G"], Some(30.0), Some(diploid(&[(0, 0), (0, 1)])));
        let mut encoder = RecordEncoder::new(2);
        let line = encoder.encode(&record).unwrap();
        assert_eq!(line, Some("chr1\t100\trs1\tA\tG\t30.0\tA\tH\n"));
    }

    #[test]
    fn test_homozygous_alt_emits_alt_allele_string() {
        let record = make_record("A", &["G", "TT"], None, Some(diploid(&[(2, 2), (1, 1)])));
        let mut encoder = RecordEncoder::new(2);
        let line = encoder.encode(&record).unwrap().unwrap();
        assert!(line.ends_with("\tTT\tG\n"));
    }

    #[test]
    fn test_heterozygous_ignores_allele_identity() {
        let record = make_record("A", &["G", "T"], None, None);
        for (a1, a2) in [(0, 1), (1, 0), (1, 2), (0, 2), (2, 1)] {
            let call = [AlleleCall::Index(a1), AlleleCall::Index(a2)];
            assert_eq!(genotype_token(&record, &call), "H");
        }
    }

    #[test]
    fn test_any_uncalled_slot_emits_n() {
        let record = make_record("A", &["G"], None, None);
        let calls = [
            [AlleleCall::Missing, AlleleCall::Index(1)],
            [AlleleCall::Index(0), AlleleCall::Missing],
            [AlleleCall::Missing, AlleleCall::Missing],
            [AlleleCall::Index(1), AlleleCall::End],
        ];
        for call in calls {
            assert_eq!(genotype_token(&record, &call), "N");
        }
    }

    #[test]
    fn test_out_of_range_homozygous_index_emits_n() {
        let record = make_record("A", &["G"], None, None);
        let call = [AlleleCall::Index(5), AlleleCall::Index(5)];
        assert_eq!(genotype_token(&record, &call), "N");
    }

    #[test]
    fn test_qual_field_formats_one_decimal() {
        assert_eq!(qual_field(None), ".");
        assert_eq!(qual_field(Some(30.0)), "30.0");
        assert_eq!(qual_field(Some(30.26)), "30.3");
        assert_eq!(qual_field(Some(0.04)), "0.0");
    }

    #[test]
    fn test_alt_field_joins_multiallelic() {
        let alts = ["A", "G", "T"].map(String::from);
        assert_eq!(alt_field(&alts), "A,G,T");
        assert_eq!(alt_field(&alts[..1]), "A");
        assert_eq!(alt_field(&[]), ".");
    }

    #[test]
    fn test_record_without_genotypes_is_skipped() {
        let mut encoder = RecordEncoder::new(2);
        let absent = make_record("A", &["G"], Some(10.0), None);
        assert_eq!(encoder.encode(&absent).unwrap(), None);
        let empty = make_record("A", &["G"], Some(10.0), Some(Genotypes::default()));
        assert_eq!(encoder.encode(&empty).unwrap(), None);
    }

    #[test]
    fn test_skipped_record_does_not_leak_into_next_row() {
        let mut encoder = RecordEncoder::new(1);
        let first = make_record("A", &["G"], Some(50.0), Some(diploid(&[(1, 1)])));
        assert_eq!(
            encoder.encode(&first).unwrap(),
            Some("chr1\t100\trs1\tA\tG\t50.0\tG\n")
        );

        let skipped = make_record("C", &["T", "TA"], Some(99.0), None);
        assert_eq!(encoder.encode(&skipped).unwrap(), None);

        let rejected = make_record("C", &["T"], Some(1.0), Some(diploid(&[(0, 0), (0, 0)])));
        assert!(encoder.encode(&rejected).is_err());

        let last = make_record("G", &["A"], None, Some(diploid(&[(0, 1)])));
        assert_eq!(
            encoder.encode(&last).unwrap(),
            Some("chr1\t100\trs1\tG\tA\t.\tH\n")
        );
    }

    #[test]
    fn test_uncalled_haploid_column_emits_n_for_every_sample() {
        let uncalled = Genotypes::new(vec![AlleleCall::Missing, AlleleCall::Missing]);
        let record = make_record("A", &["G"], Some(30.0), Some(uncalled));
        let mut encoder = RecordEncoder::new(2);
        assert_eq!(
            encoder.encode(&record).unwrap(),
            Some("chr1\t100\trs1\tA\tG\t30.0\tN\tN\n")
        );
    }

    #[test]
    fn test_non_diploid_record_is_rejected() {
        let haploid = Genotypes::new(vec![AlleleCall::Index(0), AlleleCall::Index(1)]);
        let record = make_record("A", &["G"], None, Some(haploid));
        let mut encoder = RecordEncoder::new(2);
        let err = encoder.encode(&record).unwrap_err();
        assert!(matches!(
            err,
            Vcf2TableError::PloidyMismatch { ploidy: 1, pos: 100, .. }
        ));

        let triploid = Genotypes::new(vec![AlleleCall::Index(0); 6]);
        let record = make_record("A", &["G"], None, Some(triploid));
        let err = encoder.encode(&record).unwrap_err();
        assert!(matches!(err, Vcf2TableError::PloidyMismatch { ploidy: 3, .. }));
    }
}
