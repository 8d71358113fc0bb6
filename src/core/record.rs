use crate::utils::util::{MISSING_INTEGER, VECTOR_END_INTEGER};

/// One slot of a genotype call.
///
/// `End` marks vector-end padding: a sample carrying fewer alleles than the
/// record's maximum ploidy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlleleCall {
    Index(u32),
    Missing,
    End,
}

impl AlleleCall {
    /// Decodes one BCF GT value, `(allele + 1) << 1 | phased`, dropping phase.
    pub fn from_encoded(value: i32) -> Self {
        match value {
            VECTOR_END_INTEGER => AlleleCall::End,
            MISSING_INTEGER => AlleleCall::Missing,
            v if (v >> 1) <= 0 => AlleleCall::Missing,
            v => AlleleCall::Index(((v >> 1) - 1) as u32),
        }
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            AlleleCall::Index(i) => Some(*i as usize),
            AlleleCall::Missing | AlleleCall::End => None,
        }
    }
}

/// Flat per-sample genotype array, `ploidy` consecutive slots per sample.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Genotypes {
    calls: Vec<AlleleCall>,
}

impl Genotypes {
    pub fn new(calls: Vec<AlleleCall>) -> Self {
        Genotypes { calls }
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Number of slots per sample, `None` when the array does not split evenly.
    pub fn ploidy(&self, sample_n: usize) -> Option<usize> {
        if sample_n == 0 || self.calls.len() % sample_n != 0 {
            return None;
        }
        Some(self.calls.len() / sample_n)
    }

    /// True when no slot carries an allele index, e.g. every sample is `.`.
    pub fn is_uncalled(&self) -> bool {
        self.calls.iter().all(|call| call.index().is_none())
    }

    pub fn sample(&self, sample_idx: usize, ploidy: usize) -> &[AlleleCall] {
        let start = sample_idx * ploidy;
        &self.calls[start..start + ploidy]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    pub chrom: String,
    /// 1-based
    pub pos: i64,
    pub id: String,
    /// Reference allele at index 0, alternates after it in declared order.
    pub alleles: Vec<String>,
    pub qual: Option<f32>,
    pub genotypes: Option<Genotypes>,
}

impl VariantRecord {
    pub fn reference(&self) -> &str {
        self.alleles.first().map(String::as_str).unwrap_or_default()
    }

    pub fn alts(&self) -> &[String] {
        self.alleles.get(1..).unwrap_or_default()
    }

    pub fn allele(&self, index: usize) -> Option<&str> {
        self.alleles.get(index).map(String::as_str)
    }
}
