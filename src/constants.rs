use std::fmt;

/// What to do with a record whose genotypes are not diploid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PloidyPolicy {
    /// Warn, count the record and continue
    Skip,
    /// Fail the whole run
    Abort,
}

impl PloidyPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PloidyPolicy::Skip => "skip",
            PloidyPolicy::Abort => "abort",
        }
    }
}

impl fmt::Display for PloidyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const DEFAULT_COMPRESS: bool = false;
pub const DEFAULT_PLOIDY_POLICY: PloidyPolicy = PloidyPolicy::Skip;

// Input/output path meaning standard input or output
pub const STDIO_PATH: &str = "-";

pub const DIPLOID: usize = 2;

pub const FIXED_COLUMNS: [&str; 6] = ["#CHROM", "POS", "ID", "REF", "ALT", "QUAL"];

pub const FIELD_SEPARATOR: &str = "\t";
pub const ALT_SEPARATOR: &str = ",";

pub const MISSING_FIELD: &str = ".";
pub const MISSING_GENOTYPE_TOKEN: &str = "N";
pub const HETEROZYGOUS_TOKEN: &str = "H";
