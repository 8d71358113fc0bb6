use std::str::Utf8Error;
use thiserror::Error;

pub type Vcf2TableResult<T> = std::result::Result<T, Vcf2TableError>;

#[derive(Debug, Error)]
pub enum Vcf2TableError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Htslib(#[from] rust_htslib::errors::Error),
    #[error(transparent)]
    Utf8(#[from] Utf8Error),
    #[error("Unsupported ploidy {ploidy} at {chrom}:{pos}, only diploid genotypes are supported")]
    PloidyMismatch {
        chrom: String,
        pos: i64,
        ploidy: usize,
    },
}

impl Vcf2TableError {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

#[macro_export]
macro_rules! vcf2table_error {
    ($($arg:tt)*) => {
        $crate::error::Vcf2TableError::message(format!($($arg)*))
    };
}
