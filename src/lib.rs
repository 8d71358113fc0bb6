pub mod cli;
pub mod error;

pub mod commands {
    pub mod convert;

    pub use convert::convert;
}

pub mod core {
    pub mod encoder;
    pub mod header;
    pub mod record;

    #[cfg(test)]
    pub mod test_utils;
}

pub mod io {
    pub mod table_writer;
    pub mod vcf_reader;
}

pub mod utils {
    pub mod util;
}

pub mod constants;

pub use constants::*;
