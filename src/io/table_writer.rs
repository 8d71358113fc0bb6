use crate::utils::util::Result;
use rust_htslib::bgzf::{self, CompressionLevel};
use std::io::{self, Write};

/// htslib BGZF sink for the table. Output is plain text (`wu`) unless
/// compression is requested.
pub struct TableWriter {
    writer: bgzf::Writer,
}

impl TableWriter {
    pub fn new(output: Option<&String>, compress: bool) -> Result<Self> {
        let level = if compress {
            CompressionLevel::Default
        } else {
            CompressionLevel::NoCompression
        };
        log::trace!("Table output compressed: {}", compress);

        let writer = match output {
            Some(path) => bgzf::Writer::from_path_with_level(path, level),
            None => bgzf::Writer::from_stdout_with_compression(level),
        }
        .map_err(|e| crate::vcf2table_error!("Failed to create writer: {}", e))?;

        Ok(TableWriter { writer })
    }
}

impl Write for TableWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_utils::make_temp_path;
    use flate2::read::MultiGzDecoder;
    use std::{fs, io::Read};

    fn write_table(compress: bool) -> Vec<u8> {
        let out_path = make_temp_path("table_writer", "tsv");
        let out = out_path.to_string_lossy().into_owned();
        {
            let mut writer = TableWriter::new(Some(&out), compress).unwrap();
            writer.write_all(b"#CHROM\tPOS\n").unwrap();
            writer.write_all(b"chr1\t1\n").unwrap();
            writer.flush().unwrap();
        }
        let raw = fs::read(&out_path).unwrap();
        fs::remove_file(out_path).unwrap();
        raw
    }

    #[test]
    fn table_writer_default_output_is_plain_text() {
        let raw = write_table(false);
        assert_eq!(raw, b"#CHROM\tPOS\nchr1\t1\n");
    }

    #[test]
    fn table_writer_compressed_output_is_gzip_readable() {
        let raw = write_table(true);
        assert_eq!(&raw[..2], &[0x1f, 0x8b]);
        let mut text = String::new();
        MultiGzDecoder::new(raw.as_slice())
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "#CHROM\tPOS\nchr1\t1\n");
    }

    #[test]
    fn table_writer_fails_for_missing_directory() {
        let out = "/nonexistent/dir/table.tsv".to_string();
        let result = TableWriter::new(Some(&out), false);
        assert!(result.is_err());
    }
}
