use crate::{
    cli::Cli,
    constants::PloidyPolicy,
    core::encoder::RecordEncoder,
    error::Vcf2TableError,
    io::{
        table_writer::TableWriter,
        vcf_reader::{VariantSource, VcfReader},
    },
    utils::util::{format_number_with_commas, Result},
};
use std::io::Write;


#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub records_read: usize,
    pub rows_written: usize,
    pub skipped_no_genotypes: usize,
    pub skipped_ploidy: usize,
}

impl ConversionSummary {
    pub fn log(&self) {
        log::info!(
            "Read {} records, wrote {} rows",
            format_number_with_commas(self.records_read),
            format_number_with_commas(self.rows_written)
        );
        if self.skipped_no_genotypes > 0 {
            log::info!(
                "Skipped {} records without genotypes",
                format_number_with_commas(self.skipped_no_genotypes)
            );
        }
        if self.skipped_ploidy > 0 {
            log::warn!(
                "Skipped {} records with non-diploid genotypes",
                format_number_with_commas(self.skipped_ploidy)
            );
        }
    }
}

fn write_line<W: Write>(sink: &mut W, line: &str) -> Result<()> {
    Ok(sink.write_all(line.as_bytes())?)
}

/// Streams every record of `source` into `sink` as a genotype table.
///
/// The header line is written first, then one row per record carrying
/// genotype data. Read and write failures end the run immediately.
pub fn write_table<S, W>(
    source: &mut S,
    sink: &mut W,
    policy: PloidyPolicy,
) -> Result<ConversionSummary>
where
    S: VariantSource,
    W: Write,
{
    let sample_n = source.header().sample_count();
    write_line(sink, &source.header().project())?;

    let mut encoder = RecordEncoder::new(sample_n);
    let mut summary = ConversionSummary::default();
    while let Some(record) = source.next_record()? {
        summary.records_read += 1;
        match encoder.encode(&record) {
            Ok(Some(line)) => {
                write_line(sink, line)?;
                summary.rows_written += 1;
            }
            Ok(None) => {
                log::trace!("No genotypes at {}:{}, skipping", record.chrom, record.pos);
                summary.skipped_no_genotypes += 1;
            }
            Err(e @ Vcf2TableError::PloidyMismatch { .. }) => match policy {
                PloidyPolicy::Skip => {
                    log::warn!("{e}, skipping");
                    summary.skipped_ploidy += 1;
                }
                PloidyPolicy::Abort => return Err(e),
            },
            Err(e) => return Err(e),
        }
    }

    sink.flush()?;
    Ok(summary)
}

pub fn convert(args: Cli) -> Result<ConversionSummary> {
    // Opened before the output so a bad input never creates an output file
    let mut reader = VcfReader::from_path(&args.input)?;
    let mut writer = TableWriter::new(args.output.as_ref(), args.compress)?;

    let summary = write_table(&mut reader, &mut writer, args.on_ploidy_mismatch)?;
    summary.log();
    Ok(summary)
}
