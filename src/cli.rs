use crate::constants::*;
use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{io::Write, path::Path};

/// Full version string including the crate version and git description.
///
/// # Examples
/// * `1.0.0-1ba958a-dirty` - while on a dirty branch
/// * `1.0.0` - outside a git checkout
pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    let git_describe = env!("VERGEN_GIT_DESCRIBE");
    if git_describe.is_empty() || git_describe == "VERGEN_IDEMPOTENT_OUTPUT" {
        env!("CARGO_PKG_VERSION").to_string()
    } else {
        format!("{}-{}", env!("CARGO_PKG_VERSION"), git_describe)
    }
});

#[derive(Parser, Debug, Clone)]
#[command(name="vcf2table",
          version=&**FULL_VERSION,
          about="Convert VCF/BCF genotypes into a tab-delimited table",
          long_about = None,
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    /// Input VCF/BCF file, optionally bgzipped ('-' for standard input)
    #[arg(value_name = "IN.VCF", value_parser = check_input_exists)]
    pub input: String,

    /// Write output to a file [default: standard output]
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        value_parser = check_prefix_path
    )]
    pub output: Option<String>,

    /// Compress the output with BGZF
    #[arg(short = 'z', long = "compress", default_value_t = DEFAULT_COMPRESS)]
    pub compress: bool,

    /// Handling of records whose genotypes are not diploid: skip|abort
    #[arg(
        long = "on-ploidy-mismatch",
        value_name = "POLICY",
        default_value_t = DEFAULT_PLOIDY_POLICY,
        value_parser = parse_ploidy_policy,
        help_heading = "Advanced"
    )]
    pub on_ploidy_mismatch: PloidyPolicy,

    /// Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
    )]
    pub verbosity: u8,
}

/// Initializes the verbosity level for logging based on the command-line arguments.
///
/// `-v` selects debug, `-vv` and above selects trace; `RUST_LOG` is honored
/// for anything the level filter does not override.
pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.module_path().unwrap_or("unknown_module"),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_input_exists(s: &str) -> Result<String> {
    if s == STDIO_PATH {
        return Ok(s.to_string());
    }
    let path = Path::new(s);
    if !path.exists() {
        return Err(anyhow!("File does not exist: {}", path.display()));
    }
    Ok(s.to_string())
}

fn check_prefix_path(s: &str) -> Result<String> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(anyhow!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(s.to_string())
}

fn parse_ploidy_policy(s: &str) -> Result<PloidyPolicy> {
    match s {
        s if s == PloidyPolicy::Skip.as_str() => Ok(PloidyPolicy::Skip),
        s if s == PloidyPolicy::Abort.as_str() => Ok(PloidyPolicy::Abort),
        _ => Err(anyhow!(
            "Invalid ploidy policy: {}. Must be one of skip, abort.",
            s
        )),
    }
}
