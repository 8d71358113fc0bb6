use clap::Parser;
use std::time;
use vcf2table::{
    cli::{init_verbose, Cli, FULL_VERSION},
    commands::convert,
    utils::util::{handle_error_and_exit, Result},
};

fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not errors
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    }
}

fn runner() -> Result<()> {
    let cli = parse_cli();
    init_verbose(&cli);
    log::trace!("CLI options set: {:?}", cli);

    log::info!("Running {}-{}", env!("CARGO_PKG_NAME"), &**FULL_VERSION);

    let start_timer = time::Instant::now();
    convert(cli)?;
    log::info!("Total execution time: {:.2?}", start_timer.elapsed());

    log::info!("{} end", env!("CARGO_PKG_NAME"));
    Ok(())
}

fn main() {
    if let Err(e) = runner() {
        handle_error_and_exit(e);
    }
}
