mod cli;
mod error;
mod logging;

use crate::cli::Cli;
use crate::error::Result;
use clap::Parser;
use omdtools::workflows::combine;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!("🚀 omdCombined v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    match combine::combine_files(&cli.solute, &cli.solvent, &cli.output) {
        Ok(report) => {
            info!("✅ Command completed successfully.");
            println!(
                "✅ Combined {} solute and {} solvent integrable objects into '{}' ({} total).",
                report.solute_count,
                report.solvent_count,
                cli.output.display(),
                report.total()
            );
            Ok(())
        }
        Err(e) => {
            error!("❌ Command failed: {}", e);
            Err(e.into())
        }
    }
}
