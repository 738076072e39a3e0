use crate::Controller;
use clap::Args;
use dominoscore::export::export_history_csv;
use dominoscore::ScoreResult;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Destination file. Defaults to stdout.
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

fn write(args: &ExportArgs, controller: &Controller) -> ScoreResult<()> {
    let state = controller.state();
    match &args.out {
        Some(path) => {
            export_history_csv(state, File::create(path)?)?;
            info!("Wrote {} entries to {}", state.history.len(), path.display());
        }
        None => export_history_csv(state, io::stdout().lock())?,
    }
    Ok(())
}

pub fn run(args: ExportArgs, controller: &Controller) -> i32 {
    match write(&args, controller) {
        Ok(()) => 0,
        Err(e) => {
            error!("Export failed: {}", e);
            1
        }
    }
}
