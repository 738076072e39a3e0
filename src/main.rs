use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use dominoscore::storage::{FileStore, MatchStore};
use dominoscore::MatchController;
use std::path::PathBuf;
use tracing::Level;

mod cmd;
mod reports;

pub type Controller = MatchController<FileStore>;

#[derive(Parser, Debug)]
#[command(name = "dominoscore", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the saved match.
    #[arg(global = true, short = 'd', long, default_value = ".dominoscore")]
    data_dir: PathBuf,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start a fresh match (house rules carry over unless overridden).
    New(cmd::new::NewArgs),
    /// Score the current hand.
    Score(cmd::score::ScoreArgs),
    /// Move a history entry to the other team.
    Correct(cmd::manage::CorrectArgs),
    /// Switch the game type mid-match.
    GameType(cmd::manage::GameTypeArgs),
    /// Show or update house rules.
    Rules(cmd::manage::RulesArgs),
    /// Rename a team (blank restores the default name).
    Rename(cmd::manage::RenameArgs),
    /// Scoreboard, rules and history.
    Status,
    /// Write the history as CSV.
    Export(cmd::export::ExportArgs),
    /// Print the double-six set.
    Tiles,
}

fn main() {
    // Raw matches are kept so `new` can tell typed rule flags from defaults.
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let store = MatchStore::new(FileStore::new(&cli.data_dir));
    let mut controller = MatchController::load(store);

    let code = match cli.command {
        Commands::New(args) => {
            let sub_matches = matches.subcommand_matches("new");
            cmd::new::run(args, sub_matches, &mut controller)
        }
        Commands::Score(args) => cmd::score::run(args, &mut controller),
        Commands::Correct(args) => cmd::manage::run_correct(args, &mut controller),
        Commands::GameType(args) => cmd::manage::run_game_type(args, &mut controller),
        Commands::Rules(args) => cmd::manage::run_rules(args, &mut controller),
        Commands::Rename(args) => cmd::manage::run_rename(args, &mut controller),
        Commands::Status => {
            reports::print_match(controller.state());
            0
        }
        Commands::Export(args) => cmd::export::run(args, &controller),
        Commands::Tiles => {
            reports::print_tile_set();
            0
        }
    };

    std::process::exit(code);
}
