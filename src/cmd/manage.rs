use crate::{reports, Controller};
use clap::Args;
use dominoscore::config::RulesUpdate;
use dominoscore::{GameType, TeamId};
use tracing::error;

#[derive(Args, Debug, Clone)]
pub struct CorrectArgs {
    /// History position, oldest first, starting at 0.
    #[arg(short, long)]
    pub index: usize,
}

pub fn run_correct(args: CorrectArgs, controller: &mut Controller) -> i32 {
    if let Err(e) = controller.correct_history_entry(args.index) {
        error!("{}", e);
        return 1;
    }
    reports::print_scoreboard(controller.state());
    0
}

#[derive(Args, Debug, Clone)]
pub struct GameTypeArgs {
    pub game_type: GameType,
}

pub fn run_game_type(args: GameTypeArgs, controller: &mut Controller) -> i32 {
    controller.change_game_type(args.game_type);
    reports::print_scoreboard(controller.state());
    0
}

#[derive(Args, Debug, Clone)]
pub struct RulesArgs {
    #[command(flatten)]
    pub update: RulesUpdate,
}

pub fn run_rules(args: RulesArgs, controller: &mut Controller) -> i32 {
    let mut code = 0;
    if !args.update.is_empty() {
        let rejected = controller.apply_settings(&args.update);
        if !rejected.is_empty() {
            println!("⚠️  Kept previous values for: {}", rejected.join(", "));
            code = 1;
        }
    }
    reports::print_rules(controller.state());
    code
}

#[derive(Args, Debug, Clone)]
pub struct RenameArgs {
    #[arg(short, long)]
    pub team: TeamId,

    #[arg(short, long)]
    pub name: String,
}

pub fn run_rename(args: RenameArgs, controller: &mut Controller) -> i32 {
    controller.rename_team(args.team, &args.name);
    reports::print_scoreboard(controller.state());
    0
}
