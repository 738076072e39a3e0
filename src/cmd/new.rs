use crate::{reports, Controller};
use clap::{ArgMatches, Args};
use dominoscore::config::RuleConfig;
use dominoscore::GameType;
use std::path::PathBuf;
use tracing::error;

#[derive(Args, Debug, Clone)]
pub struct NewArgs {
    #[arg(long, default_value = "Team A")]
    pub team_a: String,

    #[arg(long, default_value = "Team B")]
    pub team_b: String,

    /// 200, 250, 500 or 500-bonuses
    #[arg(short = 'g', long, default_value = "250")]
    pub game_type: GameType,

    /// JSON rules preset. Explicit rule flags still win over it.
    #[arg(long)]
    pub rules: Option<PathBuf>,

    #[command(flatten)]
    pub rule_flags: RuleConfig,
}

pub fn run(args: NewArgs, matches: Option<&ArgMatches>, controller: &mut Controller) -> i32 {
    let mut rules = match &args.rules {
        Some(path) => match RuleConfig::load_from_file(path) {
            Ok(rules) => rules,
            Err(e) => {
                error!("Could not read rules from {}: {}", path.display(), e);
                return 1;
            }
        },
        None => controller.state().rules.clone(),
    };

    if let Some(matches) = matches {
        rules.merge_from_cli(&args.rule_flags, matches);
    }

    controller.start_new_match(&args.team_a, &args.team_b, args.game_type);
    if rules != controller.state().rules {
        controller.replace_rules(rules);
    }

    println!("\n🁫  New match to {}", controller.state().target());
    reports::print_match(controller.state());
    0
}
