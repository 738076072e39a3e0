use crate::{reports, Controller};
use clap::{Args, ValueEnum};
use dominoscore::input::{Detections, ManualTaps, TileSource};
use dominoscore::{BonusFlags, HandPlay, ScoreError, ScoreResult, TeamId, Tile};
use tracing::error;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandArg {
    Win,
    Tranque,
    Bonus,
}

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[arg(long, value_enum)]
    pub hand: HandArg,

    /// Winner for `win`, receiving team for `bonus`.
    #[arg(short, long)]
    pub team: Option<TeamId>,

    /// Team that opened the hand (tranque tie-break).
    #[arg(short, long)]
    pub starting: Option<TeamId>,

    /// Tiles left in team A's hands, e.g. "6-5,4-4".
    #[arg(long, default_value = "")]
    pub a_tiles: String,

    #[arg(long, default_value = "")]
    pub b_tiles: String,

    /// Detector output for team A as "l,r;l,r". Out-of-range pips are
    /// clamped, repeats dropped, at most 10 kept.
    #[arg(long, allow_hyphen_values = true)]
    pub a_detected: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub b_detected: Option<String>,

    #[arg(long)]
    pub opening_pass: bool,
    #[arg(long)]
    pub pase_corrido: bool,
    #[arg(long)]
    pub capicua: bool,
    #[arg(long)]
    pub chuchazo: bool,

    /// Show the award without applying it.
    #[arg(long)]
    pub dry_run: bool,
}

impl ScoreArgs {
    fn play(&self) -> Result<HandPlay, String> {
        match self.hand {
            HandArg::Win => self
                .team
                .map(|winner| HandPlay::Win { winner })
                .ok_or_else(|| "--team is required for a win".to_string()),
            HandArg::Bonus => self
                .team
                .map(|team| HandPlay::Bonus { team })
                .ok_or_else(|| "--team is required for a bonus".to_string()),
            HandArg::Tranque => self
                .starting
                .or(self.team)
                .map(|starting_team| HandPlay::Tranque { starting_team })
                .ok_or_else(|| "--starting is required for a tranque".to_string()),
        }
    }

    fn bonuses(&self) -> BonusFlags {
        BonusFlags {
            opening_pass: self.opening_pass,
            pase_corrido: self.pase_corrido,
            capicua: self.capicua,
            chuchazo: self.chuchazo,
        }
    }
}

fn load_tiles(
    controller: &mut Controller,
    team: TeamId,
    taps: &str,
    detected: Option<&str>,
) -> ScoreResult<()> {
    let mut sources: Vec<Box<dyn TileSource>> = Vec::new();
    sources.push(Box::new(ManualTaps::from(Tile::parse_list(taps)?)));
    if let Some(raw) = detected {
        sources.push(Box::new(Detections::parse(raw)?));
    }
    for source in &mut sources {
        controller.add_tiles(team, source.tiles()?);
    }
    Ok(())
}

pub fn run(args: ScoreArgs, controller: &mut Controller) -> i32 {
    let play = match args.play() {
        Ok(play) => play,
        Err(msg) => {
            error!("{}", msg);
            return 1;
        }
    };

    let inputs = [
        (TeamId::A, &args.a_tiles, args.a_detected.as_deref()),
        (TeamId::B, &args.b_tiles, args.b_detected.as_deref()),
    ];
    for (team, taps, detected) in inputs {
        if let Err(e) = load_tiles(controller, team, taps, detected) {
            error!("{}", e);
            return 1;
        }
    }
    controller.set_bonuses(args.bonuses());

    if args.dry_run {
        let score = controller.preview(play);
        reports::print_hand_score(controller.state(), &score);
        return 0;
    }

    match controller.apply_score(play) {
        Ok(score) => {
            reports::print_hand_score(controller.state(), &score);
            reports::print_scoreboard(controller.state());
            0
        }
        Err(ScoreError::NothingToAward) => {
            println!("Nothing to award: no leftover pips and no bonus points.");
            2
        }
        Err(e) => {
            error!("{}", e);
            1
        }
    }
}
