use crate::error::{ScoreError, ScoreResult};
use clap::{parser::ValueSource, ArgAction, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

pub const DEFAULT_PASE_CORRIDO_POINTS: u32 = 25;
pub const DEFAULT_CAPICUA_POINTS: u32 = 50;
pub const DEFAULT_CHUCHAZO_POINTS: u32 = 50;

/// House rules for a match. Persisted with the match itself.
#[derive(Args, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuleConfig {
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub opening_pass_enabled: bool,

    // Dominican variant: in some 500 matches every hand on the table counts on a win.
    #[arg(long, default_value_t = false, action = ArgAction::Set)]
    pub count_all_hands_in_500: bool,

    #[arg(long, default_value_t = DEFAULT_PASE_CORRIDO_POINTS)]
    pub pase_corrido_points: u32,
    #[arg(long, default_value_t = DEFAULT_CAPICUA_POINTS)]
    pub capicua_points: u32,
    #[arg(long, default_value_t = DEFAULT_CHUCHAZO_POINTS)]
    pub chuchazo_points: u32,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            opening_pass_enabled: true,
            count_all_hands_in_500: false,
            pase_corrido_points: DEFAULT_PASE_CORRIDO_POINTS,
            capicua_points: DEFAULT_CAPICUA_POINTS,
            chuchazo_points: DEFAULT_CHUCHAZO_POINTS,
        }
    }
}

impl RuleConfig {
    /// Reads a JSON rules preset. Missing fields take their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ScoreResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Copies over only the flags the user actually typed, so a preset file
    /// is not clobbered by clap defaults.
    pub fn merge_from_cli(&mut self, cli_rules: &RuleConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli_rules.$field.clone();
                }
            };
        }

        update_if_present!(opening_pass_enabled, "opening_pass_enabled");
        update_if_present!(count_all_hands_in_500, "count_all_hands_in_500");
        update_if_present!(pase_corrido_points, "pase_corrido_points");
        update_if_present!(capicua_points, "capicua_points");
        update_if_present!(chuchazo_points, "chuchazo_points");
    }

    /// Settings-apply. Each field is validated on its own; a bad field is
    /// logged and skipped while the others still land. Returns the names of
    /// the skipped fields.
    pub fn apply(&mut self, update: &RulesUpdate) -> Vec<&'static str> {
        let mut rejected = Vec::new();

        if let Some(enabled) = update.opening_pass_enabled {
            self.opening_pass_enabled = enabled;
        }
        if let Some(enabled) = update.count_all_hands_in_500 {
            self.count_all_hands_in_500 = enabled;
        }

        let numeric = [
            ("pase_corrido_points", &update.pase_corrido_points, &mut self.pase_corrido_points),
            ("capicua_points", &update.capicua_points, &mut self.capicua_points),
            ("chuchazo_points", &update.chuchazo_points, &mut self.chuchazo_points),
        ];

        for (field, raw, slot) in numeric {
            let Some(raw) = raw else { continue };
            match validate_points(field, raw) {
                Ok(points) => {
                    debug!("Rule {} -> {}", field, points);
                    *slot = points;
                }
                Err(e) => {
                    warn!("Ignoring rule update: {}", e);
                    rejected.push(field);
                }
            }
        }

        rejected
    }
}

/// Partial settings update. Point values arrive as raw text and are checked
/// by [`RuleConfig::apply`].
#[derive(Args, Debug, Clone, Default)]
pub struct RulesUpdate {
    #[arg(long)]
    pub opening_pass_enabled: Option<bool>,
    #[arg(long)]
    pub count_all_hands_in_500: Option<bool>,
    #[arg(long, allow_hyphen_values = true)]
    pub pase_corrido_points: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub capicua_points: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub chuchazo_points: Option<String>,
}

impl RulesUpdate {
    pub fn is_empty(&self) -> bool {
        self.opening_pass_enabled.is_none()
            && self.count_all_hands_in_500.is_none()
            && self.pase_corrido_points.is_none()
            && self.capicua_points.is_none()
            && self.chuchazo_points.is_none()
    }
}

/// Accepts any non-negative whole number ("25", " 50 ", "25.0").
pub fn validate_points(field: &'static str, raw: &str) -> ScoreResult<u32> {
    let invalid = || ScoreError::InvalidConfigurationValue {
        field,
        value: raw.to_string(),
    };

    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(invalid());
    }
    Ok(value as u32)
}
