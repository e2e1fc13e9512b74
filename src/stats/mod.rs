// Stat acquisition and normalization.
//
// The provider clients (`nba`, `mlb`) translate provider payloads into the
// canonical record shapes in `record`; the `StatSource` trait is the seam the
// board builder consumes, so tests can substitute a fake provider. `resolve`
// is the normalizer entry point: a name either becomes a `PlayerStatRecord`
// or `None`, never an error.

pub mod extract;
pub mod mlb;
pub mod nba;
pub mod rate_limit;
pub mod record;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Utc};

use crate::config::Config;
use crate::stats::mlb::MlbClient;
use crate::stats::nba::BdlClient;
use crate::stats::record::{GameLogEntry, PlayerStatRecord};

// ---------------------------------------------------------------------------
// Sport
// ---------------------------------------------------------------------------

/// Supported sports. Anything else is rejected at the parse boundary, which
/// is how an unsupported sport key ends up producing an empty board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Sport {
    Nba,
    Mlb,
}

impl Sport {
    pub fn label(&self) -> &'static str {
        match self {
            Sport::Nba => "NBA",
            Sport::Mlb => "MLB",
        }
    }
}

impl FromStr for Sport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nba" => Ok(Sport::Nba),
            "mlb" => Ok(Sport::Mlb),
            other => Err(format!("unsupported sport: {other}")),
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// MLB stat groups: every record is either a hitting line or a pitching line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatGroup {
    Hitting,
    Pitching,
}

impl StatGroup {
    /// The `group` query value the MLB Stats API expects.
    pub fn api_name(&self) -> &'static str {
        match self {
            StatGroup::Hitting => "hitting",
            StatGroup::Pitching => "pitching",
        }
    }
}

// ---------------------------------------------------------------------------
// Season inference
// ---------------------------------------------------------------------------

/// NBA seasons are labeled by their starting year and roll over in October.
pub fn nba_season_for(today: NaiveDate) -> i32 {
    if today.month() >= 10 {
        today.year()
    } else {
        today.year() - 1
    }
}

/// Draft valuation uses the last completed MLB regular season.
pub fn mlb_stat_season_for(today: NaiveDate) -> i32 {
    today.year() - 1
}

/// Spring training (and roster search) belong to the current calendar year.
pub fn mlb_current_season_for(today: NaiveDate) -> i32 {
    today.year()
}

// ---------------------------------------------------------------------------
// StatSource seam
// ---------------------------------------------------------------------------

/// The stat-provider collaborator boundary. Implementations never return
/// errors: network failures, unknown names, and empty stat splits all read as
/// `None`/empty, and callers skip the affected candidate.
#[async_trait]
pub trait StatSource: Send + Sync {
    async fn nba_season(&self, player_name: &str) -> Option<PlayerStatRecord>;
    async fn nba_game_log(&self, player_id: i64, last_n: usize) -> Vec<GameLogEntry>;
    async fn mlb_season(&self, player_name: &str, group: StatGroup) -> Option<PlayerStatRecord>;
    async fn mlb_spring(&self, player_name: &str) -> Option<PlayerStatRecord>;
}

/// The real provider pair. Each client owns its own rate limiter, so one
/// `ProviderSet` per process preserves the per-provider throttling
/// semantics no matter how many call sites share it.
pub struct ProviderSet {
    nba: BdlClient,
    mlb: MlbClient,
}

impl ProviderSet {
    pub fn from_config(config: &Config) -> Self {
        ProviderSet {
            nba: BdlClient::new(&config.providers.nba),
            mlb: MlbClient::new(&config.providers.mlb),
        }
    }
}

#[async_trait]
impl StatSource for ProviderSet {
    async fn nba_season(&self, player_name: &str) -> Option<PlayerStatRecord> {
        let season = nba_season_for(Utc::now().date_naive());
        self.nba.season_stats(player_name, season).await
    }

    async fn nba_game_log(&self, player_id: i64, last_n: usize) -> Vec<GameLogEntry> {
        self.nba.game_log(player_id, last_n).await
    }

    async fn mlb_season(&self, player_name: &str, group: StatGroup) -> Option<PlayerStatRecord> {
        let season = mlb_stat_season_for(Utc::now().date_naive());
        self.mlb.season_stats(player_name, season, group).await
    }

    async fn mlb_spring(&self, player_name: &str) -> Option<PlayerStatRecord> {
        let season = mlb_current_season_for(Utc::now().date_naive());
        self.mlb.spring_training_stats(player_name, season).await
    }
}

// ---------------------------------------------------------------------------
// Normalizer entry point
// ---------------------------------------------------------------------------

/// Resolve one candidate name into a normalized stat record.
///
/// NBA names resolve to season averages. MLB names try hitting first and fall
/// back to a pitching lookup when no hitting stats exist; a spring-training
/// record with at least one game is attached as the nested sub-record.
///
/// `None` means the player is unresolvable (or the provider is unreachable)
/// and the candidate should be skipped.
pub async fn resolve<S>(source: &S, sport: Sport, player_name: &str) -> Option<PlayerStatRecord>
where
    S: StatSource + ?Sized,
{
    match sport {
        Sport::Nba => source.nba_season(player_name).await,
        Sport::Mlb => {
            let mut record = match source.mlb_season(player_name, StatGroup::Hitting).await {
                Some(record) => record,
                None => source.mlb_season(player_name, StatGroup::Pitching).await?,
            };
            if let Some(spring) = source.mlb_spring(player_name).await {
                if spring.games > 0 {
                    record.attach_spring(spring);
                }
            }
            Some(record)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sport_parses_known_keys_case_insensitively() {
        assert_eq!(Sport::from_str("nba").unwrap(), Sport::Nba);
        assert_eq!(Sport::from_str("MLB").unwrap(), Sport::Mlb);
    }

    #[test]
    fn unsupported_sport_is_rejected() {
        assert!(Sport::from_str("nfl").is_err());
        assert!(Sport::from_str("").is_err());
    }

    #[test]
    fn nba_season_rolls_over_in_october() {
        let jan = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        assert_eq!(nba_season_for(jan), 2025);

        let oct = NaiveDate::from_ymd_opt(2026, 10, 22).unwrap();
        assert_eq!(nba_season_for(oct), 2026);
    }

    #[test]
    fn mlb_seasons_use_calendar_year() {
        let aug = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        assert_eq!(mlb_stat_season_for(aug), 2025);
        assert_eq!(mlb_current_season_for(aug), 2026);
    }
}
