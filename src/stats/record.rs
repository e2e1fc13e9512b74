// Normalized per-player stat records.
//
// Everything downstream of the provider clients works on these shapes; the
// provider adapters are the only place that sees raw payloads. Counting stats
// are f64 and default to zero when a provider omits them. Ratio stats that
// providers ship as formatted strings (batting average, ERA, WHIP, innings,
// minutes) stay strings here and are parsed tolerantly at the point of use.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Sample type
// ---------------------------------------------------------------------------

/// Which kind of sample a stat record was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleType {
    RegularSeason,
    SpringTraining,
}

// ---------------------------------------------------------------------------
// Per-sport stat lines
// ---------------------------------------------------------------------------

/// NBA per-game season averages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BasketballLine {
    pub pts: f64,
    pub reb: f64,
    pub ast: f64,
    pub stl: f64,
    pub blk: f64,
    pub tov: f64,
    pub fg3m: f64,
    pub fg_pct: f64,
    pub ft_pct: f64,
    pub fg3_pct: f64,
    /// Average minutes, as the provider formats them (e.g. "34:12" or "34").
    pub min: String,
}

/// MLB season hitting totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HittingLine {
    /// Batting average as the provider formats it, e.g. ".287".
    pub avg: String,
    pub hr: f64,
    pub rbi: f64,
    pub runs: f64,
    pub sb: f64,
    pub hits: f64,
    pub ab: f64,
    pub bb: f64,
    pub so: f64,
    pub obp: String,
    pub slg: String,
    pub ops: String,
}

impl Default for HittingLine {
    fn default() -> Self {
        HittingLine {
            avg: ".000".to_string(),
            hr: 0.0,
            rbi: 0.0,
            runs: 0.0,
            sb: 0.0,
            hits: 0.0,
            ab: 0.0,
            bb: 0.0,
            so: 0.0,
            obp: ".000".to_string(),
            slg: ".000".to_string(),
            ops: ".000".to_string(),
        }
    }
}

/// MLB season pitching totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitchingLine {
    pub wins: f64,
    pub losses: f64,
    /// ERA as the provider formats it, e.g. "3.12".
    pub era: String,
    /// WHIP as the provider formats it, e.g. "1.08".
    pub whip: String,
    pub so: f64,
    /// Innings pitched, e.g. "182.1".
    pub ip: String,
    pub saves: f64,
    pub holds: f64,
    pub bb: f64,
    pub hits_allowed: f64,
    pub hr_allowed: f64,
}

impl Default for PitchingLine {
    fn default() -> Self {
        PitchingLine {
            wins: 0.0,
            losses: 0.0,
            era: "0.00".to_string(),
            whip: "0.00".to_string(),
            so: 0.0,
            ip: "0.0".to_string(),
            saves: 0.0,
            holds: 0.0,
            bb: 0.0,
            hits_allowed: 0.0,
            hr_allowed: 0.0,
        }
    }
}

/// The sport/role-specific portion of a stat record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StatLine {
    Basketball(BasketballLine),
    Hitting(HittingLine),
    Pitching(PitchingLine),
}

// ---------------------------------------------------------------------------
// PlayerStatRecord
// ---------------------------------------------------------------------------

/// Normalized per-player statistics for one sport/role.
///
/// Constructed fresh per lookup by a provider adapter and never mutated
/// afterwards, except to attach a spring-training sub-record via
/// [`PlayerStatRecord::attach_spring`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStatRecord {
    /// Provider-assigned player id, when the provider exposes one.
    pub player_id: Option<i64>,
    pub name: String,
    pub team: String,
    /// Position abbreviation; may be slash-delimited for multi-position
    /// eligibility (e.g. "2B/SS").
    pub position: String,
    /// Games in the sample.
    pub games: u32,
    pub sample: SampleType,
    pub line: StatLine,
    /// Spring-training sub-record, attached after construction for MLB
    /// players with spring at-bats.
    pub spring: Option<Box<PlayerStatRecord>>,
}

impl PlayerStatRecord {
    pub fn basketball(&self) -> Option<&BasketballLine> {
        match &self.line {
            StatLine::Basketball(line) => Some(line),
            _ => None,
        }
    }

    pub fn hitting(&self) -> Option<&HittingLine> {
        match &self.line {
            StatLine::Hitting(line) => Some(line),
            _ => None,
        }
    }

    pub fn pitching(&self) -> Option<&PitchingLine> {
        match &self.line {
            StatLine::Pitching(line) => Some(line),
            _ => None,
        }
    }

    /// Attach a spring-training sub-record. The only permitted mutation after
    /// construction.
    pub fn attach_spring(&mut self, spring: PlayerStatRecord) {
        self.spring = Some(Box::new(spring));
    }
}

// ---------------------------------------------------------------------------
// Game log
// ---------------------------------------------------------------------------

/// One historical game's counting stats for a player. Game logs are ordered
/// most-recent-first and are only used to compute trend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameLogEntry {
    /// Game date as the provider formats it (ISO date or datetime).
    pub date: String,
    pub pts: f64,
    pub reb: f64,
    pub ast: f64,
    pub stl: f64,
    pub blk: f64,
    pub tov: f64,
    pub fg_pct: f64,
    pub min: String,
    pub is_home: bool,
}

// ---------------------------------------------------------------------------
// Position keys
// ---------------------------------------------------------------------------

/// Primary position key for replacement-level bucketing: the first segment of
/// a slash-delimited position string, or "UTIL" when no position is known.
pub fn primary_position(position: &str) -> &str {
    let first = position.split('/').next().unwrap_or("").trim();
    if first.is_empty() {
        "UTIL"
    } else {
        first
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_position_takes_first_slash_segment() {
        assert_eq!(primary_position("2B/SS"), "2B");
        assert_eq!(primary_position("C"), "C");
        assert_eq!(primary_position("PG/SG/SF"), "PG");
    }

    #[test]
    fn primary_position_empty_is_util() {
        assert_eq!(primary_position(""), "UTIL");
        assert_eq!(primary_position("  "), "UTIL");
    }

    #[test]
    fn attach_spring_is_the_only_mutation() {
        let mut record = PlayerStatRecord {
            player_id: Some(660271),
            name: "Test Hitter".into(),
            team: "Test Team".into(),
            position: "OF".into(),
            games: 140,
            sample: SampleType::RegularSeason,
            line: StatLine::Hitting(HittingLine::default()),
            spring: None,
        };
        let spring = PlayerStatRecord {
            player_id: Some(660271),
            name: "Test Hitter".into(),
            team: "Test Team".into(),
            position: "OF".into(),
            games: 12,
            sample: SampleType::SpringTraining,
            line: StatLine::Hitting(HittingLine {
                avg: ".360".into(),
                ..HittingLine::default()
            }),
            spring: None,
        };
        record.attach_spring(spring);
        let attached = record.spring.as_deref().unwrap();
        assert_eq!(attached.sample, SampleType::SpringTraining);
        assert_eq!(attached.hitting().unwrap().avg, ".360");
    }

    #[test]
    fn line_accessors_match_variant() {
        let record = PlayerStatRecord {
            player_id: None,
            name: "Pitcher".into(),
            team: "".into(),
            position: "SP".into(),
            games: 30,
            sample: SampleType::RegularSeason,
            line: StatLine::Pitching(PitchingLine::default()),
            spring: None,
        };
        assert!(record.pitching().is_some());
        assert!(record.hitting().is_none());
        assert!(record.basketball().is_none());
    }
}
