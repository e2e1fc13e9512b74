// Fantasy scoring models.
//
// Three independent value functions selected by sport/role. Each takes an
// optional stat line and returns 0.0 for an absent record; malformed ratio
// strings parse to their no-penalty defaults so a bad field never sinks the
// whole valuation.

use crate::stats::record::{BasketballLine, HittingLine, PitchingLine};
use crate::valuation::round1;

// ---------------------------------------------------------------------------
// Scoring format
// ---------------------------------------------------------------------------

/// League scoring format. Categories and roto leagues reuse the points
/// composite as a simplified proxy rather than a separate model, a
/// documented limitation rather than a distinct algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ScoringFormat {
    #[default]
    Points,
    Categories,
    Roto,
}

impl ScoringFormat {
    pub fn label(&self) -> &'static str {
        match self {
            ScoringFormat::Points => "Points",
            ScoringFormat::Categories => "Categories",
            ScoringFormat::Roto => "Roto",
        }
    }
}

impl std::fmt::Display for ScoringFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ScoringFormat::Points => "points",
            ScoringFormat::Categories => "categories",
            ScoringFormat::Roto => "roto",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Weights (standard points-league settings)
// ---------------------------------------------------------------------------

const NBA_W_PTS: f64 = 1.0;
const NBA_W_REB: f64 = 1.2;
const NBA_W_AST: f64 = 1.5;
const NBA_W_STL: f64 = 3.0;
const NBA_W_BLK: f64 = 3.0;
const NBA_W_FG3M: f64 = 0.5;
const NBA_W_TOV: f64 = -1.0;

const MLB_W_RUNS: f64 = 1.0;
const MLB_W_HR: f64 = 4.0;
const MLB_W_RBI: f64 = 1.0;
const MLB_W_SB: f64 = 2.0;
/// Bonus per .010 of batting average above the threshold.
const AVG_BONUS_RATE: f64 = 5.0;
const AVG_BONUS_THRESHOLD: f64 = 0.270;

const MLB_W_WINS: f64 = 5.0;
const MLB_W_SO: f64 = 1.0;
const MLB_W_SAVES: f64 = 5.0;
/// Penalty per 0.50 of ERA above 3.50.
const ERA_PENALTY_RATE: f64 = 2.0;
const ERA_THRESHOLD: f64 = 3.50;
const ERA_STEP: f64 = 0.50;
/// Penalty per 0.10 of WHIP above 1.20.
const WHIP_PENALTY_RATE: f64 = 3.0;
const WHIP_THRESHOLD: f64 = 1.20;
const WHIP_STEP: f64 = 0.10;

// ---------------------------------------------------------------------------
// Value functions
// ---------------------------------------------------------------------------

/// Fantasy points per game for NBA points leagues: a weighted linear sum over
/// the counting categories.
pub fn basketball_points_value(line: Option<&BasketballLine>) -> f64 {
    let Some(line) = line else {
        return 0.0;
    };
    let total = line.pts * NBA_W_PTS
        + line.reb * NBA_W_REB
        + line.ast * NBA_W_AST
        + line.stl * NBA_W_STL
        + line.blk * NBA_W_BLK
        + line.fg3m * NBA_W_FG3M
        + line.tov * NBA_W_TOV;
    round1(total)
}

/// Fantasy value for MLB hitters: counting stats plus a batting-average bonus
/// above .270. There is no penalty below the threshold.
pub fn hitting_value(line: Option<&HittingLine>) -> f64 {
    let Some(line) = line else {
        return 0.0;
    };
    let mut total = line.runs * MLB_W_RUNS
        + line.hr * MLB_W_HR
        + line.rbi * MLB_W_RBI
        + line.sb * MLB_W_SB;

    let avg = parse_average(&line.avg);
    if avg > AVG_BONUS_THRESHOLD {
        total += (avg - AVG_BONUS_THRESHOLD) * 1000.0 * AVG_BONUS_RATE;
    }

    round1(total)
}

/// Fantasy value for MLB pitchers: counting stats minus ERA and WHIP
/// penalties above their thresholds.
pub fn pitching_value(line: Option<&PitchingLine>) -> f64 {
    let Some(line) = line else {
        return 0.0;
    };
    let mut total = line.wins * MLB_W_WINS + line.so * MLB_W_SO + line.saves * MLB_W_SAVES;

    let era = parse_ratio(&line.era, ERA_THRESHOLD);
    if era > ERA_THRESHOLD {
        total -= (era - ERA_THRESHOLD) / ERA_STEP * ERA_PENALTY_RATE;
    }

    let whip = parse_ratio(&line.whip, WHIP_THRESHOLD);
    if whip > WHIP_THRESHOLD {
        total -= (whip - WHIP_THRESHOLD) / WHIP_STEP * WHIP_PENALTY_RATE;
    }

    round1(total)
}

// ---------------------------------------------------------------------------
// Ratio parsing
// ---------------------------------------------------------------------------

/// Parse a batting average that may be formatted ".287", "0.287", or as raw
/// points "287". Malformed input defaults to .250.
pub fn parse_average(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => {
            if v > 1.0 {
                v / 1000.0
            } else {
                v
            }
        }
        _ => 0.250,
    }
}

/// Parse an ERA/WHIP-shaped ratio; malformed input defaults to the penalty
/// threshold itself, which suppresses the penalty.
fn parse_ratio(raw: &str, default: f64) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => default,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
