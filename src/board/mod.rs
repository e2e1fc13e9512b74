// Draft board construction.
//
// Orchestrates the valuation pipeline over a candidate pool: resolve stats,
// score, trend, merge live bonuses, classify sleepers, compute replacement
// baselines and VOR, apply positional-need adjustments, and sort. Strictly
// sequential, one candidate at a time with no backtracking, so wall-clock cost
// scales with pool size and provider rate limits.

pub mod pool;

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::{debug, info};

use crate::live::HotPlayer;
use crate::stats::record::{primary_position, PlayerStatRecord, StatLine};
use crate::stats::{self, Sport, StatSource};
use crate::valuation::replacement::{replacement_baselines, value_over_replacement};
use crate::valuation::scoring::{
    basketball_points_value, hitting_value, pitching_value, ScoringFormat,
};
use crate::valuation::{sleeper, trend};

/// Flat value bump for players flagged hot by the live signal.
const LIVE_BONUS: f64 = 3.0;
/// VOR bump for candidates at a position the roster does not hold.
const POSITIONAL_NEED_BONUS: f64 = 2.0;
/// Trends above this percentage earn a kicker on adjusted value.
const TREND_KICKER_THRESHOLD: f64 = 10.0;
const TREND_KICKER_RATE: f64 = 0.1;
/// Game-log window for trend computation.
const TREND_WINDOW: usize = 10;

// ---------------------------------------------------------------------------
// Request and output types
// ---------------------------------------------------------------------------

/// One board build's inputs.
#[derive(Debug, Clone)]
pub struct BoardRequest {
    pub sport: Sport,
    pub format: ScoringFormat,
    /// Players already drafted (unavailable), matched case-insensitively.
    pub drafted: Vec<String>,
    /// The user's current roster, for positional-need accounting.
    pub roster: Vec<String>,
    /// Candidate names to evaluate.
    pub pool: Vec<String>,
}

impl BoardRequest {
    /// A request over the sport's default candidate pool.
    pub fn new(sport: Sport, format: ScoringFormat) -> Self {
        BoardRequest {
            sport,
            format,
            drafted: Vec::new(),
            roster: Vec::new(),
            pool: pool::default_pool(sport),
        }
    }
}

/// A valued, ranked candidate: one per surviving pool entry per build.
#[derive(Debug, Clone)]
pub struct RankedCandidate {
    pub name: String,
    pub team: String,
    pub position: String,
    pub stats: PlayerStatRecord,
    /// Scalar fantasy value after live and trend adjustments.
    pub fantasy_value: f64,
    /// Value over replacement; meaningful only after the full pool is valued.
    pub vor: f64,
    /// Recent-performance trend percentage (basketball only).
    pub trend: f64,
    pub live_note: String,
    /// Sleeper reason when the classifier flagged this candidate.
    pub sleeper: Option<String>,
    pub recommendation: String,
}

// ---------------------------------------------------------------------------
// Build
// ---------------------------------------------------------------------------

/// Build a ranked draft board of available players.
///
/// Candidates whose stats cannot be resolved are skipped silently; missing
/// data is expected and common, and never fails the build. An unreachable
/// provider therefore produces an empty board, which the caller reports as
/// the only user-visible failure.
pub async fn build_draft_board<S>(
    source: &S,
    request: &BoardRequest,
    hot_players: &HashMap<String, HotPlayer>,
) -> Vec<RankedCandidate>
where
    S: StatSource + ?Sized,
{
    let available = pool::filter_drafted(&request.pool, &request.drafted);
    info!(
        sport = %request.sport,
        format = request.format.label(),
        candidates = available.len(),
        "analyzing available players"
    );

    let mut ranked: Vec<RankedCandidate> = Vec::new();
    let mut values_by_position: HashMap<String, Vec<f64>> = HashMap::new();

    for name in &available {
        let Some(record) = stats::resolve(source, request.sport, name).await else {
            debug!(player = %name, "no stats available, skipping");
            continue;
        };

        // Categories and roto formats reuse the points composite as a
        // simplified proxy; only the model per sport/role differs.
        let value = match &record.line {
            StatLine::Basketball(line) => basketball_points_value(Some(line)),
            StatLine::Hitting(line) => hitting_value(Some(line)),
            StatLine::Pitching(line) => pitching_value(Some(line)),
        };

        // Trend is basketball-only; the baseball window model is out of scope.
        let trend = match (&record.line, record.player_id) {
            (StatLine::Basketball(line), Some(player_id)) => {
                let game_log = source.nba_game_log(player_id, TREND_WINDOW).await;
                trend::recent_trend(line.pts, &game_log)
            }
            _ => 0.0,
        };

        // Replacement baselines are computed from unadjusted values.
        let position_key = primary_position(&record.position).to_string();
        values_by_position
            .entry(position_key)
            .or_default()
            .push(value);

        // Live-activity bonus: exact name-string match against the hot map
        // (brittle under nickname/suffix variation, a known limitation).
        let (live_note, live_bonus) = match hot_players.get(name.as_str()) {
            Some(hot) => (hot.note.clone(), LIVE_BONUS),
            None => (String::new(), 0.0),
        };

        // The classifier sees the unadjusted value.
        let sleeper = sleeper::classify(&record, trend, value, &record.position);

        let mut adjusted_value = value + live_bonus;
        if trend > TREND_KICKER_THRESHOLD {
            adjusted_value += trend * TREND_KICKER_RATE;
        }

        ranked.push(RankedCandidate {
            name: name.clone(),
            team: record.team.clone(),
            position: record.position.clone(),
            fantasy_value: adjusted_value,
            vor: 0.0, // assigned once the whole pool is valued
            trend,
            live_note,
            sleeper,
            recommendation: String::new(),
            stats: record,
        });
    }

    // Baselines need the full pool, so VOR is a second pass.
    let baselines = replacement_baselines(&values_by_position);
    for candidate in &mut ranked {
        let key = primary_position(&candidate.position);
        candidate.vor = value_over_replacement(candidate.fantasy_value, key, &baselines);
    }

    // Positional-need bonus for positions the roster does not hold.
    let held = pool::roster_position_counts(&request.roster, request.sport);
    for candidate in &mut ranked {
        let key = primary_position(&candidate.position);
        if held.get(key).copied().unwrap_or(0) == 0 {
            candidate.vor += POSITIONAL_NEED_BONUS;
            candidate.recommendation = format!("fills {key} need");
        }
    }

    // sort_by is stable: equal VOR keeps candidate-pool order.
    ranked.sort_by(|a, b| b.vor.partial_cmp(&a.vor).unwrap_or(Ordering::Equal));

    if let Some(top) = ranked.first_mut() {
        if top.recommendation.is_empty() {
            top.recommendation = "BEST AVAILABLE".to_string();
        }
    }

    info!(ranked = ranked.len(), "draft board ready");
    ranked
}
