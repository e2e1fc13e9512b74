// Recent-performance trend.
//
// Compares a short game-log window against the season scoring average and
// reports the deviation as a signed percentage. Only defined for basketball;
// baseball trend would need a different window model and is always 0.0.

use crate::stats::record::GameLogEntry;
use crate::valuation::round1;

/// Percentage change of the recent window's points per game versus the
/// season average, rounded to one decimal. Returns 0.0 for an empty log or a
/// zero season average (no division by zero).
pub fn recent_trend(season_ppg: f64, game_log: &[GameLogEntry]) -> f64 {
    if game_log.is_empty() || season_ppg == 0.0 {
        return 0.0;
    }

    let recent_ppg: f64 = game_log.iter().map(|g| g.pts).sum::<f64>() / game_log.len() as f64;
    round1((recent_ppg - season_ppg) / season_ppg * 100.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
