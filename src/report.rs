// Draft board text rendering.
//
// Consumes the final ranked list and produces the printable report: ranked
// entries with season lines, trend, live notes, sleeper calls, and a
// positional scarcity summary.

use crate::board::RankedCandidate;
use crate::stats::record::StatLine;
use crate::stats::Sport;
use crate::valuation::scoring::ScoringFormat;

const WIDTH: usize = 72;

/// Position labels used in the scarcity summary.
const NBA_POSITIONS: &[(&str, &str)] = &[
    ("PG", "Point Guard"),
    ("SG", "Shooting Guard"),
    ("SF", "Small Forward"),
    ("PF", "Power Forward"),
    ("C", "Center"),
    ("G", "Guard"),
    ("F", "Forward"),
];

const MLB_POSITIONS: &[(&str, &str)] = &[
    ("C", "Catcher"),
    ("1B", "First Base"),
    ("2B", "Second Base"),
    ("3B", "Third Base"),
    ("SS", "Shortstop"),
    ("OF", "Outfield"),
    ("DH", "Designated Hitter"),
    ("SP", "Starting Pitcher"),
    ("RP", "Relief Pitcher"),
];

/// Render the ranked board as a printable report showing the top `top_n`
/// candidates.
pub fn format_draft_board(
    ranked: &[RankedCandidate],
    sport: Sport,
    format: ScoringFormat,
    top_n: usize,
) -> String {
    let mut lines = Vec::new();

    lines.push("=".repeat(WIDTH));
    lines.push(format!(
        "  DRAFT SCOUT -- {} {} League",
        sport.label(),
        format.label()
    ));
    lines.push("=".repeat(WIDTH));
    lines.push(String::new());
    lines.push("  BEST AVAILABLE PLAYERS".to_string());
    lines.push(format!("  {}", "-".repeat(WIDTH - 4)));

    for (i, candidate) in ranked.iter().take(top_n).enumerate() {
        let mut tag = String::new();
        if candidate.sleeper.is_some() {
            tag.push_str(" [SLEEPER]");
        }
        if !candidate.live_note.is_empty() {
            tag.push_str(" [LIVE]");
        }

        lines.push(format!(
            "  {:2}. {} ({}, {}) -- VOR: {:+.1}{}",
            i + 1,
            candidate.name,
            candidate.position,
            candidate.team,
            candidate.vor,
            tag
        ));

        lines.push(season_line(candidate));

        if candidate.trend != 0.0 {
            let direction = if candidate.trend > 0.0 { "UP" } else { "DOWN" };
            lines.push(format!(
                "      Last 10: {direction} {:.0}% from season avg",
                candidate.trend.abs()
            ));
        }

        if !candidate.live_note.is_empty() {
            lines.push(format!("      {}", candidate.live_note));
        }

        if let Some(reason) = &candidate.sleeper {
            lines.push(format!("      >> SLEEPER: {reason}"));
        }

        if !candidate.recommendation.is_empty() {
            lines.push(format!("      >> {}", candidate.recommendation));
        }

        lines.push(String::new());
    }

    lines.push(format!("  {}", "-".repeat(WIDTH - 4)));
    lines.push("  POSITIONAL SCARCITY".to_string());
    lines.push(String::new());
    lines.extend(scarcity_summary(ranked, sport));

    lines.push(String::new());
    lines.push("=".repeat(WIDTH));
    lines.join("\n")
}

/// One-line season summary per sport/role.
fn season_line(candidate: &RankedCandidate) -> String {
    match &candidate.stats.line {
        StatLine::Basketball(s) => format!(
            "      Season: {:.1}pts, {:.1}reb, {:.1}ast, {:.1}stl, {:.1}blk",
            s.pts, s.reb, s.ast, s.stl, s.blk
        ),
        StatLine::Hitting(s) => format!(
            "      Season: {} AVG, {:.0} HR, {:.0} RBI, {:.0} R, {:.0} SB",
            s.avg, s.hr, s.rbi, s.runs, s.sb
        ),
        StatLine::Pitching(s) => format!(
            "      Season: {:.0}W-{:.0}L, {} ERA, {:.0} K, {} WHIP",
            s.wins, s.losses, s.era, s.so, s.whip
        ),
    }
}

/// Count quality options per position across the whole ranked pool.
fn scarcity_summary(ranked: &[RankedCandidate], sport: Sport) -> Vec<String> {
    let positions = match sport {
        Sport::Nba => NBA_POSITIONS,
        Sport::Mlb => MLB_POSITIONS,
    };

    let mut lines = Vec::new();
    for (abbr, _label) in positions {
        let count = ranked
            .iter()
            .filter(|c| c.position.split('/').any(|p| p == *abbr))
            .count();
        if count == 0 {
            continue;
        }
        let depth = if count <= 3 {
            "SCARCE"
        } else if count <= 6 {
            "THIN"
        } else {
            "DEEP"
        };
        lines.push(format!("    {abbr:3}: {count:2} quality options ({depth})"));
    }
    lines
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
