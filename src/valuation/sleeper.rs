// Rule-based sleeper detection.
//
// A sleeper is an undervalued breakout candidate flagged by heuristic, not by
// the scoring model. Rules are evaluated in priority order and the first
// match wins; malformed numeric input parses to zero and simply fails its
// threshold, so no rule fires on bad data.

use crate::stats::record::{HittingLine, PlayerStatRecord, SampleType};

const TREND_BREAKOUT: f64 = 15.0;
const TREND_SUPPORT: f64 = 5.0;
const VALUE_FLOOR: f64 = 20.0;
const ELITE_BLOCKS: f64 = 2.0;
const ELITE_STEALS: f64 = 1.8;
const SPRING_BREAKOUT_AVG: f64 = 0.350;
const SPRING_MIN_GAMES: u32 = 5;

const FRONTCOURT: &[&str] = &["C", "PF"];
const BACKCOURT: &[&str] = &["PG", "SG"];

/// Classify a candidate as a sleeper. Returns the human-readable reason when
/// a rule fires; deterministic for identical inputs.
pub fn classify(
    record: &PlayerStatRecord,
    trend: f64,
    fantasy_value: f64,
    position: &str,
) -> Option<String> {
    // 1. Strong recent surge with real fantasy value behind it.
    if trend >= TREND_BREAKOUT && fantasy_value > VALUE_FLOOR {
        return Some(format!("Trending +{trend:.0}% over last 10 games"));
    }

    // 2/3. Elite defensive categories for the position, with a supporting
    // upward trend.
    if let Some(line) = record.basketball() {
        if FRONTCOURT.contains(&position) && line.blk >= ELITE_BLOCKS && trend >= TREND_SUPPORT {
            return Some(format!("Elite blocks ({:.1}/g) with upward trend", line.blk));
        }
        if BACKCOURT.contains(&position) && line.stl >= ELITE_STEALS && trend >= TREND_SUPPORT {
            return Some(format!("Elite steals ({:.1}/g) with upward trend", line.stl));
        }
    }

    // 4. Spring-training standout: a hot average over a real sample. The
    // spring line lives on the record itself when the record is a spring
    // sample, otherwise on the attached sub-record.
    if let Some((line, games)) = spring_hitting(record) {
        if spring_average(&line.avg) >= SPRING_BREAKOUT_AVG && games >= SPRING_MIN_GAMES {
            return Some(format!("Spring training breakout ({} AVG)", line.avg));
        }
    }

    None
}

/// The spring-training hitting line reachable from a record, with its sample
/// size in games.
fn spring_hitting(record: &PlayerStatRecord) -> Option<(&HittingLine, u32)> {
    if record.sample == SampleType::SpringTraining {
        return record.hitting().map(|line| (line, record.games));
    }
    let spring = record.spring.as_deref()?;
    if spring.sample != SampleType::SpringTraining {
        return None;
    }
    spring.hitting().map(|line| (line, spring.games))
}

/// Spring averages parse with a zero default (unlike the scoring model's
/// .250) so malformed input can never clear the breakout threshold.
fn spring_average(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => {
            if v > 1.0 {
                v / 1000.0
            } else {
                v
            }
        }
        _ => 0.0,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::record::{BasketballLine, StatLine};

    fn nba_record(position: &str, stl: f64, blk: f64) -> PlayerStatRecord {
        PlayerStatRecord {
            player_id: Some(1),
            name: "Test Player".into(),
            team: "TST".into(),
            position: position.into(),
            games: 60,
            sample: SampleType::RegularSeason,
            line: StatLine::Basketball(BasketballLine {
                pts: 18.0,
                stl,
                blk,
                ..BasketballLine::default()
            }),
            spring: None,
        }
    }

    fn spring_record(avg: &str, games: u32) -> PlayerStatRecord {
        PlayerStatRecord {
            player_id: Some(2),
            name: "Spring Guy".into(),
            team: "TST".into(),
            position: "OF".into(),
            games,
            sample: SampleType::SpringTraining,
            line: StatLine::Hitting(HittingLine {
                avg: avg.into(),
                ..HittingLine::default()
            }),
            spring: None,
        }
    }

    #[test]
    fn strong_trend_with_value_is_a_sleeper() {
        let record = nba_record("SF", 0.5, 0.5);
        let reason = classify(&record, 18.0, 35.0, "SF").unwrap();
        assert!(reason.contains("+18%"), "got: {reason}");
    }

    #[test]
    fn strong_trend_without_value_is_not() {
        let record = nba_record("SF", 0.5, 0.5);
        assert!(classify(&record, 18.0, 15.0, "SF").is_none());
    }

    #[test]
    fn frontcourt_shot_blocker_with_trend() {
        let record = nba_record("C", 0.5, 2.4);
        let reason = classify(&record, 6.0, 30.0, "C").unwrap();
        assert!(reason.contains("blocks"), "got: {reason}");
        assert!(reason.contains("2.4"), "got: {reason}");
    }

    #[test]
    fn backcourt_thief_with_trend() {
        let record = nba_record("PG", 2.1, 0.2);
        let reason = classify(&record, 5.0, 30.0, "PG").unwrap();
        assert!(reason.contains("steals"), "got: {reason}");
    }

    #[test]
    fn category_rules_need_the_supporting_trend() {
        let record = nba_record("C", 0.5, 2.4);
        assert!(classify(&record, 4.9, 30.0, "C").is_none());
    }

    #[test]
    fn trend_rule_outranks_category_rules() {
        // Both rule 1 and rule 2 hold; the trend reason must win.
        let record = nba_record("C", 0.5, 3.0);
        let reason = classify(&record, 20.0, 40.0, "C").unwrap();
        assert!(reason.starts_with("Trending"), "got: {reason}");
    }

    #[test]
    fn spring_breakout_on_a_spring_tagged_record() {
        let record = spring_record(".380", 8);
        let reason = classify(&record, 0.0, 5.0, "OF").unwrap();
        assert!(reason.contains(".380"), "got: {reason}");
    }

    #[test]
    fn spring_breakout_via_attached_sub_record() {
        let mut record = PlayerStatRecord {
            player_id: Some(3),
            name: "Regular Hitter".into(),
            team: "TST".into(),
            position: "1B".into(),
            games: 150,
            sample: SampleType::RegularSeason,
            line: StatLine::Hitting(HittingLine {
                avg: ".250".into(),
                ..HittingLine::default()
            }),
            spring: None,
        };
        record.attach_spring(spring_record(".364", 6));
        let reason = classify(&record, 0.0, 100.0, "1B").unwrap();
        assert!(reason.contains(".364"), "got: {reason}");
    }

    #[test]
    fn thin_spring_sample_does_not_fire() {
        let record = spring_record(".400", 4);
        assert!(classify(&record, 0.0, 5.0, "OF").is_none());
    }

    #[test]
    fn malformed_spring_average_fails_the_threshold() {
        let record = spring_record("??", 10);
        assert!(classify(&record, 0.0, 5.0, "OF").is_none());
    }

    #[test]
    fn classification_is_deterministic() {
        let record = nba_record("PG", 2.0, 0.3);
        let first = classify(&record, 7.0, 25.0, "PG");
        let second = classify(&record, 7.0, 25.0, "PG");
        assert_eq!(first, second);
        assert!(first.is_some());
    }

    #[test]
    fn no_rule_fires_by_default() {
        let record = nba_record("SF", 1.0, 1.0);
        assert!(classify(&record, 0.0, 30.0, "SF").is_none());
    }
}
