// MLB Stats API client: statsapi.mlb.com season and spring-training stats.
//
// No API key required and no strict published rate limit; the client still
// spaces requests out (0.5 s by default) to be a polite consumer. There is no
// special backoff on rejection. All failures degrade to `None`; callers treat
// absence as "skip this player."

use serde_json::Value;
use tokio::time::Duration;
use tracing::{info, warn};

use crate::config::ProviderEndpoint;
use crate::stats::extract::{first, num, text};
use crate::stats::rate_limit::RateLimiter;
use crate::stats::record::{HittingLine, PitchingLine, PlayerStatRecord, SampleType, StatLine};
use crate::stats::StatGroup;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Position abbreviations that mark a player as a pitcher for stat-group
/// selection.
const PITCHER_POSITIONS: &[&str] = &["P", "SP", "RP", "CL"];

/// Rate-limited MLB Stats API client.
pub struct MlbClient {
    http: reqwest::Client,
    base_url: String,
    limiter: RateLimiter,
}

impl MlbClient {
    pub fn new(endpoint: &ProviderEndpoint) -> Self {
        MlbClient {
            http: reqwest::Client::new(),
            base_url: endpoint.base_url.trim_end_matches('/').to_string(),
            limiter: RateLimiter::new(Duration::from_millis(endpoint.min_interval_ms)),
        }
    }

    async fn request(&self, path: &str, params: &[(&str, String)]) -> Option<Value> {
        self.limiter.throttle().await;

        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(params)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                warn!("MLB API request failed: {e}");
                return None;
            }
        };
        self.limiter.mark().await;

        let status = response.status();
        if !status.is_success() {
            warn!("MLB API {path} returned {status}");
            return None;
        }

        match response.json::<Value>().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!("MLB API {path} returned malformed JSON: {e}");
                None
            }
        }
    }

    /// Search for a player by name. Tries the sport-wide player list first,
    /// then the people-search endpoint; the people list may appear under
    /// several keys depending on which endpoint answered.
    async fn find_player(&self, player_name: &str, season: i32) -> Option<Value> {
        let mut body = self
            .request(
                "sports/1/players",
                &[
                    ("season", season.to_string()),
                    ("search", player_name.to_string()),
                ],
            )
            .await;

        if body.is_none() {
            body = self
                .request(
                    "people/search",
                    &[
                        ("names", player_name.to_string()),
                        ("sportId", "1".to_string()),
                    ],
                )
                .await;
        }
        let body = body?;

        let people = first(&body, &["people", "row", "players"])
            .and_then(Value::as_array)
            .filter(|list| !list.is_empty())?;

        let wanted = player_name.to_lowercase();
        for person in people {
            if text(person, &["fullName"], "").to_lowercase() == wanted {
                return Some(person.clone());
            }
        }
        Some(people[0].clone())
    }

    /// Fetch a player's regular-season stats for one stat group. Returns
    /// `None` when the player is unknown or has no splits in that group,
    /// which is how an everyday hitter's pitching lookup (and vice versa)
    /// comes back.
    pub async fn season_stats(
        &self,
        player_name: &str,
        season: i32,
        group: StatGroup,
    ) -> Option<PlayerStatRecord> {
        let player = match self.find_player(player_name, season + 1).await {
            Some(p) => p,
            None => {
                info!("MLB player not found: {player_name}");
                return None;
            }
        };
        let player_id = player.get("id").and_then(Value::as_i64)?;

        let body = self
            .request(
                &format!("people/{player_id}/stats"),
                &[
                    ("stats", "season".to_string()),
                    ("season", season.to_string()),
                    ("group", group.api_name().to_string()),
                    ("sportId", "1".to_string()),
                ],
            )
            .await?;

        let raw = first_split(&body)?;
        Some(season_record(&player, &raw, group, SampleType::RegularSeason))
    }

    /// Fetch a player's spring-training stats (gameType "S") for the given
    /// season. The stat group follows the player's primary position. Returns
    /// `None` when spring games have not produced any splits yet.
    pub async fn spring_training_stats(
        &self,
        player_name: &str,
        season: i32,
    ) -> Option<PlayerStatRecord> {
        let player = self.find_player(player_name, season).await?;
        let player_id = player.get("id").and_then(Value::as_i64)?;

        let position = primary_position_abbr(&player);
        let group = if PITCHER_POSITIONS.contains(&position.as_str()) {
            StatGroup::Pitching
        } else {
            StatGroup::Hitting
        };

        let body = self
            .request(
                &format!("people/{player_id}/stats"),
                &[
                    ("stats", "season".to_string()),
                    ("season", season.to_string()),
                    ("group", group.api_name().to_string()),
                    ("gameType", "S".to_string()),
                    ("sportId", "1".to_string()),
                ],
            )
            .await?;

        let raw = first_split(&body)?;
        Some(season_record(&player, &raw, group, SampleType::SpringTraining))
    }
}

// ---------------------------------------------------------------------------
// Payload adapters
// ---------------------------------------------------------------------------

/// Dig `stats[0].splits[0].stat` out of a stats response.
fn first_split(body: &Value) -> Option<Value> {
    body.get("stats")?
        .as_array()?
        .first()?
        .get("splits")?
        .as_array()?
        .first()?
        .get("stat")
        .cloned()
}

fn primary_position_abbr(player: &Value) -> String {
    player
        .get("primaryPosition")
        .map(|p| text(p, &["abbreviation"], ""))
        .unwrap_or_default()
}

/// Map an MLB people object plus one stat split into the canonical record
/// shape for the given group.
fn season_record(
    player: &Value,
    raw: &Value,
    group: StatGroup,
    sample: SampleType,
) -> PlayerStatRecord {
    let team = player.get("currentTeam").cloned().unwrap_or(Value::Null);

    let line = match group {
        StatGroup::Hitting => StatLine::Hitting(HittingLine {
            avg: text(raw, &["avg"], ".000"),
            hr: num(raw, &["homeRuns"]),
            rbi: num(raw, &["rbi"]),
            runs: num(raw, &["runs"]),
            sb: num(raw, &["stolenBases"]),
            hits: num(raw, &["hits"]),
            ab: num(raw, &["atBats"]),
            bb: num(raw, &["baseOnBalls"]),
            so: num(raw, &["strikeOuts"]),
            obp: text(raw, &["obp"], ".000"),
            slg: text(raw, &["slg"], ".000"),
            ops: text(raw, &["ops"], ".000"),
        }),
        StatGroup::Pitching => StatLine::Pitching(PitchingLine {
            wins: num(raw, &["wins"]),
            losses: num(raw, &["losses"]),
            era: text(raw, &["era"], "0.00"),
            whip: text(raw, &["whip"], "0.00"),
            so: num(raw, &["strikeOuts"]),
            ip: text(raw, &["inningsPitched"], "0.0"),
            saves: num(raw, &["saves"]),
            holds: num(raw, &["holds"]),
            bb: num(raw, &["baseOnBalls"]),
            hits_allowed: num(raw, &["hits"]),
            hr_allowed: num(raw, &["homeRuns"]),
        }),
    };

    PlayerStatRecord {
        player_id: player.get("id").and_then(Value::as_i64),
        name: text(player, &["fullName"], ""),
        team: text(&team, &["name"], ""),
        position: primary_position_abbr(player),
        games: num(raw, &["gamesPlayed"]) as u32,
        sample,
        line,
        spring: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_player() -> Value {
        json!({
            "id": 592450,
            "fullName": "Aaron Judge",
            "primaryPosition": {"abbreviation": "RF"},
            "currentTeam": {"name": "New York Yankees"}
        })
    }

    #[test]
    fn hitting_record_maps_split() {
        let raw = json!({
            "gamesPlayed": 148,
            "avg": ".322",
            "homeRuns": 58, "rbi": 144, "runs": 122, "stolenBases": 10,
            "hits": 180, "atBats": 559, "baseOnBalls": 133, "strikeOuts": 171,
            "obp": ".458", "slg": ".701", "ops": "1.159"
        });

        let record = season_record(
            &sample_player(),
            &raw,
            StatGroup::Hitting,
            SampleType::RegularSeason,
        );
        assert_eq!(record.name, "Aaron Judge");
        assert_eq!(record.team, "New York Yankees");
        assert_eq!(record.position, "RF");
        assert_eq!(record.games, 148);

        let line = record.hitting().unwrap();
        assert_eq!(line.avg, ".322");
        assert_eq!(line.hr, 58.0);
        assert_eq!(line.sb, 10.0);
    }

    #[test]
    fn pitching_record_maps_split() {
        let player = json!({
            "id": 543037,
            "fullName": "Gerrit Cole",
            "primaryPosition": {"abbreviation": "P"},
            "currentTeam": {"name": "New York Yankees"}
        });
        let raw = json!({
            "gamesPlayed": 33,
            "wins": 15, "losses": 4,
            "era": "2.63", "whip": "0.98",
            "strikeOuts": 222, "inningsPitched": "209.0",
            "saves": 0, "holds": 0, "baseOnBalls": 41,
            "hits": 164, "homeRuns": 22
        });

        let record = season_record(&player, &raw, StatGroup::Pitching, SampleType::RegularSeason);
        let line = record.pitching().unwrap();
        assert_eq!(line.wins, 15.0);
        assert_eq!(line.era, "2.63");
        assert_eq!(line.whip, "0.98");
        assert_eq!(line.so, 222.0);
        assert_eq!(line.ip, "209.0");
    }

    #[test]
    fn missing_fields_default_to_neutral_values() {
        let record = season_record(
            &sample_player(),
            &json!({}),
            StatGroup::Hitting,
            SampleType::RegularSeason,
        );
        let line = record.hitting().unwrap();
        assert_eq!(line.avg, ".000");
        assert_eq!(line.hr, 0.0);
        assert_eq!(record.games, 0);

        let record = season_record(
            &sample_player(),
            &json!({}),
            StatGroup::Pitching,
            SampleType::RegularSeason,
        );
        let line = record.pitching().unwrap();
        assert_eq!(line.era, "0.00");
        assert_eq!(line.whip, "0.00");
    }

    #[test]
    fn first_split_navigates_stats_response() {
        let body = json!({
            "stats": [{"splits": [{"stat": {"homeRuns": 40}}]}]
        });
        assert_eq!(first_split(&body).unwrap()["homeRuns"], 40);

        // No splits yet (e.g. spring training has not started).
        let empty = json!({"stats": [{"splits": []}]});
        assert!(first_split(&empty).is_none());
        assert!(first_split(&json!({})).is_none());
    }

    #[test]
    fn pitcher_positions_select_pitching_group() {
        for pos in ["P", "SP", "RP", "CL"] {
            assert!(PITCHER_POSITIONS.contains(&pos));
        }
        assert!(!PITCHER_POSITIONS.contains(&"RF"));
    }
}
