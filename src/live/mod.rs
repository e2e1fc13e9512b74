// Live-game signal feed.
//
// A thin polling client for the live game-context service, used as a
// supplementary draft signal: players putting up notable numbers in games
// currently in progress get a small value bump on the board. The feed is
// strictly best-effort: a failed connection or poll degrades to "no live
// context" and never aborts a board build.

use std::collections::HashMap;

use serde_json::{json, Value};
use tokio::time::Duration;
use tracing::{debug, warn};

use crate::config::LiveConfig;
use crate::stats::extract::{as_entries, first, num, text};
use crate::stats::Sport;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const POLL_TIMEOUT: Duration = Duration::from_secs(45);
const CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Live-performance thresholds for flagging a player as hot.
const HOT_PTS: f64 = 20.0;
const HOT_REB: f64 = 10.0;
const HOT_AST: f64 = 8.0;

/// Game status strings that mean a game is currently in progress. Providers
/// are not consistent about which one they send.
const IN_PROGRESS: &[&str] = &["live", "in_progress", "active", "in progress"];

/// Keys under which a game event may carry its player performance lists.
const PLAYER_LIST_KEYS: &[&str] = &[
    "home_players",
    "away_players",
    "players",
    "home_stats",
    "away_stats",
];

// ---------------------------------------------------------------------------
// Hot players
// ---------------------------------------------------------------------------

/// A notable live performance, keyed by player name in the hot-player map.
#[derive(Debug, Clone)]
pub struct HotPlayer {
    pub pts: f64,
    pub reb: f64,
    pub ast: f64,
    /// Preformatted display note, e.g. "LIVE: 31pts/9reb/11ast tonight".
    pub note: String,
}

// ---------------------------------------------------------------------------
// LiveFeed
// ---------------------------------------------------------------------------

/// Polling connection to the live-signal service.
///
/// The poll cursor (`last_event_id`) advances monotonically so each poll only
/// requests events newer than the last one seen.
pub struct LiveFeed {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    connection_id: Option<String>,
    last_event_id: Option<String>,
}

impl LiveFeed {
    pub fn new(config: &LiveConfig, api_key: String) -> Self {
        LiveFeed {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            connection_id: None,
            last_event_id: None,
        }
    }

    /// Establish a filtered subscription for a sport. Returns false (and logs)
    /// on any failure; the caller proceeds without live context.
    pub async fn connect(&mut self, sport: Sport) -> bool {
        let filter = match sport {
            Sport::Nba => {
                "Track all NBA games today including scores, play-by-play, and player performance"
            }
            Sport::Mlb => {
                "Track all MLB games today including scores, play-by-play, and pitching changes"
            }
        };

        let url = format!("{}/connections/create", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&json!({ "filter_instructions": filter }))
            .timeout(CONNECT_TIMEOUT)
            .send()
            .await;

        let body = match response {
            Ok(r) if r.status().is_success() => match r.json::<Value>().await {
                Ok(body) => body,
                Err(e) => {
                    warn!("live feed returned malformed JSON on connect: {e}");
                    return false;
                }
            },
            Ok(r) => {
                warn!("live feed connect returned {}", r.status());
                return false;
            }
            Err(e) => {
                warn!("failed to create live feed connection: {e}");
                return false;
            }
        };

        let id = text(&body, &["connection_id", "id"], "");
        if id.is_empty() {
            warn!("live feed connect response carried no connection id");
            return false;
        }
        debug!(connection_id = %id, "live feed connected");
        self.connection_id = Some(id);
        true
    }

    /// Poll for events newer than the cursor. Advances the cursor past the
    /// last event returned. Any failure yields an empty list.
    pub async fn poll_events(&mut self) -> Vec<Value> {
        let Some(connection_id) = self.connection_id.clone() else {
            return Vec::new();
        };

        let mut payload = json!({});
        if let Some(cursor) = &self.last_event_id {
            payload["since_event_id"] = Value::String(cursor.clone());
        }

        let url = format!("{}/connections/{}", self.base_url, connection_id);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .timeout(POLL_TIMEOUT)
            .send()
            .await;

        let body = match response {
            Ok(r) if r.status().is_success() => match r.json::<Value>().await {
                Ok(body) => body,
                Err(e) => {
                    warn!("live feed poll returned malformed JSON: {e}");
                    return Vec::new();
                }
            },
            Ok(r) => {
                warn!("live feed poll returned {}", r.status());
                return Vec::new();
            }
            Err(e) => {
                warn!("failed to poll live feed: {e}");
                return Vec::new();
            }
        };

        let events: Vec<Value> = first(&body, &["data", "events"])
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        if let Some(last) = events.last() {
            let cursor = text(last, &["id", "event_id"], "");
            if !cursor.is_empty() {
                self.last_event_id = Some(cursor);
            }
        }

        events
    }

    /// Release the subscription. Failures are ignored; the server reaps idle
    /// connections anyway.
    pub async fn close(&mut self) {
        if let Some(connection_id) = self.connection_id.take() {
            let url = format!("{}/connections/{}/close", self.base_url, connection_id);
            let _ = self
                .http
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&json!({}))
                .timeout(CLOSE_TIMEOUT)
                .send()
                .await;
        }
    }
}

// ---------------------------------------------------------------------------
// Hot-player extraction
// ---------------------------------------------------------------------------

/// Scan live game events for players performing above the hot thresholds in
/// games currently in progress.
///
/// Returns a map keyed by player name. Matching against the draft pool is by
/// exact name string, which is brittle under nickname/suffix variation, a
/// known limitation of the live signal.
pub fn extract_hot_players(events: &[Value]) -> HashMap<String, HotPlayer> {
    let mut hot = HashMap::new();

    for game in events {
        let status = text(game, &["status"], "").to_lowercase();
        if !IN_PROGRESS.contains(&status.as_str()) {
            continue;
        }

        for key in PLAYER_LIST_KEYS {
            let Some(list) = game.get(key) else {
                continue;
            };
            for player in as_entries(list) {
                if !player.is_object() {
                    continue;
                }
                let name = text(player, &["name", "player_name", "fullName"], "");
                if name.is_empty() {
                    continue;
                }

                let pts = num(player, &["points", "pts"]);
                let reb = num(player, &["rebounds", "reb"]);
                let ast = num(player, &["assists", "ast"]);

                if pts >= HOT_PTS || reb >= HOT_REB || ast >= HOT_AST {
                    hot.insert(
                        name,
                        HotPlayer {
                            pts,
                            reb,
                            ast,
                            note: format!("LIVE: {pts:.0}pts/{reb:.0}reb/{ast:.0}ast tonight"),
                        },
                    );
                }
            }
        }
    }

    hot
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flags_players_over_any_threshold_in_live_games() {
        let events = vec![json!({
            "status": "in_progress",
            "home_players": [
                {"name": "Big Scorer", "points": 27, "rebounds": 4, "assists": 3},
                {"name": "Glass Cleaner", "points": 8, "rebounds": 12, "assists": 1},
                {"name": "Floor General", "points": 10, "rebounds": 2, "assists": 9},
                {"name": "Role Player", "points": 6, "rebounds": 3, "assists": 2}
            ]
        })];

        let hot = extract_hot_players(&events);
        assert_eq!(hot.len(), 3);
        assert!(hot.contains_key("Big Scorer"));
        assert!(hot.contains_key("Glass Cleaner"));
        assert!(hot.contains_key("Floor General"));
        assert!(!hot.contains_key("Role Player"));

        let note = &hot["Big Scorer"].note;
        assert_eq!(note, "LIVE: 27pts/4reb/3ast tonight");
    }

    #[test]
    fn finished_games_are_ignored() {
        let events = vec![json!({
            "status": "final",
            "players": [{"name": "Done Player", "points": 40}]
        })];
        assert!(extract_hot_players(&events).is_empty());
    }

    #[test]
    fn tolerates_keyed_player_maps_and_alias_fields() {
        let events = vec![json!({
            "status": "live",
            "away_stats": {
                "201939": {"player_name": "Alias Guard", "pts": 25, "reb": 3, "ast": 4}
            }
        })];

        let hot = extract_hot_players(&events);
        assert_eq!(hot.len(), 1);
        assert_eq!(hot["Alias Guard"].pts, 25.0);
    }

    #[test]
    fn skips_nameless_and_non_object_entries() {
        let events = vec![json!({
            "status": "active",
            "players": [
                {"points": 30},
                "not an object",
                {"fullName": "Named Star", "points": "22"}
            ]
        })];

        let hot = extract_hot_players(&events);
        assert_eq!(hot.len(), 1);
        assert!(hot.contains_key("Named Star"));
    }

    #[test]
    fn malformed_stat_values_fail_thresholds() {
        let events = vec![json!({
            "status": "live",
            "players": [{"name": "Bad Data", "points": "??", "rebounds": null}]
        })];
        assert!(extract_hot_players(&events).is_empty());
    }
}
