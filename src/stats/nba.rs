// balldontlie.io client: NBA season averages and game logs.
//
// No API key required. The public tier allows 30 requests/minute, so the
// client self-throttles to one request per 2.1 s and backs off for 60 s when
// the API returns 429, treating that attempt as failed. All failures degrade
// to `None`/empty; nothing here returns an error to callers.

use serde_json::Value;
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

use crate::config::ProviderEndpoint;
use crate::stats::extract::{num, text};
use crate::stats::rate_limit::RateLimiter;
use crate::stats::record::{BasketballLine, GameLogEntry, PlayerStatRecord, SampleType, StatLine};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const RATE_LIMIT_BACKOFF: Duration = Duration::from_secs(60);
const SEARCH_PAGE_SIZE: usize = 5;

/// Rate-limited balldontlie API client.
pub struct BdlClient {
    http: reqwest::Client,
    base_url: String,
    limiter: RateLimiter,
}

impl BdlClient {
    pub fn new(endpoint: &ProviderEndpoint) -> Self {
        BdlClient {
            http: reqwest::Client::new(),
            base_url: endpoint.base_url.trim_end_matches('/').to_string(),
            limiter: RateLimiter::new(Duration::from_millis(endpoint.min_interval_ms)),
        }
    }

    /// Issue a throttled GET. Any transport error, rate-limit rejection, or
    /// non-success status yields `None`.
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
                warn!("balldontlie request failed: {e}");
                return None;
            }
        };
        self.limiter.mark().await;

        let status = response.status();
        if status.as_u16() == 429 {
            warn!("balldontlie rate limit hit, backing off {}s", RATE_LIMIT_BACKOFF.as_secs());
            sleep(RATE_LIMIT_BACKOFF).await;
            return None;
        }
        if !status.is_success() {
            warn!("balldontlie {path} returned {status}");
            return None;
        }

        match response.json::<Value>().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!("balldontlie {path} returned malformed JSON: {e}");
                None
            }
        }
    }

    /// Search for a player by name. Prefers a case-insensitive exact match on
    /// the full name, otherwise takes the provider's first candidate.
    async fn find_player(&self, player_name: &str) -> Option<Value> {
        let body = self
            .request(
                "players",
                &[
                    ("search", player_name.to_string()),
                    ("per_page", SEARCH_PAGE_SIZE.to_string()),
                ],
            )
            .await?;

        let candidates = body.get("data")?.as_array()?;
        if candidates.is_empty() {
            return None;
        }

        let wanted = player_name.to_lowercase();
        for candidate in candidates {
            if full_name(candidate).to_lowercase() == wanted {
                return Some(candidate.clone());
            }
        }
        // Best guess.
        Some(candidates[0].clone())
    }

    /// Fetch a player's season averages as a normalized record. Falls back to
    /// the previous season when the requested season has no rows yet.
    pub async fn season_stats(&self, player_name: &str, season: i32) -> Option<PlayerStatRecord> {
        let player = match self.find_player(player_name).await {
            Some(p) => p,
            None => {
                info!("NBA player not found: {player_name}");
                return None;
            }
        };
        let player_id = player.get("id").and_then(Value::as_i64)?;

        let mut averages = self.season_averages(player_id, season).await;
        if averages.is_none() {
            averages = self.season_averages(player_id, season - 1).await;
        }
        let averages = averages?;

        Some(season_record(&player, &averages))
    }

    async fn season_averages(&self, player_id: i64, season: i32) -> Option<Value> {
        let body = self
            .request(
                "season_averages",
                &[
                    ("season", season.to_string()),
                    ("player_ids[]", player_id.to_string()),
                ],
            )
            .await?;
        let rows = body.get("data")?.as_array()?;
        rows.first().cloned()
    }

    /// Fetch a player's most recent games, newest first.
    pub async fn game_log(&self, player_id: i64, last_n: usize) -> Vec<GameLogEntry> {
        let body = self
            .request(
                "stats",
                &[
                    ("player_ids[]", player_id.to_string()),
                    ("per_page", last_n.min(25).to_string()),
                    ("sort", "-game.date".to_string()),
                ],
            )
            .await;

        let Some(body) = body else {
            return Vec::new();
        };
        let Some(rows) = body.get("data").and_then(Value::as_array) else {
            return Vec::new();
        };

        let entries: Vec<GameLogEntry> = rows.iter().take(last_n).map(log_entry).collect();
        debug!(player_id, games = entries.len(), "fetched NBA game log");
        entries
    }
}

// ---------------------------------------------------------------------------
// Payload adapters
// ---------------------------------------------------------------------------

fn full_name(player: &Value) -> String {
    format!(
        "{} {}",
        text(player, &["first_name"], ""),
        text(player, &["last_name"], "")
    )
    .trim()
    .to_string()
}

/// Map a balldontlie player object plus one season-averages row into the
/// canonical record shape.
fn season_record(player: &Value, averages: &Value) -> PlayerStatRecord {
    let team = player.get("team").cloned().unwrap_or(Value::Null);
    let abbreviation = text(&team, &["abbreviation"], "");
    let team_name = if abbreviation.is_empty() {
        text(&team, &["full_name"], "")
    } else {
        abbreviation
    };

    PlayerStatRecord {
        player_id: player.get("id").and_then(Value::as_i64),
        name: full_name(player),
        team: team_name,
        position: text(player, &["position"], ""),
        games: num(averages, &["games_played"]) as u32,
        sample: SampleType::RegularSeason,
        line: StatLine::Basketball(BasketballLine {
            pts: num(averages, &["pts"]),
            reb: num(averages, &["reb"]),
            ast: num(averages, &["ast"]),
            stl: num(averages, &["stl"]),
            blk: num(averages, &["blk"]),
            tov: num(averages, &["turnover", "tov"]),
            fg3m: num(averages, &["fg3m"]),
            fg_pct: num(averages, &["fg_pct"]),
            ft_pct: num(averages, &["ft_pct"]),
            fg3_pct: num(averages, &["fg3_pct"]),
            min: text(averages, &["min"], "0"),
        }),
        spring: None,
    }
}

/// Map one row of the stats endpoint into a game-log entry. The home/away
/// flag compares the player's team id against the game's home team id.
fn log_entry(stat: &Value) -> GameLogEntry {
    let game = stat.get("game").cloned().unwrap_or(Value::Null);
    let team = stat.get("team").cloned().unwrap_or(Value::Null);

    let team_id = team.get("id").and_then(Value::as_i64);
    let home_id = game.get("home_team_id").and_then(Value::as_i64);
    let is_home = team_id.is_some() && team_id == home_id;

    GameLogEntry {
        date: text(&game, &["date"], ""),
        pts: num(stat, &["pts"]),
        reb: num(stat, &["reb"]),
        ast: num(stat, &["ast"]),
        stl: num(stat, &["stl"]),
        blk: num(stat, &["blk"]),
        tov: num(stat, &["turnover", "tov"]),
        fg_pct: num(stat, &["fg_pct"]),
        min: text(stat, &["min"], "0"),
        is_home,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
