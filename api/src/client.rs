use crate::wire::{
    WeekDocument, WireGame, WireInjury, WirePlayer, WirePlayerPool, WireTrendSet,
};
use crate::{
    Game, Injury, Player, PlayerPool, RiskTag, SlateSnapshot, TrendSet, TrendSummary, VegasLine,
    Weather,
};
use chrono::{DateTime, FixedOffset};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const FALLBACK_WEEK_JSON: &str = include_str!("../../data/week10.json");

/// Slate feed client. The document is a single static JSON file, so there is
/// exactly one fetch per load; derivations run off the returned snapshot.
#[derive(Debug, Clone)]
pub struct SlateApi {
    client: Client,
    timeout: Duration,
}

impl Default for SlateApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("nfltui/0.1 (terminal slate viewer)")
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl SlateApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch and map the weekly slate document.
    ///
    /// Source chain:
    /// 1) `NFLTUI_SLATE_JSON` env var — load from a local JSON file.
    /// 2) `NFLTUI_SLATE_URL` env var — HTTP GET the published document.
    /// 3) Embedded week 10 sample — offline fallback.
    pub async fn fetch_slate(&self) -> ApiResult<SlateSnapshot> {
        if let Ok(path) = std::env::var("NFLTUI_SLATE_JSON")
            && !path.trim().is_empty()
        {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| ApiError::NotFound(format!("could not read {path}: {e}")))?;
            let raw: WeekDocument = serde_json::from_str(&content)
                .map_err(|e| ApiError::NotFound(format!("invalid slate json at {path}: {e}")))?;
            return Ok(map_week(raw));
        }

        if let Ok(url) = std::env::var("NFLTUI_SLATE_URL")
            && !url.trim().is_empty()
        {
            return self.fetch_slate_from_url(&url).await;
        }

        let raw: WeekDocument = serde_json::from_str(FALLBACK_WEEK_JSON)
            .map_err(|e| ApiError::NotFound(format!("invalid embedded week json: {e}")))?;
        Ok(map_week(raw))
    }

    pub async fn fetch_slate_from_url(&self, url: &str) -> ApiResult<SlateSnapshot> {
        let raw: WeekDocument = self.get(url).await?;
        Ok(map_week(raw))
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.to_owned()))?;

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Mapping: wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_week(raw: WeekDocument) -> SlateSnapshot {
    SlateSnapshot {
        week: raw.week.unwrap_or_default(),
        as_of: raw.as_of_date_et.as_deref().and_then(parse_feed_time),
        games: raw
            .games
            .unwrap_or_default()
            .into_iter()
            .map(map_game)
            .collect(),
        weather_watch: raw.weather_watch.unwrap_or_default(),
        player_pool: map_pool(raw.dfs_player_pool.unwrap_or_default()),
    }
}

fn parse_feed_time(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).ok()
}

fn map_game(g: WireGame) -> Game {
    Game {
        game_id: g.game_id.unwrap_or_default(),
        kickoff: g.kickoff_et.as_deref().and_then(parse_feed_time),
        venue: g.venue.unwrap_or_default(),
        is_dome: g.is_dome.unwrap_or(false),
        weather: g.weather.map(|w| Weather {
            conditions: w.conditions.unwrap_or_default(),
            temp_f: w.temp_f.unwrap_or_default(),
            wind_mph_sustained: w.wind_mph_sustained.unwrap_or_default(),
            precip_chance_pct: w.precip_chance_pct.unwrap_or_default(),
        }),
        vegas: g.vegas.map(|v| {
            let implied = v.implied_totals.unwrap_or_default();
            VegasLine {
                spread: v.spread.unwrap_or_default(),
                total: v.total.unwrap_or_default(),
                implied_away: implied.away.unwrap_or_default(),
                implied_home: implied.home.unwrap_or_default(),
            }
        }),
        trends: g.over_under_trends.map(map_trends),
        injuries: g
            .injuries
            .unwrap_or_default()
            .into_iter()
            .map(map_injury)
            .collect(),
    }
}

fn map_trends(t: WireTrendSet) -> TrendSet {
    let summary = |side: Option<crate::wire::WireTeamTrend>| {
        let s = side.and_then(|t| t.summary).unwrap_or_default();
        TrendSummary {
            overs: s.overs.unwrap_or_default(),
            unders: s.unders.unwrap_or_default(),
        }
    };
    TrendSet {
        away: summary(t.away_team),
        home: summary(t.home_team),
    }
}

fn map_injury(i: WireInjury) -> Injury {
    Injury {
        team: i.team.unwrap_or_default(),
        player: i.player.unwrap_or_default(),
        status: i.status.unwrap_or_default(),
        note: i.note.unwrap_or_default(),
    }
}

fn map_pool(pool: WirePlayerPool) -> PlayerPool {
    let bucket = |players: Option<Vec<WirePlayer>>| {
        players
            .unwrap_or_default()
            .into_iter()
            .map(map_player)
            .collect()
    };
    PlayerPool {
        qb: bucket(pool.qb),
        rb: bucket(pool.rb),
        wr: bucket(pool.wr),
        te: bucket(pool.te),
    }
}

fn map_player(p: WirePlayer) -> Player {
    Player {
        name: p.name.unwrap_or_default(),
        team: p.team.unwrap_or_default(),
        dk_salary: p.dk_salary,
        risk_tag: RiskTag::parse(p.risk_tag.as_deref()),
        recent_role_note: p.recent_role_note,
        matchup_note: p.matchup_note,
        projection_hint: p.projection_hint,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WeatherImpact;

    fn load_embedded_snapshot() -> SlateSnapshot {
        let raw: WeekDocument =
            serde_json::from_str(FALLBACK_WEEK_JSON).expect("embedded week json should parse");
        map_week(raw)
    }

    #[test]
    fn embedded_fallback_week_parses() {
        let snapshot = load_embedded_snapshot();
        assert_eq!(snapshot.week, 10);
        assert!(!snapshot.games.is_empty());
        assert!(!snapshot.player_pool.is_empty());
        assert_eq!(snapshot.weather_watch.len(), 2);
    }

    #[test]
    fn embedded_fallback_derivations_line_up() {
        let snapshot = load_embedded_snapshot();

        let windy = snapshot.game("PIT@WSH_2024W10").expect("windy game present");
        assert_eq!(windy.weather_impact(), WeatherImpact::High);
        assert_eq!(windy.over_percentage(), 50);

        let dome = snapshot.game("NYJ@ARI_2024W10").expect("dome game present");
        assert!(dome.is_dome);
        assert_eq!(dome.weather_impact(), WeatherImpact::None);

        // "TBD" total is excluded from the slate average.
        let stats = snapshot.summary_stats();
        assert_eq!(stats.total_games, 4);
        assert!((stats.avg_over_under - 46.166).abs() < 0.001);
    }

    #[test]
    fn map_game_defaults_missing_fields() {
        let game = map_game(WireGame {
            game_id: Some("KC@BUF_2024W10".into()),
            ..WireGame::default()
        });
        assert_eq!(game.game_id, "KC@BUF_2024W10");
        assert!(game.kickoff.is_none());
        assert!(!game.is_dome);
        assert!(game.weather.is_none());
        assert!(game.vegas.is_none());
        assert!(game.trends.is_none());
        assert!(game.injuries.is_empty());
        assert_eq!(game.kickoff_label(), "TBD");
    }

    #[test]
    fn map_trends_fills_missing_sides_with_zero_counts() {
        let trends = map_trends(WireTrendSet {
            away_team: Some(crate::wire::WireTeamTrend {
                summary: Some(crate::wire::WireTrendSummary {
                    overs: Some(3),
                    unders: Some(2),
                }),
            }),
            home_team: None,
        });
        assert_eq!(trends.away.overs, 3);
        assert_eq!(trends.home.overs, 0);
        assert_eq!(trends.home.unders, 0);
    }

    #[test]
    fn map_player_parses_risk_tag() {
        let player = map_player(WirePlayer {
            name: Some("Josh Allen".into()),
            risk_tag: Some("STUD".into()),
            ..WirePlayer::default()
        });
        assert_eq!(player.risk_tag, RiskTag::Stud);
        assert!(player.dk_salary.is_none());
    }

    #[tokio::test]
    async fn fetch_from_url_maps_document() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/week10-data.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(FALLBACK_WEEK_JSON)
            .create_async()
            .await;

        let api = SlateApi::new();
        let url = format!("{}/week10-data.json", server.url());
        let snapshot = api.fetch_slate_from_url(&url).await.expect("fetch should succeed");

        assert_eq!(snapshot.week, 10);
        assert_eq!(snapshot.games.len(), 4);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_from_url_surfaces_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/week10-data.json")
            .with_status(500)
            .create_async()
            .await;

        let api = SlateApi::new();
        let url = format!("{}/week10-data.json", server.url());
        let err = api.fetch_slate_from_url(&url).await.expect_err("500 must fail");
        assert!(matches!(err, ApiError::Api(..)), "got: {err}");
    }

    #[tokio::test]
    async fn fetch_from_url_rejects_malformed_payload() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/week10-data.json")
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let api = SlateApi::new();
        let url = format!("{}/week10-data.json", server.url());
        let err = api.fetch_slate_from_url(&url).await.expect_err("bad body must fail");
        assert!(matches!(err, ApiError::Parsing(..)), "got: {err}");
    }
}
