/// Weekly slate wire types — serde shapes for the published JSON document.
/// These map to our clean domain types via the mapping fns in client.rs.
use serde::Deserialize;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WeekDocument {
    pub week: Option<u32>,
    /// RFC 3339, Eastern offset (the feed publishes all times in ET).
    pub as_of_date_et: Option<String>,
    pub games: Option<Vec<WireGame>>,
    /// Game IDs flagged for weather concerns.
    pub weather_watch: Option<Vec<String>>,
    pub dfs_player_pool: Option<WirePlayerPool>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireGame {
    /// "AWAY@HOME_<suffix>", e.g. "KC@BUF_2024W10".
    pub game_id: Option<String>,
    pub kickoff_et: Option<String>, // RFC 3339
    pub venue: Option<String>,
    pub is_dome: Option<bool>,
    pub weather: Option<WireWeather>,
    pub vegas: Option<WireVegas>,
    pub over_under_trends: Option<WireTrendSet>,
    pub injuries: Option<Vec<WireInjury>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireWeather {
    pub conditions: Option<String>,
    pub temp_f: Option<f64>,
    pub wind_mph_sustained: Option<f64>,
    pub precip_chance_pct: Option<f64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireVegas {
    pub spread: Option<String>,
    /// Leading numeric token, sometimes followed by text: "45.5 (opened 46)".
    pub total: Option<String>,
    pub implied_totals: Option<WireImpliedTotals>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireImpliedTotals {
    pub away: Option<f64>,
    pub home: Option<f64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireTrendSet {
    pub away_team: Option<WireTeamTrend>,
    pub home_team: Option<WireTeamTrend>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireTeamTrend {
    pub summary: Option<WireTrendSummary>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireTrendSummary {
    pub overs: Option<u32>,
    pub unders: Option<u32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireInjury {
    pub team: Option<String>,
    pub player: Option<String>,
    pub status: Option<String>, // "Questionable", "Out", ...
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WirePlayerPool {
    pub qb: Option<Vec<WirePlayer>>,
    pub rb: Option<Vec<WirePlayer>>,
    pub wr: Option<Vec<WirePlayer>>,
    pub te: Option<Vec<WirePlayer>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WirePlayer {
    pub name: Option<String>,
    pub team: Option<String>,
    pub dk_salary: Option<u32>,
    pub risk_tag: Option<String>, // "stud" | "cash" | "gpp" | "value" | "n/a"
    pub recent_role_note: Option<String>,
    pub matchup_note: Option<String>,
    pub projection_hint: Option<String>,
}
