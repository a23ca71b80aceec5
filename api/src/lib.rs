pub mod client;
pub mod wire;

use chrono::{DateTime, FixedOffset};

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the feed's wire format
// ---------------------------------------------------------------------------

/// The weekly slate document. Loaded once per session, then only read.
#[derive(Debug, Clone, Default)]
pub struct SlateSnapshot {
    pub week: u32,
    pub as_of: Option<DateTime<FixedOffset>>,
    pub games: Vec<Game>,
    /// Game IDs the feed flags for weather concerns.
    pub weather_watch: Vec<String>,
    pub player_pool: PlayerPool,
}

impl SlateSnapshot {
    /// Find a game by its "AWAY@HOME_<suffix>" ID.
    pub fn game(&self, game_id: &str) -> Option<&Game> {
        self.games.iter().find(|g| g.game_id == game_id)
    }

    pub fn players(&self, position: Position) -> &[Player] {
        self.player_pool.bucket(position)
    }

    /// Flatten the pool in QB, RB, WR, TE order, tagging each entry with its
    /// position. Bucket-internal order is preserved.
    pub fn all_players(&self) -> Vec<(Position, &Player)> {
        let mut all = Vec::with_capacity(self.player_pool.len());
        for position in Position::ALL {
            for player in self.player_pool.bucket(position) {
                all.push((position, player));
            }
        }
        all
    }

    pub fn injuries_for(&self, game_id: &str) -> &[Injury] {
        self.game(game_id).map(|g| g.injuries.as_slice()).unwrap_or(&[])
    }

    pub fn trends_for(&self, game_id: &str) -> Option<&TrendSet> {
        self.game(game_id)?.trends.as_ref()
    }

    /// Slate-wide aggregates for the dashboard header cards. The over/under
    /// average only counts games whose posted total parses to a number.
    pub fn summary_stats(&self) -> SummaryStats {
        let mut total_sum = 0.0;
        let mut total_count = 0u32;
        for game in &self.games {
            if let Some(total) = game.vegas.as_ref().and_then(VegasLine::leading_total) {
                total_sum += total;
                total_count += 1;
            }
        }
        let avg_over_under = if total_count > 0 {
            total_sum / f64::from(total_count)
        } else {
            0.0
        };
        SummaryStats {
            total_games: self.games.len(),
            weather_alerts: self.weather_watch.len(),
            avg_over_under,
            week: self.week,
        }
    }
}

/// DFS player pool, one bucket per position. A closed set of keys rather
/// than a string-keyed map so an unknown position cannot exist.
#[derive(Debug, Clone, Default)]
pub struct PlayerPool {
    pub qb: Vec<Player>,
    pub rb: Vec<Player>,
    pub wr: Vec<Player>,
    pub te: Vec<Player>,
}

impl PlayerPool {
    pub fn bucket(&self, position: Position) -> &[Player] {
        match position {
            Position::Qb => &self.qb,
            Position::Rb => &self.rb,
            Position::Wr => &self.wr,
            Position::Te => &self.te,
        }
    }

    pub fn len(&self) -> usize {
        self.qb.len() + self.rb.len() + self.wr.len() + self.te.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct Game {
    pub game_id: String,
    pub kickoff: Option<DateTime<FixedOffset>>,
    pub venue: String,
    pub is_dome: bool,
    pub weather: Option<Weather>,
    pub vegas: Option<VegasLine>,
    pub trends: Option<TrendSet>,
    pub injuries: Vec<Injury>,
}

impl Game {
    pub fn matchup(&self) -> Option<Matchup> {
        Matchup::parse(&self.game_id)
    }

    pub fn weather_impact(&self) -> WeatherImpact {
        weather_impact(self.weather.as_ref())
    }

    pub fn over_percentage(&self) -> u8 {
        over_percentage(self.trends.as_ref())
    }

    pub fn kickoff_label(&self) -> String {
        self.kickoff.map(format_kickoff).unwrap_or_else(|| "TBD".to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Weather {
    pub conditions: String,
    pub temp_f: f64,
    pub wind_mph_sustained: f64,
    pub precip_chance_pct: f64,
}

#[derive(Debug, Clone, Default)]
pub struct VegasLine {
    pub spread: String, // "BUF -2.5"
    pub total: String,  // "45.5" or "45.5 (opened 46)"
    pub implied_away: f64,
    pub implied_home: f64,
}

impl VegasLine {
    /// The posted total's leading numeric value, if any. The feed sometimes
    /// glues a unit onto the number ("45.5pts"), so parse the longest numeric
    /// prefix of the first token rather than the whole token.
    pub fn leading_total(&self) -> Option<f64> {
        let token = self.total.split_whitespace().next()?;
        let mut end = 0;
        let mut seen_dot = false;
        for (idx, ch) in token.char_indices() {
            match ch {
                '0'..='9' => {}
                '.' if !seen_dot => seen_dot = true,
                '+' | '-' if idx == 0 => {}
                _ => break,
            }
            end = idx + 1;
        }
        token.get(..end)?.parse().ok()
    }
}

/// Recent over/under outcomes for both sides of a game.
#[derive(Debug, Clone, Default)]
pub struct TrendSet {
    pub away: TrendSummary,
    pub home: TrendSummary,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TrendSummary {
    pub overs: u32,
    pub unders: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Injury {
    pub team: String,
    pub player: String,
    pub status: String,
    pub note: String,
}

#[derive(Debug, Clone, Default)]
pub struct Player {
    pub name: String,
    pub team: String,
    pub dk_salary: Option<u32>,
    pub risk_tag: RiskTag,
    pub recent_role_note: Option<String>,
    pub matchup_note: Option<String>,
    pub projection_hint: Option<String>,
}

/// Away/home pair parsed out of a game ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matchup {
    pub away: String,
    pub home: String,
}

impl Matchup {
    /// Parse "AWAY@HOME_<suffix>": everything before the first `_`, split on
    /// `@`. A missing separator yields None rather than empty team strings.
    pub fn parse(game_id: &str) -> Option<Matchup> {
        let head = game_id.split('_').next().unwrap_or(game_id);
        let (away, home) = head.split_once('@')?;
        if away.is_empty() || home.is_empty() {
            return None;
        }
        Some(Matchup { away: away.to_string(), home: home.to_string() })
    }
}

// ---------------------------------------------------------------------------
// Closed enumerations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Position {
    #[default]
    Qb,
    Rb,
    Wr,
    Te,
}

impl Position {
    pub const ALL: [Position; 4] = [Position::Qb, Position::Rb, Position::Wr, Position::Te];

    pub fn label(&self) -> &'static str {
        match self {
            Position::Qb => "QB",
            Position::Rb => "RB",
            Position::Wr => "WR",
            Position::Te => "TE",
        }
    }

    /// Case-insensitive; unknown positions do not exist in the pool.
    pub fn parse(s: &str) -> Option<Position> {
        match s.to_ascii_lowercase().as_str() {
            "qb" => Some(Position::Qb),
            "rb" => Some(Position::Rb),
            "wr" => Some(Position::Wr),
            "te" => Some(Position::Te),
            _ => None,
        }
    }

    pub fn next(self) -> Position {
        match self {
            Position::Qb => Position::Rb,
            Position::Rb => Position::Wr,
            Position::Wr => Position::Te,
            Position::Te => Position::Qb,
        }
    }

    pub fn prev(self) -> Position {
        match self {
            Position::Qb => Position::Te,
            Position::Rb => Position::Qb,
            Position::Wr => Position::Rb,
            Position::Te => Position::Wr,
        }
    }
}

/// Projection-confidence label on a DFS player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RiskTag {
    Stud,
    Cash,
    Gpp,
    Value,
    #[default]
    NotAvailable,
}

impl RiskTag {
    pub const ALL: [RiskTag; 5] = [
        RiskTag::Stud,
        RiskTag::Cash,
        RiskTag::Gpp,
        RiskTag::Value,
        RiskTag::NotAvailable,
    ];

    /// Case-insensitive; absent or unrecognized tags fall back to N/A.
    pub fn parse(tag: Option<&str>) -> RiskTag {
        match tag.map(str::to_ascii_lowercase).as_deref() {
            Some("stud") => RiskTag::Stud,
            Some("cash") => RiskTag::Cash,
            Some("gpp") => RiskTag::Gpp,
            Some("value") => RiskTag::Value,
            _ => RiskTag::NotAvailable,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskTag::Stud => "Stud",
            RiskTag::Cash => "Cash",
            RiskTag::Gpp => "GPP",
            RiskTag::Value => "Value",
            RiskTag::NotAvailable => "N/A",
        }
    }
}

/// Weather severity tier for a game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum WeatherImpact {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl WeatherImpact {
    pub fn label(&self) -> &'static str {
        match self {
            WeatherImpact::None => "none",
            WeatherImpact::Low => "low",
            WeatherImpact::Medium => "medium",
            WeatherImpact::High => "high",
        }
    }
}

/// Icon bucket for a free-text conditions string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WeatherIcon {
    Rain,
    Snow,
    Thunder,
    #[default]
    Cloud,
    Clear,
}

impl WeatherIcon {
    /// Case-insensitive substring match, first keyword wins.
    pub fn for_conditions(conditions: &str) -> WeatherIcon {
        let lower = conditions.to_lowercase();
        if lower.contains("rain") {
            WeatherIcon::Rain
        } else if lower.contains("snow") {
            WeatherIcon::Snow
        } else if lower.contains("thunder") {
            WeatherIcon::Thunder
        } else if lower.contains("cloud") {
            WeatherIcon::Cloud
        } else if lower.contains("clear") || lower.contains("sunny") {
            WeatherIcon::Clear
        } else {
            WeatherIcon::Cloud
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            WeatherIcon::Rain => "🌧",
            WeatherIcon::Snow => "❄",
            WeatherIcon::Thunder => "⛈",
            WeatherIcon::Cloud => "☁",
            WeatherIcon::Clear => "☀",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SummaryStats {
    pub total_games: usize,
    pub weather_alerts: usize,
    pub avg_over_under: f64,
    pub week: u32,
}

// ---------------------------------------------------------------------------
// Derivations
// ---------------------------------------------------------------------------

/// Classify weather severity. Thresholds apply in fixed priority order:
/// high beats medium beats low, and a missing report is None.
pub fn weather_impact(weather: Option<&Weather>) -> WeatherImpact {
    let Some(w) = weather else {
        return WeatherImpact::None;
    };
    if w.precip_chance_pct > 60.0 || w.wind_mph_sustained > 20.0 || w.temp_f < 32.0 {
        WeatherImpact::High
    } else if w.precip_chance_pct > 30.0 || w.wind_mph_sustained > 15.0 || w.temp_f < 40.0 {
        WeatherImpact::Medium
    } else {
        WeatherImpact::Low
    }
}

/// Share of both teams' recent over/under outcomes that went over, rounded
/// to the nearest integer percent. 0 when trends are absent or empty.
pub fn over_percentage(trends: Option<&TrendSet>) -> u8 {
    let Some(trends) = trends else {
        return 0;
    };
    let overs = trends.away.overs + trends.home.overs;
    let decided = overs + trends.away.unders + trends.home.unders;
    if decided == 0 {
        return 0;
    }
    ((f64::from(overs) / f64::from(decided)) * 100.0).round() as u8
}

/// "$8,200"-style currency string; missing or zero salaries render "N/A".
pub fn format_salary(salary: Option<u32>) -> String {
    match salary {
        None | Some(0) => "N/A".to_string(),
        Some(amount) => format!("${}", group_thousands(amount)),
    }
}

fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// "Sun Nov 10, 1:00 PM ET". Feed timestamps carry the Eastern offset, so
/// the zone label is a constant.
pub fn format_kickoff(kickoff: DateTime<FixedOffset>) -> String {
    kickoff.format("%a %b %-d, %-I:%M %p ET").to_string()
}

/// Header variant: "Nov 10, 2024 9:30 AM ET".
pub fn format_as_of(as_of: DateTime<FixedOffset>) -> String {
    as_of.format("%b %-d, %Y %-I:%M %p ET").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather(temp_f: f64, wind: f64, precip: f64) -> Weather {
        Weather {
            conditions: String::new(),
            temp_f,
            wind_mph_sustained: wind,
            precip_chance_pct: precip,
        }
    }

    #[test]
    fn weather_impact_missing_report_is_none() {
        assert_eq!(weather_impact(None), WeatherImpact::None);
    }

    #[test]
    fn weather_impact_high_thresholds() {
        assert_eq!(weather_impact(Some(&weather(70.0, 5.0, 61.0))), WeatherImpact::High);
        assert_eq!(weather_impact(Some(&weather(70.0, 21.0, 0.0))), WeatherImpact::High);
        assert_eq!(weather_impact(Some(&weather(31.0, 0.0, 0.0))), WeatherImpact::High);
    }

    #[test]
    fn weather_impact_medium_thresholds() {
        assert_eq!(weather_impact(Some(&weather(70.0, 5.0, 31.0))), WeatherImpact::Medium);
        assert_eq!(weather_impact(Some(&weather(70.0, 16.0, 0.0))), WeatherImpact::Medium);
        assert_eq!(weather_impact(Some(&weather(39.0, 0.0, 0.0))), WeatherImpact::Medium);
    }

    #[test]
    fn weather_impact_high_wins_over_medium() {
        // Freezing and windy: both tiers match, high takes priority.
        assert_eq!(weather_impact(Some(&weather(20.0, 16.0, 35.0))), WeatherImpact::High);
    }

    #[test]
    fn weather_impact_mild_day_is_low() {
        assert_eq!(weather_impact(Some(&weather(72.0, 4.0, 10.0))), WeatherImpact::Low);
    }

    #[test]
    fn over_percentage_absent_trends_is_zero() {
        assert_eq!(over_percentage(None), 0);
    }

    #[test]
    fn over_percentage_combines_both_teams() {
        let trends = TrendSet {
            away: TrendSummary { overs: 3, unders: 2 },
            home: TrendSummary { overs: 1, unders: 4 },
        };
        // 4 overs out of 10 decided games.
        assert_eq!(over_percentage(Some(&trends)), 40);
    }

    #[test]
    fn over_percentage_zero_denominator_is_zero() {
        let trends = TrendSet::default();
        assert_eq!(over_percentage(Some(&trends)), 0);
    }

    #[test]
    fn over_percentage_rounds_to_nearest() {
        let trends = TrendSet {
            away: TrendSummary { overs: 1, unders: 1 },
            home: TrendSummary { overs: 1, unders: 0 },
        };
        // 2/3 → 66.67 → 67.
        assert_eq!(over_percentage(Some(&trends)), 67);
    }

    #[test]
    fn matchup_parses_away_and_home() {
        let m = Matchup::parse("KC@BUF_2024W10").unwrap();
        assert_eq!(m.away, "KC");
        assert_eq!(m.home, "BUF");
    }

    #[test]
    fn matchup_without_suffix_still_parses() {
        let m = Matchup::parse("NYJ@ARI").unwrap();
        assert_eq!(m.away, "NYJ");
        assert_eq!(m.home, "ARI");
    }

    #[test]
    fn matchup_malformed_ids_are_none() {
        assert!(Matchup::parse("KCBUF_2024W10").is_none());
        assert!(Matchup::parse("@BUF_2024W10").is_none());
        assert!(Matchup::parse("").is_none());
    }

    #[test]
    fn salary_formats_with_grouping() {
        assert_eq!(format_salary(Some(8200)), "$8,200");
        assert_eq!(format_salary(Some(12400)), "$12,400");
        assert_eq!(format_salary(Some(900)), "$900");
        assert_eq!(format_salary(Some(1_234_567)), "$1,234,567");
    }

    #[test]
    fn salary_missing_or_zero_is_na() {
        assert_eq!(format_salary(None), "N/A");
        assert_eq!(format_salary(Some(0)), "N/A");
    }

    #[test]
    fn risk_tag_parse_is_case_insensitive() {
        assert_eq!(RiskTag::parse(Some("STUD")), RiskTag::Stud);
        assert_eq!(RiskTag::parse(Some("stud")), RiskTag::Stud);
        assert_eq!(RiskTag::parse(Some("Gpp")), RiskTag::Gpp);
        assert_eq!(RiskTag::parse(Some("n/a")), RiskTag::NotAvailable);
    }

    #[test]
    fn risk_tag_unknown_or_absent_is_default() {
        assert_eq!(RiskTag::parse(None), RiskTag::NotAvailable);
        assert_eq!(RiskTag::parse(Some("elite")), RiskTag::NotAvailable);
    }

    #[test]
    fn position_parse_is_case_insensitive_and_closed() {
        assert_eq!(Position::parse("qb"), Some(Position::Qb));
        assert_eq!(Position::parse("TE"), Some(Position::Te));
        assert_eq!(Position::parse("k"), None);
    }

    #[test]
    fn weather_icon_keyword_priority() {
        assert_eq!(WeatherIcon::for_conditions("Light rain showers"), WeatherIcon::Rain);
        assert_eq!(WeatherIcon::for_conditions("SNOW flurries"), WeatherIcon::Snow);
        assert_eq!(WeatherIcon::for_conditions("Thunderstorms"), WeatherIcon::Thunder);
        assert_eq!(WeatherIcon::for_conditions("Partly cloudy"), WeatherIcon::Cloud);
        assert_eq!(WeatherIcon::for_conditions("Clear skies"), WeatherIcon::Clear);
        assert_eq!(WeatherIcon::for_conditions("Sunny"), WeatherIcon::Clear);
        assert_eq!(WeatherIcon::for_conditions("Hazy"), WeatherIcon::Cloud);
        // "rain" outranks "cloud" when both appear.
        assert_eq!(WeatherIcon::for_conditions("Cloudy with rain"), WeatherIcon::Rain);
    }

    fn pool_snapshot() -> SlateSnapshot {
        let player = |name: &str| Player { name: name.to_string(), ..Player::default() };
        SlateSnapshot {
            week: 10,
            player_pool: PlayerPool {
                qb: vec![player("QB One"), player("QB Two")],
                rb: vec![player("RB One")],
                wr: vec![player("WR One"), player("WR Two"), player("WR Three")],
                te: vec![player("TE One")],
            },
            ..SlateSnapshot::default()
        }
    }

    #[test]
    fn all_players_flattens_every_bucket_in_order() {
        let snapshot = pool_snapshot();
        let all = snapshot.all_players();
        assert_eq!(all.len(), snapshot.player_pool.len());
        assert_eq!(all.len(), 7);

        let positions: Vec<&str> = all.iter().map(|(p, _)| p.label()).collect();
        assert_eq!(positions, ["QB", "QB", "RB", "WR", "WR", "WR", "TE"]);
        assert_eq!(all[0].1.name, "QB One");
        assert_eq!(all[6].1.name, "TE One");
    }

    #[test]
    fn players_for_empty_bucket_is_empty() {
        let snapshot = SlateSnapshot::default();
        assert!(snapshot.players(Position::Wr).is_empty());
    }

    fn game_with_total(id: &str, total: Option<&str>) -> Game {
        Game {
            game_id: id.to_string(),
            vegas: total.map(|t| VegasLine { total: t.to_string(), ..VegasLine::default() }),
            ..Game::default()
        }
    }

    #[test]
    fn leading_total_strips_trailing_text() {
        let line = |t: &str| VegasLine { total: t.to_string(), ..VegasLine::default() };
        assert_eq!(line("45.5").leading_total(), Some(45.5));
        assert_eq!(line("45.5pts").leading_total(), Some(45.5));
        assert_eq!(line("45.5 (opened 46)").leading_total(), Some(45.5));
        assert_eq!(line("-3.5").leading_total(), Some(-3.5));
        assert_eq!(line("TBD").leading_total(), None);
        assert_eq!(line("").leading_total(), None);
    }

    #[test]
    fn summary_stats_skips_unparseable_totals() {
        let snapshot = SlateSnapshot {
            week: 10,
            weather_watch: vec!["KC@BUF_2024W10".to_string()],
            games: vec![
                game_with_total("KC@BUF_2024W10", Some("45.5")),
                game_with_total("NYJ@ARI_2024W10", Some("47.5 (opened 46)")),
                game_with_total("DET@HOU_2024W10", Some("TBD")),
                game_with_total("PIT@WSH_2024W10", None),
            ],
            ..SlateSnapshot::default()
        };
        let stats = snapshot.summary_stats();
        assert_eq!(stats.total_games, 4);
        assert_eq!(stats.weather_alerts, 1);
        assert_eq!(stats.week, 10);
        assert!((stats.avg_over_under - 46.5).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_stats_average_is_zero_without_valid_totals() {
        let snapshot = SlateSnapshot {
            games: vec![game_with_total("DET@HOU_2024W10", Some("TBD"))],
            ..SlateSnapshot::default()
        };
        assert_eq!(snapshot.summary_stats().avg_over_under, 0.0);
    }

    #[test]
    fn kickoff_formats_with_weekday_and_zone() {
        let dt = DateTime::parse_from_rfc3339("2024-11-10T13:00:00-05:00").unwrap();
        assert_eq!(format_kickoff(dt), "Sun Nov 10, 1:00 PM ET");
    }

    #[test]
    fn as_of_formats_with_year() {
        let dt = DateTime::parse_from_rfc3339("2024-11-08T09:30:00-05:00").unwrap();
        assert_eq!(format_as_of(dt), "Nov 8, 2024 9:30 AM ET");
    }

    #[test]
    fn game_lookup_by_id() {
        let snapshot = SlateSnapshot {
            games: vec![game_with_total("KC@BUF_2024W10", Some("45.5"))],
            ..SlateSnapshot::default()
        };
        assert!(snapshot.game("KC@BUF_2024W10").is_some());
        assert!(snapshot.game("DAL@PHI_2024W10").is_none());
        assert!(snapshot.injuries_for("DAL@PHI_2024W10").is_empty());
        assert!(snapshot.trends_for("KC@BUF_2024W10").is_none());
    }
}
