use crate::app::MenuItem;
use nfl_slate_api::{Player, Position, RiskTag, SlateSnapshot};

// ---------------------------------------------------------------------------
// Slate (dashboard) state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SlateState {
    pub snapshot: Option<SlateSnapshot>,
    /// Selected game index into the snapshot's game list.
    pub selected_game: usize,
    /// Vertical scroll offset for when cards exceed terminal height.
    pub scroll_offset: u16,
}

impl SlateState {
    /// Store a freshly loaded snapshot. Selection is clamped rather than
    /// reset so a periodic reload doesn't yank the cursor around.
    pub fn load(&mut self, snapshot: SlateSnapshot) {
        self.selected_game = self.selected_game.min(snapshot.games.len().saturating_sub(1));
        self.scroll_offset = 0;
        self.snapshot = Some(snapshot);
    }

    pub fn navigate_game_down(&mut self) {
        let max = self.game_count().saturating_sub(1);
        if self.selected_game < max {
            self.selected_game += 1;
        }
    }

    pub fn navigate_game_up(&mut self) {
        self.selected_game = self.selected_game.saturating_sub(1);
    }

    /// Return the game ID of the currently selected game, if any.
    pub fn selected_game_id(&self) -> Option<String> {
        let snapshot = self.snapshot.as_ref()?;
        snapshot.games.get(self.selected_game).map(|g| g.game_id.clone())
    }

    fn game_count(&self) -> usize {
        self.snapshot.as_ref().map(|s| s.games.len()).unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// DFS player pool state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PoolSort {
    /// Feed order — the slate's own ranking within each bucket.
    #[default]
    Slate,
    /// Salary, highest first.
    Salary,
    /// Name, A to Z.
    Name,
}

impl PoolSort {
    pub fn next(self) -> PoolSort {
        match self {
            PoolSort::Slate => PoolSort::Salary,
            PoolSort::Salary => PoolSort::Name,
            PoolSort::Name => PoolSort::Slate,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PoolSort::Slate => "slate",
            PoolSort::Salary => "salary",
            PoolSort::Name => "name",
        }
    }
}

#[derive(Debug, Default)]
pub struct PlayerPoolState {
    pub position: Position,
    /// None = all tags.
    pub risk_filter: Option<RiskTag>,
    pub sort: PoolSort,
    pub selected_row: usize,
    /// Whether the player detail popup is open for the selected row.
    pub show_detail: bool,
}

impl PlayerPoolState {
    /// The rows currently on screen: the selected position bucket with the
    /// risk filter and sort applied.
    pub fn visible<'a>(&self, snapshot: &'a SlateSnapshot) -> Vec<&'a Player> {
        let mut rows: Vec<&Player> = snapshot.players(self.position).iter().collect();
        if let Some(tag) = self.risk_filter {
            rows.retain(|p| p.risk_tag == tag);
        }
        match self.sort {
            PoolSort::Slate => {}
            PoolSort::Salary => {
                rows.sort_by(|a, b| b.dk_salary.unwrap_or(0).cmp(&a.dk_salary.unwrap_or(0)))
            }
            PoolSort::Name => rows.sort_by(|a, b| a.name.cmp(&b.name)),
        }
        rows
    }

    pub fn selected_player<'a>(&self, snapshot: &'a SlateSnapshot) -> Option<&'a Player> {
        self.visible(snapshot).get(self.selected_row).copied()
    }

    pub fn next_position(&mut self) {
        self.position = self.position.next();
        self.reset_cursor();
    }

    pub fn prev_position(&mut self) {
        self.position = self.position.prev();
        self.reset_cursor();
    }

    /// All → Stud → Cash → GPP → Value → N/A → All.
    pub fn cycle_risk_filter(&mut self) {
        self.risk_filter = match self.risk_filter {
            None => Some(RiskTag::Stud),
            Some(RiskTag::Stud) => Some(RiskTag::Cash),
            Some(RiskTag::Cash) => Some(RiskTag::Gpp),
            Some(RiskTag::Gpp) => Some(RiskTag::Value),
            Some(RiskTag::Value) => Some(RiskTag::NotAvailable),
            Some(RiskTag::NotAvailable) => None,
        };
        self.reset_cursor();
    }

    pub fn cycle_sort(&mut self) {
        self.sort = self.sort.next();
        self.selected_row = 0;
    }

    pub fn row_down(&mut self, row_count: usize) {
        let max = row_count.saturating_sub(1);
        if self.selected_row < max {
            self.selected_row += 1;
        }
    }

    pub fn row_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn close_detail(&mut self) {
        self.show_detail = false;
    }

    fn reset_cursor(&mut self) {
        self.selected_row = 0;
        self.show_detail = false;
    }
}

// ---------------------------------------------------------------------------
// Game detail state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct GameDetailState {
    pub game_id: Option<String>,
    pub scroll_offset: u16,
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub slate: SlateState,
    pub pool: PlayerPoolState,
    pub game_detail: GameDetailState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nfl_slate_api::{Game, PlayerPool};

    fn player(name: &str, salary: Option<u32>, tag: RiskTag) -> Player {
        Player {
            name: name.to_string(),
            team: "BUF".to_string(),
            dk_salary: salary,
            risk_tag: tag,
            ..Player::default()
        }
    }

    fn snapshot() -> SlateSnapshot {
        SlateSnapshot {
            week: 10,
            games: vec![
                Game { game_id: "KC@BUF_2024W10".into(), ..Game::default() },
                Game { game_id: "NYJ@ARI_2024W10".into(), ..Game::default() },
            ],
            player_pool: PlayerPool {
                qb: vec![
                    player("Zach Cheap", Some(5000), RiskTag::Value),
                    player("Allen Pricey", Some(8200), RiskTag::Stud),
                    player("Mid Salary", Some(6900), RiskTag::Stud),
                ],
                ..PlayerPool::default()
            },
            ..SlateSnapshot::default()
        }
    }

    #[test]
    fn slate_selection_clamps_on_reload() {
        let mut state = SlateState::default();
        state.load(snapshot());
        state.navigate_game_down();
        assert_eq!(state.selected_game, 1);

        // Reload with fewer games: cursor clamps instead of pointing past the end.
        let mut smaller = snapshot();
        smaller.games.truncate(1);
        state.load(smaller);
        assert_eq!(state.selected_game, 0);
        assert_eq!(state.selected_game_id().as_deref(), Some("KC@BUF_2024W10"));
    }

    #[test]
    fn slate_navigation_stops_at_bounds() {
        let mut state = SlateState::default();
        state.load(snapshot());
        state.navigate_game_up();
        assert_eq!(state.selected_game, 0);
        state.navigate_game_down();
        state.navigate_game_down();
        state.navigate_game_down();
        assert_eq!(state.selected_game, 1);
    }

    #[test]
    fn pool_risk_filter_narrows_rows() {
        let snap = snapshot();
        let mut pool = PlayerPoolState::default();
        assert_eq!(pool.visible(&snap).len(), 3);

        pool.cycle_risk_filter(); // Stud
        let rows = pool.visible(&snap);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|p| p.risk_tag == RiskTag::Stud));
    }

    #[test]
    fn pool_salary_sort_is_highest_first() {
        let snap = snapshot();
        let mut pool = PlayerPoolState::default();
        pool.cycle_sort(); // Salary
        let rows = pool.visible(&snap);
        let names: Vec<&str> = rows.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Allen Pricey", "Mid Salary", "Zach Cheap"]);
    }

    #[test]
    fn pool_name_sort_is_alphabetical() {
        let snap = snapshot();
        let mut pool = PlayerPoolState::default();
        pool.cycle_sort();
        pool.cycle_sort(); // Name
        let rows = pool.visible(&snap);
        let names: Vec<&str> = rows.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Allen Pricey", "Mid Salary", "Zach Cheap"]);
    }

    #[test]
    fn pool_position_change_resets_cursor_and_detail() {
        let snap = snapshot();
        let mut pool = PlayerPoolState::default();
        pool.row_down(pool.visible(&snap).len());
        pool.toggle_detail();
        assert_eq!(pool.selected_row, 1);
        assert!(pool.show_detail);

        pool.next_position();
        assert_eq!(pool.position, Position::Rb);
        assert_eq!(pool.selected_row, 0);
        assert!(!pool.show_detail);
        assert!(pool.visible(&snap).is_empty());
    }

    #[test]
    fn pool_selected_player_respects_sort() {
        let snap = snapshot();
        let mut pool = PlayerPoolState::default();
        pool.cycle_sort(); // Salary
        assert_eq!(pool.selected_player(&snap).map(|p| p.name.as_str()), Some("Allen Pricey"));
    }

    #[test]
    fn risk_filter_cycle_returns_to_all() {
        let mut pool = PlayerPoolState::default();
        for _ in 0..6 {
            pool.cycle_risk_filter();
        }
        assert!(pool.risk_filter.is_none());
    }
}
