use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use log::{debug, warn};
use nfl_slate_api::SlateSnapshot;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuItem {
    #[default]
    Slate,
    Players,
    GameDetail,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        let settings = AppSettings::load();
        if let Some(level) = settings.log_level {
            tui_logger::set_default_level(level);
        }
        Self { settings, state: AppState::new() }
    }

    pub fn on_slate_loaded(&mut self, snapshot: SlateSnapshot) {
        debug!("slate loaded: week {}, {} games", snapshot.week, snapshot.games.len());
        self.state.last_error = None;

        // Keep the detail view pointed at a game that still exists.
        if let Some(game_id) = &self.state.game_detail.game_id
            && snapshot.game(game_id).is_none()
        {
            self.state.game_detail.game_id = None;
            if self.state.active_tab == MenuItem::GameDetail {
                self.state.active_tab = MenuItem::Slate;
            }
        }

        let visible_rows = self.state.pool.visible(&snapshot).len();
        self.state.pool.selected_row =
            self.state.pool.selected_row.min(visible_rows.saturating_sub(1));

        self.state.slate.load(snapshot);
    }

    pub fn on_error(&mut self, message: String) {
        warn!("network error: {message}");
        self.state.last_error = Some(message);
    }

    pub fn update_tab(&mut self, next_tab: MenuItem) {
        if next_tab != self.state.active_tab {
            self.state.previous_tab = self.state.active_tab;
            self.state.active_tab = next_tab;
        }
    }

    pub fn toggle_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.exit_help();
        } else {
            self.update_tab(MenuItem::Help);
        }
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    /// Open the detail view for the game currently selected on the slate tab.
    pub fn open_selected_game(&mut self) {
        if let Some(game_id) = self.state.slate.selected_game_id() {
            self.state.game_detail.game_id = Some(game_id);
            self.state.game_detail.scroll_offset = 0;
            self.update_tab(MenuItem::GameDetail);
        }
    }

    /// Open the detail view directly by tab key; falls back to the slate
    /// selection when no game was opened yet.
    pub fn show_game_detail(&mut self) {
        if self.state.game_detail.game_id.is_none() {
            self.state.game_detail.game_id = self.state.slate.selected_game_id();
        }
        self.update_tab(MenuItem::GameDetail);
    }

    pub fn pool_row_down(&mut self) {
        let count = self.pool_visible_count();
        self.state.pool.row_down(count);
    }

    pub fn pool_row_up(&mut self) {
        self.state.pool.row_up();
    }

    fn pool_visible_count(&self) -> usize {
        self.state
            .slate
            .snapshot
            .as_ref()
            .map(|snap| self.state.pool.visible(snap).len())
            .unwrap_or(0)
    }
}
