use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    // The player detail popup captures keys while open.
    if guard.state.active_tab == MenuItem::Players && guard.state.pool.show_detail {
        match (key_event.code, key_event.modifiers) {
            (Char('q'), _) | (Char('c'), KeyModifiers::CONTROL) => {
                crate::cleanup_terminal();
                std::process::exit(0);
            }
            (KeyCode::Esc | KeyCode::Enter, _) => guard.state.pool.close_detail(),
            _ => {}
        }
        return;
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Slate),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Players),
        (_, Char('3'), _) => guard.show_game_detail(),
        (_, Char('?'), _) => guard.toggle_help(),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Slate navigation
        (MenuItem::Slate, Char('j') | KeyCode::Down, _) => guard.state.slate.navigate_game_down(),
        (MenuItem::Slate, Char('k') | KeyCode::Up, _) => guard.state.slate.navigate_game_up(),
        (MenuItem::Slate, KeyCode::Enter, _) => guard.open_selected_game(),

        // Player pool navigation
        (MenuItem::Players, Char('j') | KeyCode::Down, _) => guard.pool_row_down(),
        (MenuItem::Players, Char('k') | KeyCode::Up, _) => guard.pool_row_up(),
        (MenuItem::Players, Char('l') | KeyCode::Right, _) => guard.state.pool.next_position(),
        (MenuItem::Players, Char('h') | KeyCode::Left, _) => guard.state.pool.prev_position(),
        (MenuItem::Players, Char('r'), _) => guard.state.pool.cycle_risk_filter(),
        (MenuItem::Players, Char('s'), _) => guard.state.pool.cycle_sort(),
        (MenuItem::Players, KeyCode::Enter, _) => guard.state.pool.toggle_detail(),

        // Game detail navigation
        (MenuItem::GameDetail, Char('j') | KeyCode::Down, _) => {
            guard.state.game_detail.scroll_offset =
                guard.state.game_detail.scroll_offset.saturating_add(1);
        }
        (MenuItem::GameDetail, Char('k') | KeyCode::Up, _) => {
            guard.state.game_detail.scroll_offset =
                guard.state.game_detail.scroll_offset.saturating_sub(1);
        }
        (MenuItem::GameDetail, KeyCode::Esc, _) => guard.update_tab(MenuItem::Slate),

        // Global
        (_, Char('R'), _) => {
            drop(guard);
            let _ = network_requests.send(NetworkRequest::LoadSlate).await;
        }
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}
