use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use nfl_slate_api::SlateSnapshot;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadSlate,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    /// The whole document is replaced on every load; there is no partial
    /// update path for a static weekly feed.
    SlateLoaded { snapshot: SlateSnapshot },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
