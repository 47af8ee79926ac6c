//! Screen implementations. Each screen is a top-level Component.

mod alerts;
mod history;
mod overview;
mod rooms;

use ratatui::text::{Line, Span};

use homewatt_core::ViewState;

use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;

pub use alerts::AlertsScreen;
pub use history::HistoryScreen;
pub use overview::OverviewScreen;
pub use rooms::RoomsScreen;

/// Create all four screens in tab order.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Overview, Box::new(OverviewScreen::new())),
        (ScreenId::Rooms, Box::new(RoomsScreen::new())),
        (ScreenId::History, Box::new(HistoryScreen::new())),
        (ScreenId::Alerts, Box::new(AlertsScreen::new())),
    ]
}

/// The line to render in place of data for a non-Ready view state:
/// a loading hint, a login prompt, or the fetch failure. `None` means the
/// view is Ready and the screen renders its data (or its own "no data"
/// placeholder for an empty set).
pub(crate) fn state_notice<T>(state: &ViewState<T>) -> Option<Line<'static>> {
    match state {
        ViewState::Ready(_) => None,
        ViewState::Loading => Some(Line::from(Span::styled(
            "  Loading...",
            theme::placeholder(),
        ))),
        ViewState::Unauthenticated => Some(Line::from(Span::styled(
            "  Please log in to view this content",
            theme::login_prompt(),
        ))),
        ViewState::Failed(reason) => Some(Line::from(Span::styled(
            format!("  Failed to load: {reason}"),
            theme::fetch_error(),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_covers_every_degraded_state() {
        assert!(state_notice(&ViewState::Ready(())).is_none());
        assert!(state_notice::<()>(&ViewState::Loading).is_some());
        assert!(state_notice::<()>(&ViewState::Unauthenticated).is_some());
        assert!(state_notice::<()>(&ViewState::Failed("boom".into())).is_some());
    }
}
