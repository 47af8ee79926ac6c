// ── Reactive view slot ──
//
// One slot per dashboard view. Each refresh replaces the slot's value
// wholesale (no diffing, last write wins) and broadcasts the new state to
// subscribers via a `watch` channel.

use std::sync::Arc;

use tokio::sync::watch;

use homewatt_api::{Error as ApiError, FetchOutcome};

/// Render state of a single view region.
///
/// The page-level machine is `Loading → Ready` with `Unauthenticated` and
/// `Failed` as per-view degradations: a fetch hitting the login redirect
/// or an error flips only its own view, never the whole page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState<T> {
    /// Nothing fetched yet.
    #[default]
    Loading,
    /// Last fetch succeeded; render this.
    Ready(T),
    /// Last fetch was redirected to the login page; render a login prompt.
    Unauthenticated,
    /// Last fetch failed; render the reason in place of data.
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }
}

/// A watch-backed slot holding the latest state for one view.
pub(crate) struct ViewSlot<T> {
    state: watch::Sender<ViewState<Arc<T>>>,
}

impl<T> ViewSlot<T> {
    pub(crate) fn new() -> Self {
        let (state, _) = watch::channel(ViewState::Loading);
        Self { state }
    }

    /// Apply a fetch result, fully replacing the previous state.
    pub(crate) fn apply(&self, result: Result<FetchOutcome<T>, ApiError>) {
        let next = match result {
            Ok(FetchOutcome::Authenticated(data)) => ViewState::Ready(Arc::new(data)),
            Ok(FetchOutcome::Unauthenticated) => ViewState::Unauthenticated,
            Err(e) => ViewState::Failed(e.to_string()),
        };
        // `send_modify` updates unconditionally, even with zero receivers.
        self.state.send_modify(|state| *state = next);
    }

    /// The current state (cheap clone; payloads are behind `Arc`).
    pub(crate) fn current(&self) -> ViewState<Arc<T>> {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes.
    pub(crate) fn subscribe(&self) -> watch::Receiver<ViewState<Arc<T>>> {
        self.state.subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn slot_starts_loading() {
        let slot: ViewSlot<u32> = ViewSlot::new();
        assert_eq!(slot.current(), ViewState::Loading);
    }

    #[test]
    fn apply_replaces_wholesale() {
        let slot: ViewSlot<Vec<u32>> = ViewSlot::new();
        slot.apply(Ok(FetchOutcome::Authenticated(vec![1, 2, 3])));
        assert_eq!(slot.current().data().map(|d| d.len()), Some(3));

        slot.apply(Ok(FetchOutcome::Authenticated(vec![9])));
        assert_eq!(slot.current().data().map(|d| d.len()), Some(1));
    }

    #[test]
    fn auth_redirect_degrades_only_this_slot() {
        let slot: ViewSlot<u32> = ViewSlot::new();
        slot.apply(Ok(FetchOutcome::Authenticated(7)));
        slot.apply(Ok(FetchOutcome::Unauthenticated));
        assert_eq!(slot.current(), ViewState::Unauthenticated);

        // A later successful fetch recovers.
        slot.apply(Ok(FetchOutcome::Authenticated(8)));
        assert!(slot.current().is_ready());
    }

    #[test]
    fn failure_carries_the_reason() {
        let slot: ViewSlot<u32> = ViewSlot::new();
        slot.apply(Err(ApiError::RequestFailed {
            status: 500,
            message: "server answered 500".into(),
        }));
        match slot.current() {
            ViewState::Failed(reason) => assert!(reason.contains("500")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn subscribers_see_replacements() {
        let slot: ViewSlot<u32> = ViewSlot::new();
        let mut rx = slot.subscribe();
        slot.apply(Ok(FetchOutcome::Authenticated(1)));
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_ready());
    }
}
