//! Typed navigation requests.
//!
//! Every navigation target has its own payload with its required fields
//! enumerated, so nothing downstream digs through an untyped params bag.
//! The session runtime talks to a [`Navigator`]; the UI end of the channel
//! applies requests to the actual router.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::warn;

use sadhana_core::model::{Proficiency, SessionSummary};

/// Opens a practice's guide screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidePayload {
    pub title: String,
}

/// Enters a timed session for a practice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    pub title: String,
    pub proficiency: Option<Proficiency>,
}

/// Leaves a concluded session for the summary screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcludePayload {
    pub summary: SessionSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationRequest {
    Guide(GuidePayload),
    Session(SessionPayload),
    /// Composite "pop to root, then push the summary": the back stack is
    /// cleared first so the user cannot navigate back into a concluded
    /// session.
    Conclude(ConcludePayload),
}

/// Receives navigation requests from the session runtime.
pub trait Navigator: Send + Sync {
    fn navigate(&self, request: NavigationRequest);
}

/// Sender half of the navigation channel.
pub type NavigationSender = mpsc::UnboundedSender<NavigationRequest>;

/// Receiver half, drained by the UI shell.
pub type NavigationReceiver = mpsc::UnboundedReceiver<NavigationRequest>;

/// A `Navigator` that forwards requests over a channel to the UI thread.
#[derive(Clone)]
pub struct ChannelNavigator {
    tx: NavigationSender,
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, request: NavigationRequest) {
        if self.tx.send(request).is_err() {
            warn!("navigation receiver dropped; request discarded");
        }
    }
}

/// Create the navigation channel pair.
#[must_use]
pub fn create_navigation_channel() -> (ChannelNavigator, NavigationReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelNavigator { tx }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sadhana_core::time::fixed_now;
    use std::time::Duration;

    #[test]
    fn requests_arrive_in_order() {
        let (navigator, mut rx) = create_navigation_channel();

        navigator.navigate(NavigationRequest::Guide(GuidePayload {
            title: "Metta".into(),
        }));
        navigator.navigate(NavigationRequest::Session(SessionPayload {
            title: "Metta".into(),
            proficiency: Some(Proficiency::Beginner),
        }));

        assert!(matches!(
            rx.try_recv().unwrap(),
            NavigationRequest::Guide(_)
        ));
        assert!(matches!(
            rx.try_recv().unwrap(),
            NavigationRequest::Session(_)
        ));
    }

    #[test]
    fn send_after_receiver_drop_is_swallowed() {
        let (navigator, rx) = create_navigation_channel();
        drop(rx);

        let summary =
            SessionSummary::new("Breath", Duration::from_secs(60), fixed_now()).unwrap();
        navigator.navigate(NavigationRequest::Conclude(ConcludePayload { summary }));
    }
}
