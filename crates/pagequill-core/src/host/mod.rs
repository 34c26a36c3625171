//! Host coordinator: process-wide tab tracking and action-UI behavior.

mod history;

pub use history::{TabHistory, TAB_HISTORY_CAPACITY};

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, warn};

use pagequill_protocols::bus::HostHandler;
use pagequill_protocols::message::{HostRequest, HostResponse};
use pagequill_protocols::platform::{ActionUiHost, TabId};

/// Process-wide singleton answering "which tab was active before this one".
///
/// The history is mutated only here, in response to the coordinator's own
/// subscribed tab events; no other context writes it.
pub struct HostCoordinator {
    history: Mutex<TabHistory>,
    action_ui: Arc<dyn ActionUiHost>,
}

impl HostCoordinator {
    pub fn new(action_ui: Arc<dyn ActionUiHost>) -> Self {
        Self {
            history: Mutex::new(TabHistory::new()),
            action_ui,
        }
    }

    /// One-time startup action: make the extension action open the panel.
    ///
    /// Idempotent; a failure is logged and the behavior degrades to the
    /// platform default. Never retried.
    pub fn setup_action_behavior(&self) {
        match self.action_ui.open_panel_on_action() {
            Ok(()) => debug!("Action click opens the panel"),
            Err(e) => warn!("Action UI setup failed: {}", e),
        }
    }

    /// A tab became active.
    pub fn on_tab_activated(&self, tab: TabId) {
        debug!("Tab activated: {}", tab);
        self.history.lock().record_activation(tab);
    }

    /// A tab was closed.
    pub fn on_tab_removed(&self, tab: TabId) {
        debug!("Tab removed: {}", tab);
        self.history.lock().forget(tab);
    }

    /// The most recently active tab other than `exclude`.
    pub fn last_tab_excluding(&self, exclude: Option<TabId>) -> Option<TabId> {
        self.history.lock().last_excluding(exclude)
    }

    /// Current history entries, oldest-first.
    pub fn history_snapshot(&self) -> Vec<TabId> {
        self.history.lock().snapshot()
    }
}

#[async_trait]
impl HostHandler for HostCoordinator {
    async fn handle(&self, request: HostRequest) -> HostResponse {
        match request {
            HostRequest::GetLastTabId { exclude_tab_id } => HostResponse::LastTabId {
                tab_id: self.last_tab_excluding(exclude_tab_id),
            },
        }
    }
}
