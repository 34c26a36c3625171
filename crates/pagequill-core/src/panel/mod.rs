//! Panel controller: orchestrates capture, AI transforms, and paste.
//!
//! The panel never touches a page directly; it resolves a target tab,
//! sends requests to that tab's page agent, and renders outcomes as
//! drainable [`PanelEvent`]s (the stand-in for its status line and
//! settings surface).

mod assist;
mod capture;

pub use assist::{AssistMode, AssistState, Exchange};
pub use capture::CaptureArtifact;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use pagequill_protocols::bus::MessageBus;
use pagequill_protocols::error::{BusError, PlatformError, ProviderError};
use pagequill_protocols::message::{AgentRequest, HostRequest, HostResponse, Notification};
use pagequill_protocols::platform::{ClipboardHost, TabHandle, WindowHost};
use pagequill_protocols::provider::TextGenerator;

#[cfg(test)]
pub(crate) mod testutil;

#[cfg(test)]
#[path = "panel_tests.rs"]
mod tests;

pub(crate) const RELOAD_PAGE: &str = "Page not reachable. Reload the page and try again.";
pub(crate) const NO_TARGET_TAB: &str = "No target tab found";

/// Panel operation errors. None of these are fatal; the panel maps them to
/// status events and keeps running.
#[derive(Debug, Error)]
pub enum PanelError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Channel(#[from] BusError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("No target tab available")]
    NoTargetTab,

    #[error("Image error: {0}")]
    Image(String),
}

/// What the panel surfaced to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    /// A status line. Transient statuses auto-dismiss; sticky ones stay
    /// until replaced.
    Status { text: String, sticky: bool },
    /// The user must configure a credential first.
    OpenSettings,
}

/// The panel controller.
pub struct Panel {
    bus: Arc<dyn MessageBus>,
    windows: Arc<dyn WindowHost>,
    clipboard: Arc<dyn ClipboardHost>,
    generator: Option<Arc<dyn TextGenerator>>,
    model: String,
    editor: String,
    result: String,
    assist_state: AssistState,
    conversation: Option<Exchange>,
    artifacts: Vec<CaptureArtifact>,
    events: Vec<PanelEvent>,
}

impl Panel {
    pub fn new(
        bus: Arc<dyn MessageBus>,
        windows: Arc<dyn WindowHost>,
        clipboard: Arc<dyn ClipboardHost>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            bus,
            windows,
            clipboard,
            generator: None,
            model: model.into(),
            editor: String::new(),
            result: String::new(),
            assist_state: AssistState::Idle,
            conversation: None,
            artifacts: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Attach the generative endpoint. Left unset when no credential is
    /// configured; AI invocations then redirect to settings.
    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    // --- editor and event surface ---------------------------------------

    pub fn editor_text(&self) -> &str {
        &self.editor
    }

    pub fn set_editor_text(&mut self, text: impl Into<String>) {
        self.editor = text.into();
    }

    /// Drain everything surfaced since the last call.
    pub fn take_events(&mut self) -> Vec<PanelEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn status(&mut self, text: impl Into<String>) {
        self.events.push(PanelEvent::Status {
            text: text.into(),
            sticky: false,
        });
    }

    pub(crate) fn sticky_error(&mut self, text: impl Into<String>) {
        self.events.push(PanelEvent::Status {
            text: text.into(),
            sticky: true,
        });
    }

    // --- target resolution ----------------------------------------------

    /// The tab the user is actually looking at.
    ///
    /// The active tab of the current window is the target unless it is the
    /// extension's own hosted page (the panel shown as a persistent panel
    /// occupies the active-tab slot itself); then the host coordinator
    /// supplies the last distinct tab id, resolved to a live handle.
    pub async fn resolve_target_tab(&self) -> Result<Option<TabHandle>, PanelError> {
        let active = self.windows.current_active_tab().await?;
        if let Some(tab) = &active {
            if !tab.is_extension_page() {
                return Ok(active);
            }
        }

        let exclude = active.map(|tab| tab.id);
        let HostResponse::LastTabId { tab_id } = self
            .bus
            .request_host(HostRequest::GetLastTabId {
                exclude_tab_id: exclude,
            })
            .await?;

        match tab_id {
            Some(id) => Ok(self.windows.tab_by_id(id).await?),
            None => Ok(None),
        }
    }

    // --- selection intake -----------------------------------------------

    /// Populate the editor from the page selection when the panel opens.
    /// Best effort: every failure is silent here.
    pub async fn open(&mut self) {
        match self.request_selection().await {
            Ok(Some(text)) if !text.is_empty() => {
                self.editor = text;
                self.status("Selection copied from page");
            }
            Ok(_) => {}
            Err(e) => debug!("Initial selection fetch skipped: {}", e),
        }
    }

    /// Re-fetch the page selection on explicit request.
    pub async fn fetch_selection(&mut self) {
        match self.request_selection().await {
            Ok(Some(text)) if !text.is_empty() => {
                self.editor = text;
                self.status("Selection fetched");
            }
            Ok(Some(_)) => self.status("No selection found"),
            Ok(None) => self.status(NO_TARGET_TAB),
            Err(PanelError::Channel(_)) => self.status(RELOAD_PAGE),
            Err(e) => {
                warn!("Selection fetch failed: {}", e);
                self.status(RELOAD_PAGE);
            }
        }
    }

    async fn request_selection(&self) -> Result<Option<String>, PanelError> {
        let Some(tab) = self.resolve_target_tab().await? else {
            return Ok(None);
        };
        let response = self.bus.request_page(tab.id, AgentRequest::GetSelection).await?;
        Ok(Some(
            response.selection_text().unwrap_or_default().to_string(),
        ))
    }

    // --- text paste -----------------------------------------------------

    /// Paste the editor text into the target page.
    pub async fn paste_editor_text(&mut self) {
        if self.editor.is_empty() {
            self.status("Editor is empty");
            return;
        }
        let text = self.editor.clone();

        let tab = match self.resolve_target_tab().await {
            Ok(Some(tab)) => tab,
            Ok(None) => {
                self.status(NO_TARGET_TAB);
                return;
            }
            Err(e) => {
                warn!("Target resolution failed: {}", e);
                self.status(NO_TARGET_TAB);
                return;
            }
        };

        match self
            .bus
            .request_page(tab.id, AgentRequest::PasteText { text })
            .await
        {
            Ok(response) if response.paste_success() == Some(true) => {
                self.status("Pasted to page");
            }
            Ok(_) => {
                self.status("No editable field found. Click an input field first.");
            }
            Err(e) => {
                warn!("Paste failed: {}", e);
                self.status(RELOAD_PAGE);
            }
        }
    }

    /// React to a bus notification addressed at the panel.
    pub async fn handle_notification(&mut self, notification: Notification) {
        match notification {
            Notification::CaptureSelected { area } => self.capture_and_crop(area).await,
        }
    }
}
