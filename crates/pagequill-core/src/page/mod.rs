//! Page agent: focus tracking, insertion, and region capture.
//!
//! One agent runs per loaded page. It remembers the last inputable element
//! to receive focus, answers selection queries, inserts text or images into
//! the page, and owns the region-selection overlay. Replies cross the bus;
//! overlay completion is emitted through the injected notification sink.

mod dom;
mod overlay;

pub use dom::{is_inputable, DomEvent, NodeId, NodeKind, PageDom, BODY};
pub use overlay::{CaptureOverlay, DragRect, MIN_REGION_PX};

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, warn};

use pagequill_protocols::bus::{NotificationSink, PageHandler};
use pagequill_protocols::geometry::Point;
use pagequill_protocols::message::{AgentRequest, AgentResponse, CaptureStatus, Notification};

use crate::data_url;

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;

/// Outcome of an image paste dispatch.
///
/// `Dispatched` means the synthetic paste event reached the target, not
/// that the page applied it; insertion is up to the page's own paste
/// handling. The wire response collapses this to a boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteDispatch {
    Dispatched,
    NoTarget,
    InvalidPayload,
}

impl PasteDispatch {
    /// The boolean carried on the wire.
    pub fn delivered(self) -> bool {
        matches!(self, PasteDispatch::Dispatched)
    }
}

struct PageState {
    dom: PageDom,
    focus_record: Option<NodeId>,
    overlay: CaptureOverlay,
}

/// The per-page agent.
pub struct PageAgent {
    state: Mutex<PageState>,
    notifications: Arc<dyn NotificationSink>,
}

impl PageAgent {
    pub fn new(dom: PageDom, notifications: Arc<dyn NotificationSink>) -> Self {
        Self {
            state: Mutex::new(PageState {
                dom,
                focus_record: None,
                overlay: CaptureOverlay::new(),
            }),
            notifications,
        }
    }

    // --- focus tracking ------------------------------------------------

    /// Observe a focus event. Inputable elements become the focus record;
    /// the observation happens before any page handler can swallow the
    /// event, so it cannot be bypassed.
    pub fn focus_element(&self, id: NodeId) -> bool {
        let mut state = self.state.lock();
        if !state.dom.focus(id) {
            return false;
        }
        if state.dom.kind(id).is_some_and(is_inputable) {
            state.focus_record = Some(id);
        }
        true
    }

    pub fn blur(&self) {
        self.state.lock().dom.blur();
    }

    /// The currently remembered inputable element.
    pub fn focus_record(&self) -> Option<NodeId> {
        self.state.lock().focus_record
    }

    // --- page state passthroughs for the embedding context -------------

    pub fn add_node(&self, kind: NodeKind) -> NodeId {
        self.state.lock().dom.add_node(kind)
    }

    pub fn set_value(&self, id: NodeId, value: impl Into<String>) -> bool {
        self.state.lock().dom.set_value(id, value)
    }

    pub fn value(&self, id: NodeId) -> Option<String> {
        self.state.lock().dom.value(id).map(str::to_string)
    }

    pub fn set_selection_range(&self, id: NodeId, start: usize, end: usize) -> bool {
        self.state.lock().dom.set_selection_range(id, start, end)
    }

    pub fn set_selection_text(&self, text: impl Into<String>) {
        self.state.lock().dom.set_selection_text(text);
    }

    /// The page's user-visible text selection, empty when none.
    pub fn selection_text(&self) -> String {
        self.state.lock().dom.selection_text().to_string()
    }

    pub fn take_dom_events(&self) -> Vec<DomEvent> {
        self.state.lock().dom.take_events()
    }

    // --- insertion ------------------------------------------------------

    /// Insert text into the page's focused input element, falling back to
    /// the focus record when focus sits on the body or nowhere.
    pub fn insert_text(&self, text: &str) -> bool {
        let mut state = self.state.lock();
        let Some(target) = resolve_target(&state) else {
            warn!("No element to insert text into");
            return false;
        };
        let Some(kind) = state.dom.kind(target) else {
            return false;
        };
        if !is_inputable(kind) {
            warn!("Focused element does not accept text");
            return false;
        }
        match kind {
            NodeKind::TextInput | NodeKind::TextArea => state.dom.replace_selection(target, text),
            NodeKind::ContentEditable => {
                state.dom.focus(target);
                state.dom.insert_text_command(target, text)
            }
            NodeKind::Container => false,
        }
    }

    /// Dispatch an image paste at the resolved target.
    ///
    /// Decodes the data URL, focuses the target, and raises a synthetic
    /// paste event carrying the payload. Best effort: a `Dispatched` result
    /// does not mean the page applied the paste.
    pub async fn insert_image(&self, data_url: &str) -> PasteDispatch {
        let Some((mime, bytes)) = data_url::decode(data_url) else {
            warn!("Image payload is not a base64 data URL");
            return PasteDispatch::InvalidPayload;
        };

        let mut state = self.state.lock();
        let Some(target) = resolve_target(&state) else {
            return PasteDispatch::NoTarget;
        };
        state.dom.focus(target);
        state.dom.dispatch_paste(target, &mime, bytes);
        PasteDispatch::Dispatched
    }

    // --- region capture -------------------------------------------------

    /// Bring up the region-selection overlay. No-op while one is active.
    pub fn start_capture(&self) {
        let mut state = self.state.lock();
        if state.overlay.start() {
            debug!("Capture overlay shown");
        }
    }

    pub fn overlay_active(&self) -> bool {
        self.state.lock().overlay.is_active()
    }

    pub fn pointer_down(&self, point: Point) {
        self.state.lock().overlay.pointer_down(point);
    }

    pub fn pointer_move(&self, point: Point) -> Option<DragRect> {
        self.state.lock().overlay.pointer_move(point)
    }

    /// Finish a drag; a large-enough region is announced to the panel.
    pub fn pointer_up(&self, point: Point) {
        let area = {
            let mut state = self.state.lock();
            let ratio = state.dom.device_pixel_ratio();
            state.overlay.pointer_up(point, ratio)
        };
        if let Some(area) = area {
            debug!(
                "Region selected: {}x{} at ({}, {})",
                area.width, area.height, area.x, area.y
            );
            self.notifications
                .notify(Notification::CaptureSelected { area });
        }
    }

    /// Escape pressed: tear the overlay down, discarding any drag.
    pub fn press_escape(&self) {
        self.state.lock().overlay.cancel();
    }
}

/// Paste target: the active element, unless it is absent or the body and a
/// focus record exists.
fn resolve_target(state: &PageState) -> Option<NodeId> {
    let active = state.dom.active_element();
    if (active.is_none() || active == Some(BODY)) && state.focus_record.is_some() {
        return state.focus_record;
    }
    active
}

#[async_trait]
impl PageHandler for PageAgent {
    async fn handle(&self, request: AgentRequest) -> AgentResponse {
        match request {
            AgentRequest::GetSelection => AgentResponse::Selection {
                text: self.selection_text(),
            },
            AgentRequest::PasteText { text } => AgentResponse::Paste {
                success: self.insert_text(&text),
            },
            AgentRequest::PasteImage { data_url } => AgentResponse::Paste {
                success: self.insert_image(&data_url).await.delivered(),
            },
            AgentRequest::StartCapture => {
                self.start_capture();
                AgentResponse::Capture {
                    status: CaptureStatus::Started,
                }
            }
        }
    }
}
