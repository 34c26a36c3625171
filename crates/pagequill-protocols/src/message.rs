//! Cross-context message protocol.
//!
//! Every message is a tagged request with a named `action` and a typed
//! response. Requests travel over the [`MessageBus`](crate::bus::MessageBus);
//! notifications are fire-and-forget and expect no reply.
//!
//! The serialized shapes are the wire contract between contexts and must not
//! drift: `action` discriminators and payload keys are camelCase.

use serde::{Deserialize, Serialize};

use crate::geometry::CaptureArea;
use crate::platform::TabId;

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;

/// Request addressed to a page agent in a specific tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum AgentRequest {
    /// Ask for the page's current user-visible text selection.
    GetSelection,
    /// Insert text into the page's focused input element.
    PasteText { text: String },
    /// Dispatch an image paste at the page's focused input element.
    #[serde(rename_all = "camelCase")]
    PasteImage { data_url: String },
    /// Bring up the region-selection overlay.
    StartCapture,
}

/// Response from a page agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgentResponse {
    /// Reply to [`AgentRequest::GetSelection`].
    Selection { text: String },
    /// Reply to [`AgentRequest::PasteText`] and [`AgentRequest::PasteImage`].
    Paste { success: bool },
    /// Reply to [`AgentRequest::StartCapture`].
    Capture { status: CaptureStatus },
}

impl AgentResponse {
    /// Selection text, if this is a selection reply.
    pub fn selection_text(&self) -> Option<&str> {
        match self {
            AgentResponse::Selection { text } => Some(text),
            _ => None,
        }
    }

    /// Paste success flag, if this is a paste reply.
    pub fn paste_success(&self) -> Option<bool> {
        match self {
            AgentResponse::Paste { success } => Some(*success),
            _ => None,
        }
    }
}

/// Overlay acknowledgement status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureStatus {
    Started,
}

/// Request addressed to the host coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum HostRequest {
    /// Ask for the most recently active tab, skipping the caller's own.
    ///
    /// `exclude_tab_id` stands in for the sender identity the browser bus
    /// carries implicitly; it is omitted from the wire when absent.
    #[serde(rename_all = "camelCase")]
    GetLastTabId {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        exclude_tab_id: Option<TabId>,
    },
}

/// Response from the host coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HostResponse {
    #[serde(rename_all = "camelCase")]
    LastTabId { tab_id: Option<TabId> },
}

/// Fire-and-forget notification; no reply is expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Notification {
    /// A region-selection drag completed on some page.
    CaptureSelected { area: CaptureArea },
}
