//! # Pagequill Core
//!
//! The three long-lived components of the capture-transform-paste flow:
//!
//! - [`host`] - Process-wide coordinator tracking recently active tabs and
//!   applying one-time action-UI behavior.
//! - [`page`] - Per-page agent: focus tracking, text/image insertion, and
//!   the region-selection overlay state machine.
//! - [`panel`] - The controller orchestrating capture, AI transforms, and
//!   paste operations against the other two.
//!
//! Components interact only through the message protocol defined in
//! `pagequill-protocols`; every browser-owned surface is injected as a
//! trait object.

pub mod data_url;
pub mod host;
pub mod page;
pub mod panel;

pub use host::{HostCoordinator, TabHistory, TAB_HISTORY_CAPACITY};
pub use page::{is_inputable, CaptureOverlay, DomEvent, NodeKind, PageAgent, PageDom, PasteDispatch};
pub use panel::{AssistMode, AssistState, CaptureArtifact, Panel, PanelError, PanelEvent};
