//! # Pagequill Protocols
//!
//! Protocol definitions for the Pagequill coordination core.
//! Contains message types and interface definitions - no implementations.
//!
//! ## Core Traits
//!
//! - [`MessageBus`] - Request/response routing between execution contexts
//! - [`PageHandler`] - Per-tab request handler implemented by page agents
//! - [`HostHandler`] - Request handler implemented by the host coordinator
//! - [`NotificationSink`] - Fire-and-forget notification emission
//! - [`WindowHost`] - Window/tab queries and viewport capture
//! - [`ClipboardHost`] - System clipboard writes
//! - [`ActionUiHost`] - Extension-action UI behavior
//! - [`TextGenerator`] - Generative text completion boundary

pub mod bus;
pub mod error;
pub mod geometry;
pub mod message;
pub mod platform;
pub mod provider;

pub use bus::{HostHandler, MessageBus, NotificationSink, PageHandler};
pub use error::{BusError, PlatformError, ProviderError};
pub use geometry::{CaptureArea, DeviceRect, Point};
pub use message::{
    AgentRequest, AgentResponse, CaptureStatus, HostRequest, HostResponse, Notification,
};
pub use platform::{
    ActionUiHost, ClipboardHost, TabHandle, TabId, WindowHost, WindowId, EXTENSION_SCHEME,
};
pub use provider::{Role, TextGenerator, Turn};
