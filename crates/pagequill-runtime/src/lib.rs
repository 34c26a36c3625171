//! # Pagequill Runtime
//!
//! In-process implementations of the host-managed substrate: the message
//! bus routing requests between contexts, a simulated browser for tests and
//! the demo binary, clipboard backends, and session wiring that assembles a
//! complete extension process.

pub mod bus;
pub mod clipboard;
pub mod session;
pub mod sim;

pub use bus::{ExtensionBus, NotificationHub};
pub use clipboard::{MemoryClipboard, SystemClipboard};
pub use session::Session;
pub use sim::{solid_png, SimActionUi, SimBrowser};
