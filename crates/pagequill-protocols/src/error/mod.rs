//! Error types for the protocol boundaries.

mod bus;
mod platform;
mod provider;

pub use bus::BusError;
pub use platform::PlatformError;
pub use provider::ProviderError;
