pub mod bridge;
pub mod session;

pub use bridge::{BridgeRoute, RouterBridge};
pub use session::{BrowserConfig, BrowserKind, new_session};
