// edgeswitch-api: Async Rust client for the Ubiquiti EdgeSwitch HTTP management API

pub mod auth;
pub mod base_url;
pub mod client;
pub mod error;
pub mod response;
pub mod transport;

pub use auth::{AuthState, ConnectionTestResult};
pub use base_url::BaseUrl;
pub use client::EdgeSwitchClient;
pub use error::{Error, ErrorCategory, FailureKind};
pub use transport::{TlsMode, TransportConfig};
