// edgeswitch-core: Typed domain model and polling coordinator on top of edgeswitch-api.

pub mod config;
pub mod convert;
pub mod coordinator;
pub mod error;
pub mod model;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ControllerConfig, TlsVerification};
pub use coordinator::{ConnectionState, Coordinator, Snapshot};
pub use error::CoreError;

pub use edgeswitch_api::{ConnectionTestResult, ErrorCategory, FailureKind};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Device
    DeviceCapabilities, DeviceIdentification, EdgeSwitchDevice, InterfaceInfo,
    // Statistics
    CpuInfo, DeviceStatistics, EdgeSwitchStatistics, InterfaceStatistics,
    InterfaceStatisticsInfo, RamInfo, TemperatureInfo,
    // Interfaces
    EdgeSwitchInterface, EdgeSwitchInterfaceConfig, InterfaceRole, InterfaceType, LagConfig,
    PortConfig,
    // Summary
    SwitchSummary,
};
