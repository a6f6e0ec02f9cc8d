// ── Interface configuration (`GET /api/v1.0/interfaces`) ──
//
// Each interface carries either a port section or a LAG section. Which one
// is decided by the presence of the `port`/`lag` key alone, not by the
// `type` field, and is exposed as `InterfaceRole`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{lenient_u32, non_empty_object};

/// PoE mode when a port document does not say.
pub const DEFAULT_POE_MODE: &str = "off";
pub const POE_MODE_ACTIVE: &str = "active";
pub const STP_STATE_FORWARDING: &str = "forwarding";
/// STP state reported for an interface with neither port nor LAG config.
pub const STP_STATE_UNKNOWN: &str = "unknown";

// ── InterfaceType ────────────────────────────────────────────────

/// The `type` string of an interface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InterfaceType {
    Port,
    Lag,
    /// Anything else (VLAN, loopback, ...), kept verbatim.
    Other(String),
}

impl Default for InterfaceType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for InterfaceType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "port" => Self::Port,
            "lag" => Self::Lag,
            _ => Self::Other(raw),
        }
    }
}

impl From<InterfaceType> for String {
    fn from(kind: InterfaceType) -> Self {
        match kind {
            InterfaceType::Port => "port".into(),
            InterfaceType::Lag => "lag".into(),
            InterfaceType::Other(raw) => raw,
        }
    }
}

impl fmt::Display for InterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Port => f.write_str("port"),
            Self::Lag => f.write_str("lag"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

// ── Common sections ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceIdentification {
    pub id: String,
    pub name: String,
    pub mac: String,
    #[serde(rename = "type")]
    pub kind: InterfaceType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InterfaceStatus {
    pub enabled: bool,
    pub plugged: bool,
    /// Negotiated speed such as `"1000-full"`; absent when link is down.
    pub current_speed: Option<String>,
    /// Configured speed (`"auto"`, `"100-half"`, ...).
    pub speed: String,
    pub arp_proxy: bool,
    #[serde(deserialize_with = "lenient_u32")]
    pub mtu: u32,
}

impl InterfaceStatus {
    pub fn is_connected(&self) -> bool {
        self.enabled && self.plugged
    }

    /// Leading number of `current_speed` (`"1000-full"` is 1000).
    pub fn speed_mbps(&self) -> Option<u32> {
        self.current_speed
            .as_deref()
            .and_then(|s| s.split('-').next())
            .and_then(|n| n.trim().parse().ok())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceAddress {
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
    pub cidr: String,
    pub eui64: bool,
    pub origin: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StpConfig {
    pub enabled: bool,
    pub edge_port: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub path_cost: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub port_priority: u32,
    pub state: String,
}

impl StpConfig {
    pub fn is_forwarding(&self) -> bool {
        self.state == STP_STATE_FORWARDING
    }
}

// ── Port section ─────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PingWatchdogConfig {
    pub enabled: bool,
    pub address: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub failure_count: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub interval: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub off_delay: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub start_delay: u32,
}

/// Transceiver module plugged into an SFP cage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SfpConfig {
    pub present: bool,
    pub vendor: String,
    pub part: String,
    pub serial: String,
    pub tx_fault: Option<bool>,
    pub los: Option<bool>,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortConfig {
    pub stp: StpConfig,
    pub dhcp_snooping: bool,
    /// PoE mode string (`off`, `active`, `24v`, ...).
    pub poe: String,
    pub flow_control: bool,
    pub routed: bool,
    pub isolated: bool,
    #[serde(
        deserialize_with = "non_empty_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub ping_watchdog: Option<PingWatchdogConfig>,
    #[serde(
        deserialize_with = "non_empty_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub sfp: Option<SfpConfig>,
}

impl Default for PortConfig {
    fn default() -> Self {
        Self {
            stp: StpConfig::default(),
            dhcp_snooping: false,
            poe: DEFAULT_POE_MODE.into(),
            flow_control: false,
            routed: false,
            isolated: false,
            ping_watchdog: None,
            sfp: None,
        }
    }
}

impl PortConfig {
    pub fn is_poe_active(&self) -> bool {
        self.poe == POE_MODE_ACTIVE
    }

    pub fn is_sfp_port(&self) -> bool {
        self.sfp.is_some()
    }
}

// ── LAG section ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LagMemberInterface {
    pub id: String,
    pub name: String,
    pub mac: String,
    #[serde(rename = "type")]
    pub kind: InterfaceType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LagConfig {
    pub stp: StpConfig,
    pub dhcp_snooping: bool,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub link_trap: bool,
    pub load_balance: String,
    pub interfaces: Vec<LagMemberInterface>,
}

impl LagConfig {
    pub fn member_count(&self) -> usize {
        self.interfaces.len()
    }

    /// A LAG with at least one member.
    pub fn is_active(&self) -> bool {
        !self.interfaces.is_empty()
    }
}

// ── InterfaceRole ────────────────────────────────────────────────

/// Which configuration section an interface carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InterfaceRole {
    Port(PortConfig),
    Lag(LagConfig),
    #[default]
    Neither,
}

impl InterfaceRole {
    pub fn stp(&self) -> Option<&StpConfig> {
        match self {
            Self::Port(port) => Some(&port.stp),
            Self::Lag(lag) => Some(&lag.stp),
            Self::Neither => None,
        }
    }
}

// ── EdgeSwitchInterface ──────────────────────────────────────────

/// Wire shape of one interface document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct RawInterface {
    identification: InterfaceIdentification,
    status: InterfaceStatus,
    addresses: Vec<InterfaceAddress>,
    #[serde(
        deserialize_with = "non_empty_object",
        skip_serializing_if = "Option::is_none"
    )]
    port: Option<PortConfig>,
    #[serde(
        deserialize_with = "non_empty_object",
        skip_serializing_if = "Option::is_none"
    )]
    lag: Option<LagConfig>,
}

impl From<RawInterface> for EdgeSwitchInterface {
    fn from(raw: RawInterface) -> Self {
        // A document with both sections is treated as a port.
        let role = match (raw.port, raw.lag) {
            (Some(port), _) => InterfaceRole::Port(port),
            (None, Some(lag)) => InterfaceRole::Lag(lag),
            (None, None) => InterfaceRole::Neither,
        };
        Self {
            identification: raw.identification,
            status: raw.status,
            addresses: raw.addresses,
            role,
        }
    }
}

impl From<EdgeSwitchInterface> for RawInterface {
    fn from(iface: EdgeSwitchInterface) -> Self {
        let (port, lag) = match iface.role {
            InterfaceRole::Port(port) => (Some(port), None),
            InterfaceRole::Lag(lag) => (None, Some(lag)),
            InterfaceRole::Neither => (None, None),
        };
        Self {
            identification: iface.identification,
            status: iface.status,
            addresses: iface.addresses,
            port,
            lag,
        }
    }
}

/// Configuration of one interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawInterface", into = "RawInterface")]
pub struct EdgeSwitchInterface {
    pub identification: InterfaceIdentification,
    pub status: InterfaceStatus,
    pub addresses: Vec<InterfaceAddress>,
    pub role: InterfaceRole,
}

impl EdgeSwitchInterface {
    pub fn id(&self) -> &str {
        &self.identification.id
    }

    pub fn name(&self) -> &str {
        &self.identification.name
    }

    /// Declared type is `port`.
    pub fn is_port(&self) -> bool {
        self.identification.kind == InterfaceType::Port
    }

    /// Declared type is `lag`.
    pub fn is_lag(&self) -> bool {
        self.identification.kind == InterfaceType::Lag
    }

    pub fn is_connected(&self) -> bool {
        self.status.is_connected()
    }

    pub fn port(&self) -> Option<&PortConfig> {
        match &self.role {
            InterfaceRole::Port(port) => Some(port),
            _ => None,
        }
    }

    pub fn lag(&self) -> Option<&LagConfig> {
        match &self.role {
            InterfaceRole::Lag(lag) => Some(lag),
            _ => None,
        }
    }

    pub fn is_poe_active(&self) -> bool {
        match &self.role {
            InterfaceRole::Port(port) => port.is_poe_active(),
            InterfaceRole::Lag(_) | InterfaceRole::Neither => false,
        }
    }

    pub fn is_sfp_port(&self) -> bool {
        match &self.role {
            InterfaceRole::Port(port) => port.is_sfp_port(),
            InterfaceRole::Lag(_) | InterfaceRole::Neither => false,
        }
    }

    /// STP state of whichever section is present, `"unknown"` otherwise.
    pub fn stp_state(&self) -> &str {
        self.role
            .stp()
            .map_or(STP_STATE_UNKNOWN, |stp| stp.state.as_str())
    }

    pub fn is_stp_forwarding(&self) -> bool {
        self.role.stp().is_some_and(StpConfig::is_forwarding)
    }

    pub fn has_addresses(&self) -> bool {
        !self.addresses.is_empty()
    }

    /// First address in document order.
    pub fn primary_address(&self) -> Option<&InterfaceAddress> {
        self.addresses.first()
    }
}

// ── EdgeSwitchInterfaceConfig ────────────────────────────────────

/// All interfaces in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeSwitchInterfaceConfig {
    pub interfaces: Vec<EdgeSwitchInterface>,
}

impl EdgeSwitchInterfaceConfig {
    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EdgeSwitchInterface> {
        self.interfaces.iter()
    }

    /// Linear scan by interface id.
    pub fn interface(&self, id: &str) -> Option<&EdgeSwitchInterface> {
        self.iter().find(|i| i.id() == id)
    }

    pub fn ports(&self) -> impl Iterator<Item = &EdgeSwitchInterface> {
        self.iter().filter(|i| i.is_port())
    }

    pub fn lags(&self) -> impl Iterator<Item = &EdgeSwitchInterface> {
        self.iter().filter(|i| i.is_lag())
    }

    pub fn connected(&self) -> impl Iterator<Item = &EdgeSwitchInterface> {
        self.iter().filter(|i| i.is_connected())
    }

    pub fn poe_active(&self) -> impl Iterator<Item = &EdgeSwitchInterface> {
        self.iter().filter(|i| i.is_poe_active())
    }

    pub fn sfp(&self) -> impl Iterator<Item = &EdgeSwitchInterface> {
        self.iter().filter(|i| i.is_sfp_port())
    }

    /// LAG-typed interfaces whose LAG section has members.
    pub fn active_lags(&self) -> impl Iterator<Item = &EdgeSwitchInterface> {
        self.lags()
            .filter(|i| i.lag().is_some_and(LagConfig::is_active))
    }

    pub fn with_addresses(&self) -> impl Iterator<Item = &EdgeSwitchInterface> {
        self.iter().filter(|i| i.has_addresses())
    }

    /// Human-facing label for an interface id: its trimmed name, or
    /// `LAG <id>` / `Port <id>` when the name is blank or the id unknown.
    pub fn display_name(&self, id: &str) -> String {
        match self.interface(id) {
            Some(iface) if !iface.name().trim().is_empty() => iface.name().trim().to_owned(),
            Some(iface) if iface.is_lag() => format!("LAG {id}"),
            _ => format!("Port {id}"),
        }
    }
}

impl<'a> IntoIterator for &'a EdgeSwitchInterfaceConfig {
    type Item = &'a EdgeSwitchInterface;
    type IntoIter = std::slice::Iter<'a, EdgeSwitchInterface>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn sample() -> EdgeSwitchInterfaceConfig {
        serde_json::from_value(json!([
            {
                "identification": { "id": "0/1", "name": "Uplink", "mac": "fc:ec:da:00:00:02", "type": "port" },
                "status": { "enabled": true, "plugged": true, "currentSpeed": "1000-full",
                            "speed": "auto", "mtu": 1518 },
                "addresses": [],
                "port": {
                    "stp": { "enabled": true, "edgePort": "auto", "pathCost": 0,
                             "portPriority": 128, "state": "forwarding" },
                    "poe": "active",
                    "pingWatchdog": { "enabled": true, "address": "10.0.0.5",
                                      "failureCount": 3, "interval": 15,
                                      "offDelay": 5, "startDelay": 300 },
                    "sfp": null
                }
            },
            {
                "identification": { "id": "0/9", "name": "SFP 1", "type": "port" },
                "status": { "enabled": true, "plugged": false, "speed": "auto" },
                "port": {
                    "stp": { "state": "disabled" },
                    "sfp": { "present": true, "vendor": "UBNT", "part": "UF-MM-1G",
                             "serial": "X123", "txFault": false, "los": true }
                }
            },
            {
                "identification": { "id": "3/1", "name": "LAG 1", "type": "lag" },
                "status": { "enabled": true, "plugged": true },
                "lag": {
                    "stp": { "state": "forwarding" },
                    "static": true,
                    "linkTrap": true,
                    "loadBalance": "src-dst-mac",
                    "interfaces": [
                        { "id": "0/3", "name": "Port 3", "type": "port" },
                        { "id": "0/4", "name": "Port 4", "type": "port" }
                    ]
                }
            },
            {
                "identification": { "id": "3/2", "name": "LAG 2", "type": "lag" },
                "lag": { "interfaces": [] }
            },
            {
                "identification": { "id": "4/1", "name": "VLAN 1", "type": "vlan" },
                "status": { "enabled": true, "plugged": true },
                "addresses": [
                    { "type": "static", "version": "v4", "cidr": "10.0.0.254/24",
                      "eui64": false, "origin": "manual" },
                    { "type": "dhcp", "version": "v6", "cidr": "fe80::1/64" }
                ]
            }
        ]))
        .unwrap()
    }

    #[test]
    fn role_follows_section_presence() {
        let config = sample();
        assert!(matches!(config.interface("0/1").unwrap().role, InterfaceRole::Port(_)));
        assert!(matches!(config.interface("3/1").unwrap().role, InterfaceRole::Lag(_)));
        assert_eq!(config.interface("4/1").unwrap().role, InterfaceRole::Neither);
    }

    #[test]
    fn neither_section_yields_unknown_stp() {
        let iface: EdgeSwitchInterface = serde_json::from_value(json!({
            "identification": { "id": "0/5", "type": "port" }
        }))
        .unwrap();
        assert!(iface.port().is_none());
        assert!(iface.lag().is_none());
        assert_eq!(iface.stp_state(), "unknown");
        assert!(!iface.is_stp_forwarding());
        assert!(!iface.is_poe_active());
    }

    #[test]
    fn empty_sections_count_as_absent() {
        let iface: EdgeSwitchInterface = serde_json::from_value(json!({
            "identification": { "id": "0/6", "type": "port" },
            "port": {},
            "lag": null
        }))
        .unwrap();
        assert_eq!(iface.role, InterfaceRole::Neither);
    }

    #[test]
    fn port_wins_when_both_sections_present() {
        let iface: EdgeSwitchInterface = serde_json::from_value(json!({
            "port": { "stp": { "state": "blocking" } },
            "lag": { "stp": { "state": "forwarding" } }
        }))
        .unwrap();
        assert!(iface.port().is_some());
        assert_eq!(iface.stp_state(), "blocking");
    }

    #[test]
    fn port_defaults() {
        let iface: EdgeSwitchInterface = serde_json::from_value(json!({
            "port": { "flowControl": true }
        }))
        .unwrap();
        let port = iface.port().unwrap();
        assert_eq!(port.poe, DEFAULT_POE_MODE);
        assert!(port.flow_control);
        assert!(port.ping_watchdog.is_none());
        assert!(!iface.is_sfp_port());
    }

    #[test]
    fn port_section_details() {
        let config = sample();
        let uplink = config.interface("0/1").unwrap();
        assert!(uplink.is_poe_active());
        assert!(uplink.is_stp_forwarding());
        assert_eq!(uplink.status.speed_mbps(), Some(1000));
        let watchdog = uplink.port().unwrap().ping_watchdog.clone().unwrap();
        assert_eq!(watchdog.failure_count, 3);
        assert_eq!(watchdog.start_delay, 300);
        assert!(!uplink.is_sfp_port());

        let sfp_port = config.interface("0/9").unwrap();
        assert!(!sfp_port.is_connected());
        let sfp = sfp_port.port().unwrap().sfp.clone().unwrap();
        assert_eq!(sfp.part, "UF-MM-1G");
        assert_eq!(sfp.tx_fault, Some(false));
        assert_eq!(sfp.los, Some(true));
    }

    #[test]
    fn lag_section_details() {
        let config = sample();
        let lag = config.interface("3/1").unwrap().lag().unwrap();
        assert!(lag.is_static);
        assert!(lag.link_trap);
        assert_eq!(lag.load_balance, "src-dst-mac");
        assert_eq!(lag.member_count(), 2);
        assert_eq!(lag.interfaces[1].kind, InterfaceType::Port);
        assert!(lag.is_active());
    }

    #[test]
    fn filtered_views() {
        let config = sample();
        let ids = |it: Vec<&EdgeSwitchInterface>| -> Vec<String> {
            it.into_iter().map(|i| i.id().to_owned()).collect()
        };
        assert_eq!(ids(config.ports().collect()), vec!["0/1", "0/9"]);
        assert_eq!(ids(config.lags().collect()), vec!["3/1", "3/2"]);
        assert_eq!(ids(config.connected().collect()), vec!["0/1", "3/1", "4/1"]);
        assert_eq!(ids(config.poe_active().collect()), vec!["0/1"]);
        assert_eq!(ids(config.sfp().collect()), vec!["0/9"]);
        assert_eq!(ids(config.active_lags().collect()), vec!["3/1"]);
        assert_eq!(ids(config.with_addresses().collect()), vec!["4/1"]);
    }

    #[test]
    fn addresses_keep_order() {
        let config = sample();
        let vlan = config.interface("4/1").unwrap();
        assert_eq!(vlan.identification.kind, InterfaceType::Other("vlan".into()));
        assert_eq!(vlan.primary_address().unwrap().cidr, "10.0.0.254/24");
        assert_eq!(vlan.addresses[1].version, "v6");
    }

    #[test]
    fn display_names_fall_back_by_type() {
        let config: EdgeSwitchInterfaceConfig = serde_json::from_value(json!([
            { "identification": { "id": "0/1", "name": "  Uplink ", "type": "port" } },
            { "identification": { "id": "0/2", "name": "   ", "type": "port" } },
            { "identification": { "id": "3/1", "name": "", "type": "lag" } }
        ]))
        .unwrap();
        assert_eq!(config.display_name("0/1"), "Uplink");
        assert_eq!(config.display_name("0/2"), "Port 0/2");
        assert_eq!(config.display_name("3/1"), "LAG 3/1");
        assert_eq!(config.display_name("9/9"), "Port 9/9");
    }

    #[test]
    fn speed_parsing() {
        let mut status = InterfaceStatus {
            current_speed: Some("10000-full".into()),
            ..InterfaceStatus::default()
        };
        assert_eq!(status.speed_mbps(), Some(10_000));
        status.current_speed = Some("auto".into());
        assert_eq!(status.speed_mbps(), None);
        status.current_speed = Some(String::new());
        assert_eq!(status.speed_mbps(), None);
        status.current_speed = None;
        assert_eq!(status.speed_mbps(), None);
    }

    #[test]
    fn serializes_back_to_wire_shape() {
        let config = sample();
        let value = serde_json::to_value(config.interface("3/1").unwrap()).unwrap();
        assert_eq!(value["lag"]["static"], json!(true));
        assert_eq!(value["identification"]["type"], json!("lag"));
        assert!(value.get("port").is_none());
    }
}
