// ── Device and interface counters (`GET /api/v1.0/statistics`) ──

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{lenient_f64, lenient_i64, lenient_u32, lenient_u64, non_empty_object};

pub const TEMPERATURE_TYPE_BOARD: &str = "board";
pub const TEMPERATURE_TYPE_OTHER: &str = "other";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuInfo {
    pub identifier: String,
    /// Percent.
    #[serde(deserialize_with = "lenient_f64")]
    pub usage: f64,
}

/// Memory figures in the units the switch reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RamInfo {
    #[serde(deserialize_with = "lenient_u64")]
    pub usage: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub free: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub total: u64,
}

impl RamInfo {
    pub fn used(&self) -> u64 {
        self.total.saturating_sub(self.free)
    }

    /// `used / total * 100`, or 0 when `total` is 0.
    #[allow(clippy::as_conversions, clippy::cast_precision_loss)]
    pub fn usage_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.used() as f64 / self.total as f64 * 100.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Degrees Celsius.
    #[serde(deserialize_with = "lenient_f64")]
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FanSpeedInfo {
    pub name: String,
    /// RPM.
    #[serde(deserialize_with = "lenient_u32")]
    pub value: u32,
}

/// Optical module diagnostics. Every reading is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SfpInfo {
    pub temperature: Option<f64>,
    pub voltage: Option<f64>,
    pub current: Option<f64>,
    pub rx_power: Option<f64>,
    pub tx_power: Option<f64>,
}

/// Per-interface counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InterfaceStatistics {
    #[serde(deserialize_with = "lenient_u64")]
    pub dropped: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub errors: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub tx_errors: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub rx_errors: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub rate: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub tx_rate: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub rx_rate: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub bytes: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub tx_bytes: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub rx_bytes: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub packets: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub tx_packets: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub rx_packets: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub pps: u64,
    #[serde(rename = "txPPS", deserialize_with = "lenient_u64")]
    pub tx_pps: u64,
    #[serde(rename = "rxPPS", deserialize_with = "lenient_u64")]
    pub rx_pps: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub tx_jumbo: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub rx_jumbo: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub tx_flow_ctrl: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub rx_flow_ctrl: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub tx_broadcast: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub rx_broadcast: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub tx_multicast: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub rx_multicast: u64,
    /// Watts drawn by the attached PoE device.
    #[serde(deserialize_with = "lenient_f64")]
    pub poe_power: f64,
    #[serde(
        deserialize_with = "non_empty_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub sfp: Option<SfpInfo>,
}

impl InterfaceStatistics {
    pub fn has_traffic(&self) -> bool {
        self.rate > 0 || self.bytes > 0
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0 || self.dropped > 0
    }

    pub fn is_poe_active(&self) -> bool {
        self.poe_power > 0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceStatisticsInfo {
    pub id: String,
    pub name: String,
    pub statistics: InterfaceStatistics,
}

/// Switch-wide health readings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceStatistics {
    pub cpu: Vec<CpuInfo>,
    pub ram: RamInfo,
    pub temperatures: Vec<TemperatureInfo>,
    /// Passed through untyped; the switch has not been seen to fill these.
    pub power: Vec<Value>,
    pub storage: Vec<Value>,
    pub fan_speeds: Vec<FanSpeedInfo>,
    /// Seconds.
    #[serde(deserialize_with = "lenient_u64")]
    pub uptime: u64,
}

impl DeviceStatistics {
    /// Arithmetic mean over all CPUs, 0 when none are reported.
    #[allow(clippy::as_conversions, clippy::cast_precision_loss)]
    pub fn average_cpu_usage(&self) -> f64 {
        if self.cpu.is_empty() {
            return 0.0;
        }
        self.cpu.iter().map(|c| c.usage).sum::<f64>() / self.cpu.len() as f64
    }

    /// Hottest sensor, 0 when none are reported.
    pub fn max_temperature(&self) -> f64 {
        self.temperatures
            .iter()
            .map(|t| t.value)
            .reduce(f64::max)
            .unwrap_or(0.0)
    }

    pub fn board_temperatures(&self) -> impl Iterator<Item = &TemperatureInfo> {
        self.temperatures
            .iter()
            .filter(|t| t.kind == TEMPERATURE_TYPE_BOARD)
    }

    /// Sensors of type `other` whose name mentions PoE.
    pub fn poe_temperatures(&self) -> impl Iterator<Item = &TemperatureInfo> {
        self.temperatures
            .iter()
            .filter(|t| t.kind == TEMPERATURE_TYPE_OTHER && t.name.contains("PoE"))
    }
}

/// One statistics sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeSwitchStatistics {
    #[serde(deserialize_with = "lenient_i64")]
    pub timestamp: i64,
    pub device: DeviceStatistics,
    pub interfaces: Vec<InterfaceStatisticsInfo>,
}

impl EdgeSwitchStatistics {
    /// Linear scan by interface id.
    pub fn interface(&self, id: &str) -> Option<&InterfaceStatisticsInfo> {
        self.interfaces.iter().find(|i| i.id == id)
    }

    /// Interfaces with a non-zero rate or byte count.
    pub fn active_interfaces(&self) -> impl Iterator<Item = &InterfaceStatisticsInfo> {
        self.interfaces.iter().filter(|i| i.statistics.has_traffic())
    }

    pub fn poe_interfaces(&self) -> impl Iterator<Item = &InterfaceStatisticsInfo> {
        self.interfaces
            .iter()
            .filter(|i| i.statistics.is_poe_active())
    }

    pub fn interfaces_with_errors(&self) -> impl Iterator<Item = &InterfaceStatisticsInfo> {
        self.interfaces.iter().filter(|i| i.statistics.has_errors())
    }

    pub fn total_poe_power(&self) -> f64 {
        self.interfaces.iter().map(|i| i.statistics.poe_power).sum()
    }

    pub fn total_traffic_rate(&self) -> u64 {
        self.interfaces
            .iter()
            .map(|i| i.statistics.rate)
            .fold(0, u64::saturating_add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> EdgeSwitchStatistics {
        serde_json::from_value(json!({
            "timestamp": 1_700_000_000,
            "device": {
                "cpu": [
                    { "identifier": "ARMv7", "usage": 10 },
                    { "identifier": "ARMv7", "usage": 30 }
                ],
                "ram": { "usage": 50, "free": 256, "total": 1024 },
                "temperatures": [
                    { "name": "Board (CPU)", "type": "board", "value": 48.0 },
                    { "name": "Board (PHY)", "type": "board", "value": 52.5 },
                    { "name": "PoE-01", "type": "other", "value": 44.0 },
                    { "name": "Fan", "type": "other", "value": 30.0 }
                ],
                "power": [],
                "storage": [],
                "fanSpeeds": [{ "name": "Fan 1", "value": 3200 }],
                "uptime": 86_400
            },
            "interfaces": [
                {
                    "id": "0/1",
                    "name": "Port 1",
                    "statistics": {
                        "rate": 1200, "bytes": 99_999, "poePower": 4.5,
                        "txPPS": 7, "rxPPS": 3, "sfp": {}
                    }
                },
                {
                    "id": "0/2",
                    "name": "Port 2",
                    "statistics": { "dropped": 2 }
                },
                {
                    "id": "0/9",
                    "name": "SFP 1",
                    "statistics": {
                        "rate": 800, "bytes": 10,
                        "sfp": { "temperature": 35.2, "rxPower": -5.1, "txPower": -4.9 }
                    }
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn cpu_average_and_empty_guard() {
        let stats = sample();
        assert_eq!(stats.device.average_cpu_usage(), 20.0);
        assert_eq!(DeviceStatistics::default().average_cpu_usage(), 0.0);
    }

    #[test]
    fn ram_derivations() {
        let ram = sample().device.ram;
        assert_eq!(ram.used(), 768);
        assert_eq!(ram.usage_percent(), 75.0);
    }

    #[test]
    fn ram_usage_percent_is_zero_for_zero_total() {
        let ram = RamInfo {
            usage: 0,
            free: 10,
            total: 0,
        };
        let pct = ram.usage_percent();
        assert_eq!(pct, 0.0);
        assert!(pct.is_finite());
        assert_eq!(ram.used(), 0);
    }

    #[test]
    fn temperature_views() {
        let device = sample().device;
        assert_eq!(device.max_temperature(), 52.5);
        assert_eq!(device.board_temperatures().count(), 2);
        let poe: Vec<_> = device.poe_temperatures().map(|t| t.name.as_str()).collect();
        assert_eq!(poe, vec!["PoE-01"]);
        assert_eq!(DeviceStatistics::default().max_temperature(), 0.0);
    }

    #[test]
    fn total_traffic_rate_equals_sum_of_source_rates() {
        let raw = json!({
            "interfaces": [
                { "id": "a", "statistics": { "rate": 5 } },
                { "id": "b", "statistics": { "rate": 17 } },
                { "id": "c", "statistics": {} },
                { "id": "d", "statistics": { "rate": 1_000_000 } }
            ]
        });
        let expected: u64 = raw["interfaces"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["statistics"]["rate"].as_u64().unwrap_or(0))
            .sum();
        let stats: EdgeSwitchStatistics = serde_json::from_value(raw).unwrap();
        assert_eq!(stats.total_traffic_rate(), expected);
    }

    #[test]
    fn interface_aggregates_and_filters() {
        let stats = sample();
        assert_eq!(stats.total_traffic_rate(), 2000);
        assert_eq!(stats.total_poe_power(), 4.5);
        assert_eq!(stats.active_interfaces().count(), 2);
        assert_eq!(stats.poe_interfaces().count(), 1);
        let erroring: Vec<_> = stats.interfaces_with_errors().map(|i| i.id.as_str()).collect();
        assert_eq!(erroring, vec!["0/2"]);
    }

    #[test]
    fn sfp_diagnostics_empty_object_is_absent() {
        let stats = sample();
        let port1 = stats.interface("0/1").unwrap();
        assert!(port1.statistics.sfp.is_none());
        assert_eq!(port1.statistics.tx_pps, 7);

        let sfp = stats.interface("0/9").unwrap().statistics.sfp.clone().unwrap();
        assert_eq!(sfp.temperature, Some(35.2));
        assert_eq!(sfp.rx_power, Some(-5.1));
        assert_eq!(sfp.voltage, None);
    }

    #[test]
    fn total_traffic_rate_saturates() {
        let stats: EdgeSwitchStatistics = serde_json::from_value(json!({
            "interfaces": [
                { "id": "0/1", "statistics": { "rate": u64::MAX / 2 + 1 } },
                { "id": "0/2", "statistics": { "rate": u64::MAX / 2 + 1 } }
            ]
        }))
        .unwrap();
        assert_eq!(stats.total_traffic_rate(), u64::MAX);
    }

    #[test]
    fn empty_sample_aggregates_are_zero() {
        let stats = EdgeSwitchStatistics::default();
        assert_eq!(stats.total_traffic_rate(), 0);
        assert_eq!(stats.total_poe_power(), 0.0);
        assert!(stats.interface("0/1").is_none());
    }
}
