// ── Switch summary ──
//
// Flat sensor-style readings derived from one snapshot. Missing statistics
// read as zero.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::coordinator::Snapshot;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchSummary {
    pub connected: bool,
    pub model: String,
    pub firmware_version: String,

    // ── Capabilities ─────────────────────────────────────────────────
    pub port_count: usize,
    pub poe_port_count: usize,
    pub sfp_port_count: usize,
    pub lag_count: usize,
    pub service_count: usize,

    // ── Health ───────────────────────────────────────────────────────
    pub cpu_usage_percent: f64,
    pub memory_usage_percent: f64,
    pub max_temperature_celsius: f64,
    pub uptime_secs: u64,

    // ── Traffic and power ────────────────────────────────────────────
    pub total_traffic_rate: u64,
    pub total_poe_power_watts: f64,

    // ── Interfaces ───────────────────────────────────────────────────
    pub connected_interfaces: usize,
    pub poe_active_interfaces: usize,
    pub active_lags: usize,
    pub interfaces_with_errors: usize,

    pub last_update: DateTime<Utc>,
}

impl SwitchSummary {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let device = &snapshot.device;
        let interfaces = &snapshot.interfaces;
        let stats = snapshot.statistics.as_ref();

        Self {
            connected: snapshot.connected,
            model: device.identification.model.clone(),
            firmware_version: device.identification.firmware_version.clone(),
            port_count: device.port_count(),
            poe_port_count: device.poe_port_count(),
            sfp_port_count: device.sfp_port_count(),
            lag_count: device.lag_count(),
            service_count: device.capabilities.services.len(),
            cpu_usage_percent: stats.map_or(0.0, |s| s.device.average_cpu_usage()),
            memory_usage_percent: stats.map_or(0.0, |s| s.device.ram.usage_percent()),
            max_temperature_celsius: stats.map_or(0.0, |s| s.device.max_temperature()),
            uptime_secs: stats.map_or(0, |s| s.device.uptime),
            total_traffic_rate: stats.map_or(0, |s| s.total_traffic_rate()),
            total_poe_power_watts: stats.map_or(0.0, |s| s.total_poe_power()),
            connected_interfaces: interfaces.connected().count(),
            poe_active_interfaces: interfaces.poe_active().count(),
            active_lags: interfaces.active_lags().count(),
            interfaces_with_errors: stats.map_or(0, |s| s.interfaces_with_errors().count()),
            last_update: snapshot.last_update,
        }
    }
}
