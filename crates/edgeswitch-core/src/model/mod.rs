// ── Domain model ──
//
// Typed views over the three EdgeSwitch documents. Every struct uses
// container-level `#[serde(default)]`: a missing key takes the documented
// default. Numeric readings and code lists go through the `lenient_*`
// helpers below, so a value of an unexpected shape falls back to the
// default instead of failing the whole document.

pub mod device;
pub mod interface;
pub mod statistics;
pub mod summary;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub use device::{DeviceCapabilities, DeviceIdentification, EdgeSwitchDevice, InterfaceInfo};
pub use interface::{
    EdgeSwitchInterface, EdgeSwitchInterfaceConfig, InterfaceAddress, InterfaceIdentification,
    InterfaceRole, InterfaceStatus, InterfaceType, LagConfig, LagMemberInterface,
    PingWatchdogConfig, PortConfig, SfpConfig, StpConfig,
};
pub use statistics::{
    CpuInfo, DeviceStatistics, EdgeSwitchStatistics, FanSpeedInfo, InterfaceStatistics,
    InterfaceStatisticsInfo, RamInfo, SfpInfo, TemperatureInfo,
};
pub use summary::SwitchSummary;

/// Deserialize an optional nested object, treating `null` and `{}` as absent.
pub(crate) fn non_empty_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) if map.is_empty() => Ok(None),
        Some(value) => T::deserialize(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Any JSON number as a non-negative integer.
///
/// Fractions truncate, negatives and non-numbers become 0, numeric strings
/// are parsed.
#[allow(
    clippy::as_conversions,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn number_to_u64(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f as u64)
            })
            .unwrap_or(0),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .map_or(0, |f| number_to_u64(&Value::from(f))),
        _ => 0,
    }
}

pub(crate) fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|v| number_to_u64(&v))
}

/// Like [`lenient_u64`], saturating at `u32::MAX`.
pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_u64(deserializer).map(|v| u32::try_from(v).unwrap_or(u32::MAX))
}

#[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .unwrap_or(0),
        _ => 0,
    })
}

/// Any finite JSON number or numeric string; 0.0 otherwise.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(parsed.filter(|f: &f64| f.is_finite()).unwrap_or(0.0))
}

/// A list of scalars as strings. Numbers and booleans are stringified,
/// anything else is skipped; a non-list becomes an empty list.
pub(crate) fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .collect())
}
