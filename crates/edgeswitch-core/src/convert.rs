// ── API-to-domain conversions ──
//
// Bridges the raw `serde_json::Value` documents returned by
// `edgeswitch_api` into the typed model. `null` members are dropped before
// decoding so they take the same defaults as missing keys.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::CoreError;
use crate::model::{EdgeSwitchDevice, EdgeSwitchInterface, EdgeSwitchInterfaceConfig, EdgeSwitchStatistics};

// ── Helpers ────────────────────────────────────────────────────────

/// Remove `null` members from every object, recursively.
fn prune_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(prune_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(prune_nulls),
        _ => {}
    }
}

fn decode<T: DeserializeOwned>(document: &'static str, mut value: Value) -> Result<T, CoreError> {
    prune_nulls(&mut value);
    serde_json::from_value(value).map_err(|e| CoreError::Decode {
        document,
        message: e.to_string(),
    })
}

// ── Entry points ───────────────────────────────────────────────────

/// Map a device-info document.
pub fn device_from_json(value: Value) -> Result<EdgeSwitchDevice, CoreError> {
    decode("device info", value)
}

/// Map one statistics sample.
pub fn statistics_from_json(value: Value) -> Result<EdgeSwitchStatistics, CoreError> {
    decode("statistics", value)
}

/// Map the first sample of a statistics list; `None` when the list is empty.
pub fn statistics_from_list(values: Vec<Value>) -> Result<Option<EdgeSwitchStatistics>, CoreError> {
    values
        .into_iter()
        .next()
        .map(statistics_from_json)
        .transpose()
}

/// Map an interface list, keeping document order.
pub fn interfaces_from_json(values: Vec<Value>) -> Result<EdgeSwitchInterfaceConfig, CoreError> {
    let interfaces = values
        .into_iter()
        .map(|v| decode::<EdgeSwitchInterface>("interface", v))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(EdgeSwitchInterfaceConfig { interfaces })
}
