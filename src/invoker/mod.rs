//! Outbound plugin calls with the size-bounded truncation policy.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::provider::http::shared_client;

/// Sentinel returned for any failed plugin call. Callers treat it as a
/// completed tool result, never as a driver-level error. The fullwidth colon
/// is part of the established value.
pub const INVOCATION_ERROR: &str = "error：404";

/// Serialized responses longer than this get truncated.
pub const MAX_RESPONSE_CHARS: usize = 1000;

/// How many trailing keys survive truncation.
pub const TRUNCATE_KEYS: usize = 2;

/// Performs GET requests against the plugin host.
pub struct PluginInvoker {
    base_url: String,
}

impl PluginInvoker {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Call `<base_url><path>` with `params` as query-string parameters.
    ///
    /// Infallible by contract: any network failure or non-JSON body comes
    /// back as the [`INVOCATION_ERROR`] sentinel string.
    pub async fn invoke(&self, path: &str, params: &Map<String, Value>) -> Value {
        let url = format!("{}{}", self.base_url, path);
        let query = params
            .iter()
            .map(|(k, v)| (k.as_str(), query_value(v)))
            .collect::<Vec<_>>();

        let response = async {
            let resp = shared_client().get(&url).query(&query).send().await?;
            resp.json::<Value>().await
        }
        .await;

        match response {
            Ok(value) => {
                if serde_json::to_string(&value).map(|s| s.len()).unwrap_or(0)
                    > MAX_RESPONSE_CHARS
                {
                    match value {
                        Value::Object(map) => {
                            debug!(path, "plugin response truncated");
                            Value::Object(truncate_tail_keys(map, TRUNCATE_KEYS))
                        }
                        // Oversized non-object payloads have no keys to keep.
                        _ => Value::String(INVOCATION_ERROR.to_string()),
                    }
                } else {
                    value
                }
            }
            Err(err) => {
                warn!(path, error = %err, "plugin call failed");
                Value::String(INVOCATION_ERROR.to_string())
            }
        }
    }
}

/// Keep the last `count` keys of `map`, emitted in reverse-encounter order
/// (the final key of the original object comes first).
fn truncate_tail_keys(map: Map<String, Value>, count: usize) -> Map<String, Value> {
    let mut truncated = Map::new();
    for (key, value) in map.into_iter().rev().take(count) {
        truncated.insert(key, value);
    }
    truncated
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
