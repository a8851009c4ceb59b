//! Execution records read from the metadata store.

use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::state::ExecutionState;
use crate::error::{Error, Result};

/// Custom property naming the pipeline task of an execution.
const TASK_NAME_PROPERTY: &str = "task_name";
/// Custom property naming the pod of an execution.
const POD_NAME_PROPERTY: &str = "pod_name";

/// One execution as recorded in the metadata store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRecord {
    /// Execution id.
    #[serde(default, deserialize_with = "crate::de::lenient_i64")]
    pub id: Option<i64>,
    /// Last known state.
    #[serde(default)]
    pub last_known_state: ExecutionState,
    /// Creation time in milliseconds since the Unix epoch.
    #[serde(default, deserialize_with = "crate::de::lenient_i64")]
    pub create_time_since_epoch: Option<i64>,
    /// Last update time in milliseconds since the Unix epoch.
    #[serde(default, deserialize_with = "crate::de::lenient_i64")]
    pub last_update_time_since_epoch: Option<i64>,
    /// Custom properties set by the driver and launcher.
    #[serde(default)]
    pub custom_properties: BTreeMap<String, PropertyValue>,
}

impl ExecutionRecord {
    /// Decodes a list of execution records from JSON.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        serde_json::from_str(json).map_err(|e| Error::decode("execution records", e))
    }

    /// Sets a string custom property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_properties
            .insert(key.into(), PropertyValue::string(value));
        self
    }

    /// Returns the pipeline task this execution ran.
    pub fn task_name(&self) -> Option<&str> {
        self.string_property(TASK_NAME_PROPERTY)
    }

    /// Returns the pod this execution ran in.
    pub fn pod_name(&self) -> Option<&str> {
        self.string_property(POD_NAME_PROPERTY)
    }

    /// Returns the creation time.
    pub fn created_at(&self) -> Option<Timestamp> {
        self.create_time_since_epoch.and_then(from_epoch_millis)
    }

    /// Returns the last update time.
    pub fn updated_at(&self) -> Option<Timestamp> {
        self.last_update_time_since_epoch.and_then(from_epoch_millis)
    }

    fn string_property(&self, key: &str) -> Option<&str> {
        self.custom_properties
            .get(key)
            .and_then(|value| value.string_value.as_deref())
    }
}

/// Converts epoch milliseconds, treating zero as unset.
fn from_epoch_millis(millis: i64) -> Option<Timestamp> {
    if millis == 0 {
        return None;
    }
    Timestamp::from_millisecond(millis).ok()
}

/// A custom property value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyValue {
    /// String value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    /// Integer value.
    #[serde(
        default,
        deserialize_with = "crate::de::lenient_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub int_value: Option<i64>,
    /// Floating point value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_value: Option<f64>,
    /// Boolean value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bool_value: Option<bool>,
}

impl PropertyValue {
    /// Creates a string value.
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            string_value: Some(value.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_execution_record_decode() {
        let records = ExecutionRecord::list_from_json(
            &json!([
                {
                    "id": "12",
                    "lastKnownState": "COMPLETE",
                    "createTimeSinceEpoch": "1704067200000",
                    "lastUpdateTimeSinceEpoch": 1704153600000i64,
                    "customProperties": {
                        "task_name": { "stringValue": "train" },
                        "pod_name": { "stringValue": "train-pod" },
                        "attempt": { "intValue": "2" }
                    }
                }
            ])
            .to_string(),
        )
        .unwrap();

        let record = &records[0];
        assert_eq!(record.id, Some(12));
        assert_eq!(record.last_known_state, ExecutionState::Complete);
        assert_eq!(record.task_name(), Some("train"));
        assert_eq!(record.pod_name(), Some("train-pod"));
        assert_eq!(record.custom_properties["attempt"].int_value, Some(2));
        assert_eq!(
            record.created_at(),
            Some("2024-01-01T00:00:00Z".parse::<Timestamp>().unwrap())
        );
        assert_eq!(
            record.updated_at(),
            Some("2024-01-02T00:00:00Z".parse::<Timestamp>().unwrap())
        );
    }

    #[test]
    fn test_zero_epoch_is_unset() {
        let record = ExecutionRecord {
            create_time_since_epoch: Some(0),
            ..ExecutionRecord::default()
        };
        assert!(record.created_at().is_none());
        assert!(record.updated_at().is_none());
        assert!(record.task_name().is_none());
    }
}
