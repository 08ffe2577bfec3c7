//! Directory and error records: states, zones and the API's error payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::decode::{
    expect_object, impl_try_from_value, required_str, required_str_list, DecodeError, FromJson,
};

/// Error body returned by the API, either with a failing HTTP status or
/// embedded in a `200` response as `{"status": "error", ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct ApiErrorPayload {
    status: String,
    message: String,
}

impl ApiErrorPayload {
    /// Value of `status` that marks an application-level failure.
    pub const ERROR_STATUS: &'static str = "error";

    pub fn new(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true when `value` is an object whose `status` is `"error"`.
    pub fn is_error_marker(value: &Value) -> bool {
        value
            .get("status")
            .and_then(Value::as_str)
            .is_some_and(|status| status == Self::ERROR_STATUS)
    }
}

impl FromJson for ApiErrorPayload {
    fn from_json(value: &Value) -> Result<Self, DecodeError> {
        let obj = expect_object(value, "an error payload object")?;
        Ok(Self {
            status: required_str(obj, "status")?,
            message: required_str(obj, "message")?,
        })
    }
}

/// A Malaysian state (negeri) and the zone codes it contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct StateEntry {
    #[serde(rename = "negeri")]
    state_name: String,
    #[serde(rename = "zones")]
    zone_codes: Vec<String>,
}

impl StateEntry {
    pub fn new(state_name: impl Into<String>, zone_codes: Vec<String>) -> Self {
        Self {
            state_name: state_name.into(),
            zone_codes,
        }
    }

    pub fn state_name(&self) -> &str {
        &self.state_name
    }

    /// Zone codes in the order the API listed them.
    pub fn zone_codes(&self) -> &[String] {
        &self.zone_codes
    }

    /// Case-insensitive membership test (`SGR01` matches `sgr01`).
    pub fn contains_zone(&self, code: &str) -> bool {
        self.zone_codes.iter().any(|z| z.eq_ignore_ascii_case(code))
    }
}

impl FromJson for StateEntry {
    fn from_json(value: &Value) -> Result<Self, DecodeError> {
        let obj = expect_object(value, "a state object")?;
        Ok(Self {
            state_name: required_str(obj, "negeri")?,
            zone_codes: required_str_list(obj, "zones")?,
        })
    }
}

/// One row of the zone directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct ZoneDirectoryEntry {
    #[serde(rename = "jakimCode")]
    jakim_code: String,
    #[serde(rename = "negeri")]
    state_name: String,
    #[serde(rename = "daerah")]
    district_label: String,
}

impl ZoneDirectoryEntry {
    pub fn new(
        jakim_code: impl Into<String>,
        state_name: impl Into<String>,
        district_label: impl Into<String>,
    ) -> Self {
        Self {
            jakim_code: jakim_code.into(),
            state_name: state_name.into(),
            district_label: district_label.into(),
        }
    }

    /// JAKIM zone code, e.g. `sgr01`.
    pub fn jakim_code(&self) -> &str {
        &self.jakim_code
    }

    pub fn state_name(&self) -> &str {
        &self.state_name
    }

    /// Comma separated list of districts covered by the zone.
    pub fn district_label(&self) -> &str {
        &self.district_label
    }
}

impl FromJson for ZoneDirectoryEntry {
    fn from_json(value: &Value) -> Result<Self, DecodeError> {
        let obj = expect_object(value, "a zone object")?;
        Ok(Self {
            jakim_code: required_str(obj, "jakimCode")?,
            state_name: required_str(obj, "negeri")?,
            district_label: required_str(obj, "daerah")?,
        })
    }
}

impl_try_from_value!(ApiErrorPayload, StateEntry, ZoneDirectoryEntry);
