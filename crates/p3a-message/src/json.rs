use p3a_interfaces::MessageMetainfo;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MessageError;
use crate::year::checked_year;

/// Structured record for the conventional upload endpoint.
///
/// Field order is part of the output and must stay stable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonMessage {
    /// Year of survey.
    pub yos: i32,
    /// Year of install.
    pub yoi: i32,
    pub country_code: String,
    pub platform: String,
    pub version: String,
    pub channel: String,
    pub woi: u32,
    pub wos: u32,
    pub metric_name: String,
    pub metric_value: u64,
}

impl JsonMessage {
    /// Ordered JSON object with the record's fields.
    pub fn to_value(&self) -> Result<Value, MessageError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_string(&self) -> Result<String, MessageError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Builds the structured record for one metric sample.
///
/// # Arguments
/// * `metric_name` - Histogram name; must not be empty.
/// * `metric_value` - Bucket or sample value.
/// * `meta` - Metainfo, already passed through the anonymization policy.
///
/// # Returns
/// - `Ok(JsonMessage)` with every field populated.
/// - `Err(MessageError)` if the name is empty or a date gives an implausible year.
pub fn format_json_message(
    metric_name: &str,
    metric_value: u64,
    meta: &MessageMetainfo,
) -> Result<JsonMessage, MessageError> {
    if metric_name.is_empty() {
        return Err(MessageError::EmptyMetricName);
    }

    let yos = checked_year("yos", &meta.date_of_survey)?;
    let yoi = checked_year("yoi", &meta.date_of_install)?;

    log::debug!("Formatting JSON message for {}={}", metric_name, metric_value);

    Ok(JsonMessage {
        yos,
        yoi,
        country_code: meta.country_code.clone(),
        platform: meta.platform.clone(),
        version: meta.version.clone(),
        channel: meta.channel.clone(),
        woi: meta.woi,
        wos: meta.wos,
        metric_name: metric_name.to_string(),
        metric_value,
    })
}
