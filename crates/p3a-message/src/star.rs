//! Flattened records for the layered secret-sharing submission scheme.
//!
//! The scheme splits a record into layers and cannot parse nested data, so
//! the record is a fixed sequence of `key<kv>value` pairs joined by `<layer>`.
//! With the default separators:
//!
//! ```text
//! metric_name|Brave.Core.Usage;metric_value|3;version|1.48.171;yoi|2022;...
//! ```
//!
//! Both separators are a contract with the aggregation service. Values are
//! not escaped.

use p3a_core::config::{DEFAULT_KEY_VALUE_SEPARATOR, DEFAULT_LAYER_SEPARATOR, StarConfig};
use p3a_interfaces::{MessageMetainfo, STAR_ATTRIBUTE_KEYS, SeparatorPolicy};

use crate::error::MessageError;
use crate::year::checked_year;

pub const STAR_ATTRIBUTE_COUNT: usize = 8;

/// Attribute pairs in wire order.
pub type StarAttributes = [(&'static str, String); STAR_ATTRIBUTE_COUNT];

const ATTRIBUTE_KEYS: [&str; STAR_ATTRIBUTE_COUNT] = STAR_ATTRIBUTE_KEYS;

/// Separators and collision handling for flattened records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarFormat {
    key_value_separator: String,
    layer_separator: String,
    policy: SeparatorPolicy,
}

impl Default for StarFormat {
    fn default() -> Self {
        Self {
            key_value_separator: DEFAULT_KEY_VALUE_SEPARATOR.to_string(),
            layer_separator: DEFAULT_LAYER_SEPARATOR.to_string(),
            policy: SeparatorPolicy::Permissive,
        }
    }
}

impl StarFormat {
    pub fn new(
        key_value_separator: impl Into<String>,
        layer_separator: impl Into<String>,
        policy: SeparatorPolicy,
    ) -> Result<Self, MessageError> {
        Self::from_config(&StarConfig {
            key_value_separator: key_value_separator.into(),
            layer_separator: layer_separator.into(),
            separator_policy: policy,
        })
    }

    /// Builds the format from configuration, applying the same separator
    /// rules as [`StarConfig::validate`].
    pub fn from_config(config: &StarConfig) -> Result<Self, MessageError> {
        config
            .validate()
            .map_err(|e| MessageError::InvalidSeparators(e.to_string()))?;

        Ok(Self {
            key_value_separator: config.key_value_separator.clone(),
            layer_separator: config.layer_separator.clone(),
            policy: config.separator_policy,
        })
    }

    pub fn key_value_separator(&self) -> &str {
        &self.key_value_separator
    }

    pub fn layer_separator(&self) -> &str {
        &self.layer_separator
    }

    pub fn policy(&self) -> SeparatorPolicy {
        self.policy
    }

    fn collides(&self, value: &str) -> bool {
        value.contains(self.key_value_separator.as_str())
            || value.contains(self.layer_separator.as_str())
    }

    fn check_collisions(&self, attributes: &StarAttributes) -> Result<(), MessageError> {
        for (key, value) in attributes.iter() {
            if !self.collides(value) {
                continue;
            }
            match self.policy {
                SeparatorPolicy::Permissive => {
                    log::warn!(
                        "Star attribute '{}' contains a separator, record may not split cleanly: {:?}",
                        key,
                        value
                    );
                }
                SeparatorPolicy::Reject => {
                    return Err(MessageError::SeparatorCollision {
                        key: *key,
                        value: value.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn join(&self, attributes: &StarAttributes) -> String {
        attributes
            .iter()
            .map(|(key, value)| [*key, value.as_str()].join(self.key_value_separator.as_str()))
            .collect::<Vec<_>>()
            .join(self.layer_separator.as_str())
    }
}

/// The eight attribute pairs of a flattened record, in wire order.
pub fn star_attributes(
    metric_name: &str,
    metric_value: u64,
    meta: &MessageMetainfo,
) -> Result<StarAttributes, MessageError> {
    if metric_name.is_empty() {
        return Err(MessageError::EmptyMetricName);
    }
    let yoi = checked_year("yoi", &meta.date_of_install)?;

    let [k_name, k_value, k_version, k_yoi, k_channel, k_platform, k_country, k_woi] =
        ATTRIBUTE_KEYS;
    Ok([
        (k_name, metric_name.to_string()),
        (k_value, metric_value.to_string()),
        (k_version, meta.version.clone()),
        (k_yoi, yoi.to_string()),
        (k_channel, meta.channel.clone()),
        (k_platform, meta.platform.clone()),
        (k_country, meta.country_code.clone()),
        (k_woi, meta.woi.to_string()),
    ])
}

/// Builds the flattened record for one metric sample.
///
/// # Returns
/// - `Ok(String)` with exactly [`STAR_ATTRIBUTE_COUNT`] pairs.
/// - `Err(MessageError)` on an empty name, an implausible install year, or,
///   under [`SeparatorPolicy::Reject`], a value containing a separator.
pub fn format_star_message(
    metric_name: &str,
    metric_value: u64,
    meta: &MessageMetainfo,
    format: &StarFormat,
) -> Result<String, MessageError> {
    let attributes = star_attributes(metric_name, metric_value, meta)?;
    format.check_collisions(&attributes)?;

    log::debug!("Formatting star message for {}={}", metric_name, metric_value);
    Ok(format.join(&attributes))
}
