use p3a_core::{Config, ReportingConfig};
use p3a_interfaces::{MessageMetainfo, SubscriptionId};
use p3a_message::{
    JsonMessage, StarFormat, apply_anonymization_policy, format_json_message, format_star_message,
};

use crate::error::ClientError;
use crate::subscription::SubscriberList;

/// A formatted record, ready to hand to its upload transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportedMessage {
    /// Structured record for the conventional endpoint.
    Json(JsonMessage),
    /// Flattened record for the secret-sharing endpoint.
    Star { metric_name: String, payload: String },
}

impl ReportedMessage {
    pub fn metric_name(&self) -> &str {
        match self {
            ReportedMessage::Json(msg) => &msg.metric_name,
            ReportedMessage::Star { metric_name, .. } => metric_name,
        }
    }
}

/// Anonymizes and formats metric samples, then fans the records out to
/// subscribers.
///
/// The reporter holds no per-sample state. `report` borrows `&self`, so a
/// built reporter can be shared between threads.
#[derive(Debug)]
pub struct Reporter {
    config: ReportingConfig,
    star_format: StarFormat,
    subscribers: SubscriberList<ReportedMessage>,
}

impl Reporter {
    pub fn new(config: ReportingConfig) -> Result<Self, ClientError> {
        let star_format = StarFormat::from_config(&config.star)?;
        if !config.json_enabled && !config.star_enabled {
            log::warn!("Both JSON and star reporting are disabled, no records will be produced");
        }
        log::info!(
            "P3A reporter ready (json: {}, star: {})",
            config.json_enabled,
            config.star_enabled
        );
        Ok(Self {
            config,
            star_format,
            subscribers: SubscriberList::new(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        Self::new(config.reporting.clone())
    }

    pub fn config(&self) -> &ReportingConfig {
        &self.config
    }

    pub fn star_format(&self) -> &StarFormat {
        &self.star_format
    }

    /// Registers a consumer for every record the reporter produces.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&ReportedMessage) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Returns an anonymized copy of `meta`, leaving the caller's instance untouched.
    pub fn anonymize(&self, meta: &MessageMetainfo) -> MessageMetainfo {
        let mut meta = meta.clone();
        apply_anonymization_policy(&mut meta);
        meta
    }

    /// Formats one metric sample in every enabled format.
    ///
    /// # Returns
    /// - `Ok(Vec<ReportedMessage>)` with the JSON record first, then the star record.
    /// - `Err(ClientError)` if any format fails. Nothing is delivered to
    ///   subscribers in that case.
    pub fn report(
        &self,
        metric_name: &str,
        metric_value: u64,
        meta: &MessageMetainfo,
    ) -> Result<Vec<ReportedMessage>, ClientError> {
        let meta = self.anonymize(meta);

        let mut messages = Vec::with_capacity(2);
        if self.config.json_enabled {
            let msg = format_json_message(metric_name, metric_value, &meta).inspect_err(|e| {
                log::warn!("Dropping JSON record for {}: {}", metric_name, e);
            })?;
            messages.push(ReportedMessage::Json(msg));
        }
        if self.config.star_enabled {
            let payload = format_star_message(metric_name, metric_value, &meta, &self.star_format)
                .inspect_err(|e| {
                    log::warn!("Dropping star record for {}: {}", metric_name, e);
                })?;
            messages.push(ReportedMessage::Star {
                metric_name: metric_name.to_string(),
                payload,
            });
        }

        for msg in &messages {
            self.subscribers.notify(msg);
        }
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use p3a_core::StarConfig;
    use p3a_interfaces::SeparatorPolicy;
    use std::sync::{Arc, Mutex};

    fn meta() -> MessageMetainfo {
        MessageMetainfo {
            country_code: "KR".to_string(),
            platform: "linux-bc".to_string(),
            version: "1.52.0".to_string(),
            channel: "nightly".to_string(),
            refcode: "ABC123".to_string(),
            woi: 10,
            wos: 11,
            date_of_install: Utc.with_ymd_and_hms(2023, 3, 8, 12, 0, 0).unwrap(),
            date_of_survey: Utc.with_ymd_and_hms(2023, 3, 15, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn report_anonymizes_a_copy() {
        let reporter = Reporter::new(ReportingConfig::default()).unwrap();
        let original = meta();
        let messages = reporter.report("Brave.Sync.Status", 2, &original).unwrap();

        assert_eq!(original.country_code, "KR");
        assert_eq!(original.refcode, "ABC123");
        match &messages[0] {
            ReportedMessage::Json(msg) => assert_eq!(msg.country_code, "other"),
            other => panic!("expected JSON record first, got {:?}", other),
        }
    }

    #[test]
    fn disabled_formats_are_skipped() {
        let config = ReportingConfig {
            json_enabled: false,
            ..ReportingConfig::default()
        };
        let reporter = Reporter::new(config).unwrap();
        let messages = reporter.report("m", 1, &meta()).unwrap();
        assert_eq!(messages.len(), 1);
        assert!(matches!(messages[0], ReportedMessage::Star { .. }));
        assert_eq!(messages[0].metric_name(), "m");
    }

    #[test]
    fn invalid_separators_fail_construction() {
        let config = ReportingConfig {
            star: StarConfig {
                key_value_separator: "a".to_string(),
                ..StarConfig::default()
            },
            ..ReportingConfig::default()
        };
        assert!(matches!(
            Reporter::new(config),
            Err(ClientError::Message(_))
        ));
    }

    #[test]
    fn failure_delivers_nothing() {
        let config = ReportingConfig {
            star: StarConfig {
                separator_policy: SeparatorPolicy::Reject,
                ..StarConfig::default()
            },
            ..ReportingConfig::default()
        };
        let mut reporter = Reporter::new(config).unwrap();
        let delivered = Arc::new(Mutex::new(0usize));
        let d = Arc::clone(&delivered);
        reporter.subscribe(move |_| *d.lock().unwrap() += 1);

        let mut bad = meta();
        bad.version = "1;52".to_string();
        assert!(reporter.report("m", 1, &bad).is_err());
        assert_eq!(*delivered.lock().unwrap(), 0);
    }

    #[test]
    fn implausible_year_delivers_nothing() {
        let config = ReportingConfig {
            json_enabled: false,
            ..ReportingConfig::default()
        };
        let mut reporter = Reporter::new(config).unwrap();
        let delivered = Arc::new(Mutex::new(0usize));
        let d = Arc::clone(&delivered);
        reporter.subscribe(move |_| *d.lock().unwrap() += 1);

        let mut bad = meta();
        bad.date_of_install = Utc.with_ymd_and_hms(500, 6, 15, 12, 0, 0).unwrap();
        let err = reporter.report("m", 1, &bad).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Message(p3a_message::MessageError::ImplausibleYear {
                field: "yoi",
                year: 500
            })
        ));
        assert_eq!(*delivered.lock().unwrap(), 0);
    }

    #[test]
    fn both_formats_disabled_yields_no_records() {
        let config = ReportingConfig {
            json_enabled: false,
            star_enabled: false,
            ..ReportingConfig::default()
        };
        let mut reporter = Reporter::new(config).unwrap();
        let delivered = Arc::new(Mutex::new(0usize));
        let d = Arc::clone(&delivered);
        reporter.subscribe(move |_| *d.lock().unwrap() += 1);

        let messages = reporter.report("m", 1, &meta()).unwrap();
        assert!(messages.is_empty());
        assert_eq!(*delivered.lock().unwrap(), 0);
    }
}
