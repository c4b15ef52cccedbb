//! # P3A Client Library
//!
//! This crate provides the entry point reporting call sites use. It ties
//! together the metainfo contract, configuration, the anonymization policy
//! and both record formatters behind a single [`Reporter`].
//!
//! Configuration is resolved once when the reporter is built and passed in
//! explicitly; nothing is read from global state while reporting.

// Re-export the public contract for user convenience
pub use p3a_interfaces::{
    ApiError, COUNTRY_OTHER, Channel, MessageMetainfo, Platform, REFCODE_NONE, SeparatorPolicy,
    SubscriptionId,
};

// Re-export configuration and formatter types callers need to name
pub use p3a_core::{Config, ReportingConfig, StarConfig};
pub use p3a_message::{JsonMessage, StarFormat};

mod error;
mod launch;
mod reporter;
mod subscription;

pub use error::ClientError;
pub use launch::start;
pub use reporter::{ReportedMessage, Reporter};
pub use subscription::SubscriberList;
