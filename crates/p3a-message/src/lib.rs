//! # P3A Message
//!
//! Turns a metric sample plus its [`MessageMetainfo`] into the two records
//! the telemetry pipeline ships:
//!
//! - a structured JSON record for the conventional upload endpoint
//!   ([`format_json_message`]),
//! - a flattened, separator-joined record for the layered secret-sharing
//!   submission scheme ([`format_star_message`]).
//!
//! Before either is built, [`apply_anonymization_policy`] strips the referral
//! code and drops country codes whose reporting population is too small.
//!
//! Everything here is a pure function of its arguments.
//!
//! [`MessageMetainfo`]: p3a_interfaces::MessageMetainfo

pub mod anonymize;
pub mod error;
pub mod json;
pub mod star;
mod year;

pub use anonymize::{
    LINUX_COUNTRIES, NOTABLE_COUNTRIES, allow_list_for, apply_anonymization_policy,
    is_reportable_country,
};
pub use error::MessageError;
pub use json::{JsonMessage, format_json_message};
pub use star::{
    STAR_ATTRIBUTE_COUNT, StarAttributes, StarFormat, format_star_message, star_attributes,
};
