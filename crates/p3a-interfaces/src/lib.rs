//! # P3A Interfaces (Public Data Contract)
//!
//! This crate defines the data shared between reporting call sites, the
//! message formatter and the reporter: the per-event `MessageMetainfo`,
//! platform and channel identifiers, the sentinels written by the
//! anonymization policy, and the public `ApiError` type.

mod common;
mod error;
mod metainfo;

pub use common::*;
pub use error::*;
pub use metainfo::*;
