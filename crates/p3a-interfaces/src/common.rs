use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

/// Represents a unique identifier for message subscriptions.
pub type SubscriptionId = u64;

/// Written into `refcode` before every transmission.
pub const REFCODE_NONE: &str = "none";

/// Replaces any country code whose population is too small to report.
pub const COUNTRY_OTHER: &str = "other";

/// Years below this come from a broken clock or date conversion.
pub const MIN_PLAUSIBLE_YEAR: i32 = 999;

/// Attribute keys of the flattened record, in wire order.
pub const STAR_ATTRIBUTE_KEYS: [&str; 8] = [
    "metric_name",
    "metric_value",
    "version",
    "yoi",
    "channel",
    "platform",
    "country_code",
    "woi",
];

/// What the flattened formatter does when a value contains a separator.
///
/// The flattened record has no escaping, so a colliding value makes the
/// record ambiguous for the aggregation service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SeparatorPolicy {
    /// Emit the value unchanged and log a warning.
    #[default]
    Permissive,
    /// Refuse to build the record.
    Reject,
}

/// Platform the browser build targets, as reported in the `platform` field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    WinX64,
    WinIa32,
    WinArm64,
    MacOs,
    Linux,
    Android,
    Ios,
}

impl Platform {
    /// Tag of the Linux desktop build. The anonymization policy keys its
    /// allow-list selection on this exact value.
    pub const LINUX_TAG: &'static str = "linux-bc";

    /// Wire tag sent in the `platform` attribute.
    pub fn tag(self) -> &'static str {
        match self {
            Platform::WinX64 => "winx64-bc",
            Platform::WinIa32 => "winia32-bc",
            Platform::WinArm64 => "winarm64-bc",
            Platform::MacOs => "osx-bc",
            Platform::Linux => Self::LINUX_TAG,
            Platform::Android => "android-bc",
            Platform::Ios => "ios",
        }
    }

    /// Maps `std::env::consts::{OS, ARCH}` style names to a platform.
    ///
    /// Returns `None` for hosts the browser is not shipped on.
    pub fn from_os_arch(os: &str, arch: &str) -> Option<Platform> {
        match (os, arch) {
            ("windows", "x86_64") => Some(Platform::WinX64),
            ("windows", "x86") => Some(Platform::WinIa32),
            ("windows", "aarch64") => Some(Platform::WinArm64),
            ("macos", _) => Some(Platform::MacOs),
            ("linux", _) => Some(Platform::Linux),
            ("android", _) => Some(Platform::Android),
            ("ios", _) => Some(Platform::Ios),
            _ => None,
        }
    }

    /// The platform of the running host, if supported.
    pub fn current() -> Option<Platform> {
        Self::from_os_arch(std::env::consts::OS, std::env::consts::ARCH)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Release channel of the running build.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    #[default]
    Release,
    Beta,
    Nightly,
    Developer,
}

impl Channel {
    pub fn name(self) -> &'static str {
        match self {
            Channel::Release => "release",
            Channel::Beta => "beta",
            Channel::Nightly => "nightly",
            Channel::Developer => "developer",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Unbranded and stable builds report as release.
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "release" | "stable" => Ok(Channel::Release),
            "beta" => Ok(Channel::Beta),
            "nightly" | "canary" => Ok(Channel::Nightly),
            "developer" | "dev" => Ok(Channel::Developer),
            other => Err(ApiError::InvalidParameters(format!(
                "unknown release channel '{}'",
                other
            ))),
        }
    }
}
