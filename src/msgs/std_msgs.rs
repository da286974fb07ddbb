// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// `builtin_interfaces/Time`.
///
/// ROS1 peers spell the fields `secs`/`nsecs`; both spellings are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Time {
    #[serde(alias = "secs")]
    pub sec: i32,
    #[serde(alias = "nsecs")]
    pub nanosec: u32,
}

impl Time {
    /// Current wall-clock time.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Convert a UTC instant, saturating seconds outside the `i32` range.
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        let secs = instant.timestamp();
        let sec = i32::try_from(secs).unwrap_or_else(|_| {
            let clamped = if secs < 0 { i32::MIN } else { i32::MAX };
            warn!(secs, clamped, "timestamp outside the i32 range; saturating");
            clamped
        });
        Self {
            sec,
            nanosec: instant.timestamp_subsec_nanos(),
        }
    }

    /// Nanoseconds since the Unix epoch.
    pub fn as_nanos(&self) -> i64 {
        i64::from(self.sec) * 1_000_000_000 + i64::from(self.nanosec)
    }
}

/// `std_msgs/Header`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Header {
    #[serde(default)]
    pub stamp: Time,
    #[serde(default)]
    pub frame_id: String,
}

impl Header {
    /// Header stamped now in the given frame.
    pub fn now(frame_id: impl Into<String>) -> Self {
        Self {
            stamp: Time::now(),
            frame_id: frame_id.into(),
        }
    }
}
