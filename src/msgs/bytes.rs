// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Serde adapter for `uint8[]` payloads.
//!
//! rosbridge transports byte arrays as base64 strings, while other clients
//! send a plain JSON array of numbers. Both forms are accepted on input;
//! output is always base64.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum WireBytes {
    Base64(String),
    Raw(Vec<u8>),
}

pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&STANDARD.encode(bytes))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    match WireBytes::deserialize(deserializer)? {
        WireBytes::Base64(text) => STANDARD
            .decode(text.as_bytes())
            .map_err(serde::de::Error::custom),
        WireBytes::Raw(bytes) => Ok(bytes),
    }
}
