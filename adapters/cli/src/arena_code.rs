#![allow(clippy::missing_errors_doc)]

use std::{error::Error, fmt};

use arena_royale_core::ArenaConfig;
use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

const SNAPSHOT_DOMAIN: &str = "arena";
const SNAPSHOT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded snapshot payload.
pub(crate) const SNAPSHOT_HEADER: &str = "arena:v1";
/// Delimiter used to separate the prefix, world dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Snapshot of everything needed to reproduce an arena: the configuration
/// and the master seed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct ArenaSnapshot {
    /// Parameters the arena was generated with.
    pub config: ArenaConfig,
    /// Master seed all RNG streams derive from.
    pub seed: u64,
}

impl ArenaSnapshot {
    pub(crate) const fn new(config: ArenaConfig, seed: u64) -> Self {
        Self { config, seed }
    }

    /// Encodes the snapshot into a single-line string suitable for clipboard
    /// transfer.
    #[must_use]
    pub(crate) fn encode(&self) -> String {
        let json = serde_json::to_vec(self).expect("arena snapshot serialization never fails");
        let encoded = STANDARD_NO_PAD.encode(json);
        format!(
            "{SNAPSHOT_HEADER}:{}x{}:{encoded}",
            self.config.world_width as u32, self.config.world_height as u32
        )
    }

    /// Decodes a snapshot from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, ArenaCodeError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ArenaCodeError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(ArenaCodeError::MissingPrefix)?;
        let version = parts.next().ok_or(ArenaCodeError::MissingVersion)?;
        let dimensions = parts.next().ok_or(ArenaCodeError::MissingDimensions)?;
        let payload = parts.next().ok_or(ArenaCodeError::MissingPayload)?;

        if domain != SNAPSHOT_DOMAIN {
            return Err(ArenaCodeError::InvalidPrefix(domain.to_owned()));
        }
        if version != SNAPSHOT_VERSION {
            return Err(ArenaCodeError::UnsupportedVersion(version.to_owned()));
        }

        let (width, height) = parse_dimensions(dimensions)?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(ArenaCodeError::InvalidEncoding)?;
        let snapshot: ArenaSnapshot =
            serde_json::from_slice(&bytes).map_err(ArenaCodeError::InvalidPayload)?;

        if snapshot.config.world_width as u32 != width
            || snapshot.config.world_height as u32 != height
        {
            return Err(ArenaCodeError::InvalidDimensions(dimensions.to_owned()));
        }

        Ok(snapshot)
    }
}

fn parse_dimensions(value: &str) -> Result<(u32, u32), ArenaCodeError> {
    let mut parts = value.split('x');
    let width = parts
        .next()
        .and_then(|part| part.parse().ok())
        .ok_or_else(|| ArenaCodeError::InvalidDimensions(value.to_owned()))?;
    let height = parts
        .next()
        .and_then(|part| part.parse().ok())
        .ok_or_else(|| ArenaCodeError::InvalidDimensions(value.to_owned()))?;
    if parts.next().is_some() {
        return Err(ArenaCodeError::InvalidDimensions(value.to_owned()));
    }
    Ok((width, height))
}

/// Errors that can occur while decoding arena transfer strings.
#[derive(Debug)]
pub(crate) enum ArenaCodeError {
    /// The provided string was empty or contained only whitespace.
    EmptyPayload,
    /// The prefix segment was missing from the encoded snapshot.
    MissingPrefix,
    /// The encoded snapshot did not contain a version segment.
    MissingVersion,
    /// The encoded snapshot did not include world dimensions.
    MissingDimensions,
    /// The encoded snapshot did not include the payload segment.
    MissingPayload,
    /// The encoded snapshot used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The encoded snapshot used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The world dimensions did not parse or contradicted the payload.
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The decoded payload could not be deserialised.
    InvalidPayload(serde_json::Error),
}

impl fmt::Display for ArenaCodeError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(formatter, "arena code is empty"),
            Self::MissingPrefix => write!(formatter, "arena code is missing its prefix"),
            Self::MissingVersion => write!(formatter, "arena code is missing its version"),
            Self::MissingDimensions => {
                write!(formatter, "arena code is missing its world dimensions")
            }
            Self::MissingPayload => write!(formatter, "arena code is missing its payload"),
            Self::InvalidPrefix(prefix) => {
                write!(formatter, "arena code has unexpected prefix `{prefix}`")
            }
            Self::UnsupportedVersion(version) => {
                write!(formatter, "arena code version `{version}` is not supported")
            }
            Self::InvalidDimensions(dimensions) => {
                write!(formatter, "arena code dimensions `{dimensions}` are invalid")
            }
            Self::InvalidEncoding(error) => {
                write!(formatter, "arena code payload is not valid base64: {error}")
            }
            Self::InvalidPayload(error) => {
                write!(formatter, "arena code payload did not deserialise: {error}")
            }
        }
    }
}

impl Error for ArenaCodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshots_round_trip() {
        let snapshot = ArenaSnapshot::new(ArenaConfig::default(), 0xfeed_f00d);
        let encoded = snapshot.encode();
        assert!(encoded.starts_with(SNAPSHOT_HEADER));
        assert!(encoded.contains(":3000x3000:"));

        let decoded = ArenaSnapshot::decode(&encoded).expect("decode");
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn empty_codes_are_rejected() {
        assert!(matches!(
            ArenaSnapshot::decode("   "),
            Err(ArenaCodeError::EmptyPayload)
        ));
    }

    #[test]
    fn foreign_prefixes_are_rejected() {
        let encoded = ArenaSnapshot::new(ArenaConfig::default(), 1).encode();
        let tampered = encoded.replacen("arena", "dungeon", 1);
        assert!(matches!(
            ArenaSnapshot::decode(&tampered),
            Err(ArenaCodeError::InvalidPrefix(_))
        ));
    }

    #[test]
    fn future_versions_are_rejected() {
        let encoded = ArenaSnapshot::new(ArenaConfig::default(), 1).encode();
        let tampered = encoded.replacen("v1", "v9", 1);
        assert!(matches!(
            ArenaSnapshot::decode(&tampered),
            Err(ArenaCodeError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn contradictory_dimensions_are_rejected() {
        let encoded = ArenaSnapshot::new(ArenaConfig::default(), 1).encode();
        let tampered = encoded.replacen("3000x3000", "1000x1000", 1);
        assert!(matches!(
            ArenaSnapshot::decode(&tampered),
            Err(ArenaCodeError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn garbage_payloads_are_rejected() {
        let garbage = format!("{SNAPSHOT_HEADER}:3000x3000:!!!not-base64!!!");
        assert!(matches!(
            ArenaSnapshot::decode(&garbage),
            Err(ArenaCodeError::InvalidEncoding(_))
        ));
    }
}
