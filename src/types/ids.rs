// src/types/ids.rs
//! Phantom-typed identifiers for Notion objects.
//!
//! A `PageId` and a `BlockId` are both 32 hex digits, but mixing them up
//! is a logic error the compiler can catch for free. The phantom
//! parameter costs nothing at runtime.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// Strong typing for IDs with phantom types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: String,
    _phantom: PhantomData<T>,
}

/// Marker types for different ID kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatabaseMarker;

/// Type aliases for specific ID types
pub type PageId = Id<PageMarker>;
pub type BlockId = Id<BlockMarker>;
pub type DatabaseId = Id<DatabaseMarker>;

impl<T> Id<T> {
    /// Parse a dashed or undashed Notion ID into a normalized ID.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = normalize_notion_id(input)?;
        Ok(Self {
            value: normalized,
            _phantom: PhantomData,
        })
    }

    /// Create an ID from an already normalized string (internal use)
    pub(crate) fn from_normalized(value: String) -> Self {
        Self {
            value,
            _phantom: PhantomData,
        }
    }

    /// Create a new random v4 UUID ID
    pub fn new_v4() -> Self {
        let uuid = Uuid::new_v4();
        Self {
            value: uuid.as_simple().to_string(),
            _phantom: PhantomData,
        }
    }

    /// Get the ID as a string reference
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Get the ID with dashes for API calls
    pub fn to_dashed(&self) -> String {
        if self.value.len() == 32 && !self.value.contains('-') {
            format!(
                "{}-{}-{}-{}-{}",
                &self.value[0..8],
                &self.value[8..12],
                &self.value[12..16],
                &self.value[16..20],
                &self.value[20..32]
            )
        } else {
            self.value.clone()
        }
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        normalize_notion_id(&value)
            .map(Self::from_normalized)
            .map_err(serde::de::Error::custom)
    }
}

/// Strip dashes and validate that the result is 32 hex digits.
fn normalize_notion_id(input: &str) -> Result<String, ValidationError> {
    let stripped: String = input.trim().chars().filter(|c| *c != '-').collect();

    if stripped.len() == 32 && stripped.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(stripped.to_lowercase())
    } else {
        Err(ValidationError::InvalidId(input.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dashed_and_undashed_forms_identically() {
        let dashed = BlockId::parse("12345678-1234-1234-1234-123456789abc").unwrap();
        let plain = BlockId::parse("12345678123412341234123456789abc").unwrap();
        assert_eq!(dashed, plain);
        assert_eq!(dashed.as_str(), "12345678123412341234123456789abc");
    }

    #[test]
    fn to_dashed_round_trips_for_api_calls() {
        let id = PageId::parse("12345678123412341234123456789abc").unwrap();
        assert_eq!(id.to_dashed(), "12345678-1234-1234-1234-123456789abc");
    }

    #[test]
    fn rejects_non_hex_input() {
        assert!(BlockId::parse("not-an-id").is_err());
        assert!(BlockId::parse("").is_err());
    }
}
