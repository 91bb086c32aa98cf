//! Provider-assigned place identifier

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Stable identifier the places provider assigns to a point of interest
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlaceId(String);

impl PlaceId {
    /// Parse a place id, rejecting blank input
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPlaceId` if the id is empty or whitespace.
    pub fn parse(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidPlaceId(id));
        }
        Ok(Self(id))
    }

    /// Get the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlaceId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<PlaceId> for String {
    fn from(id: PlaceId) -> Self {
        id.0
    }
}

impl AsRef<str> for PlaceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        let id = PlaceId::parse("ChIJN1t_tDeuEmsRUsoyG83frY4").unwrap();
        assert_eq!(id.as_str(), "ChIJN1t_tDeuEmsRUsoyG83frY4");
        assert_eq!(id.to_string(), "ChIJN1t_tDeuEmsRUsoyG83frY4");
    }

    #[test]
    fn parse_rejects_blank() {
        assert!(PlaceId::parse("").is_err());
        assert!(PlaceId::parse("   ").is_err());
    }

    #[test]
    fn serde_is_transparent_string() {
        let id = PlaceId::parse("abc").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
        assert!(serde_json::from_str::<PlaceId>("\"\"").is_err());
    }
}
