//! Record identifier type
//!
//! `RecordId` is a newtype over the store-assigned integer key so that ids
//! cannot be mixed with counts or indexes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store-assigned record identity
///
/// Ids are handed out by the catalog store from a persisted counter. They are
/// unique for the lifetime of the catalog and never reused, even after the
/// record is deleted or the catalog is cleared.
///
/// # Examples
///
/// ```
/// use coupe::domain::ids::RecordId;
/// use std::str::FromStr;
///
/// let id = RecordId::from_str("17").unwrap();
/// assert_eq!(id.get(), 17);
/// assert_eq!(id.to_string(), "17");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// Wraps a raw key
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw key
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| format!("Invalid record id '{s}': {e}"))
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Parses a comma-separated id list such as `"1, 2,3"`
///
/// Empty segments are ignored, so `""` yields an empty list.
pub fn parse_id_list(input: &str) -> Result<Vec<RecordId>, String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(RecordId::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_parse() {
        assert_eq!(RecordId::from_str(" 5 ").unwrap(), RecordId::new(5));
        assert!(RecordId::from_str("abc").is_err());
        assert!(RecordId::from_str("-1").is_err());
    }

    #[test]
    fn test_record_id_serializes_as_integer() {
        let json = serde_json::to_string(&RecordId::new(9)).unwrap();
        assert_eq!(json, "9");

        let id: RecordId = serde_json::from_str("12").unwrap();
        assert_eq!(id.get(), 12);
    }

    #[test]
    fn test_parse_id_list() {
        let ids = parse_id_list("1, 2,3").unwrap();
        assert_eq!(ids, vec![RecordId::new(1), RecordId::new(2), RecordId::new(3)]);

        assert!(parse_id_list("").unwrap().is_empty());
        assert!(parse_id_list("1,x").is_err());
    }
}
