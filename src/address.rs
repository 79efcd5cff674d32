//! Indirect object addresses.
//!
//! An address is written `N:G` (object number, generation number). The short
//! form `N` is accepted on input and means generation 0.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// Reference to an indirect object by object and generation number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectAddress {
    /// Object number
    pub object_number: u32,
    /// Generation number
    pub generation_number: u16,
}

impl ObjectAddress {
    /// Create an address from its two parts.
    pub fn new(object_number: u32, generation_number: u16) -> Self {
        Self {
            object_number,
            generation_number,
        }
    }

    /// Parse `N` or `N:G`.
    ///
    /// Both parts must be plain base-10 digits. Signs, whitespace, empty parts
    /// and additional colons are rejected rather than normalized.
    pub fn parse(token: &str) -> Result<Self> {
        let malformed = || Error::MalformedAddress(token.to_string());

        let (number, generation) = match token.split_once(':') {
            Some((n, g)) => (n, Some(g)),
            None => (token, None),
        };

        let object_number = parse_digits::<u32>(number).ok_or_else(malformed)?;
        let generation_number = match generation {
            Some(g) => parse_digits::<u16>(g).ok_or_else(malformed)?,
            None => 0,
        };

        Ok(Self::new(object_number, generation_number))
    }

    /// Parse every token, failing on the first malformed one.
    pub fn parse_all<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Self>> {
        tokens.iter().map(|t| Self::parse(t.as_ref())).collect()
    }
}

/// `str::parse` accepts a leading `+`, so check the digits first.
fn parse_digits<T: FromStr>(s: &str) -> Option<T> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for ObjectAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.object_number, self.generation_number)
    }
}

impl FromStr for ObjectAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<lopdf::ObjectId> for ObjectAddress {
    fn from((object_number, generation_number): lopdf::ObjectId) -> Self {
        Self::new(object_number, generation_number)
    }
}

impl From<ObjectAddress> for lopdf::ObjectId {
    fn from(address: ObjectAddress) -> Self {
        (address.object_number, address.generation_number)
    }
}

impl Serialize for ObjectAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_part() {
        let address = ObjectAddress::parse("14:2").unwrap();
        assert_eq!(address, ObjectAddress::new(14, 2));
        assert_eq!(address.to_string(), "14:2");
    }

    #[test]
    fn test_parse_one_part_defaults_generation() {
        let address = ObjectAddress::parse("106").unwrap();
        assert_eq!(address.generation_number, 0);
        assert_eq!(address.to_string(), "106:0");
    }

    #[test]
    fn test_parse_zero() {
        assert_eq!(ObjectAddress::parse("0").unwrap(), ObjectAddress::new(0, 0));
    }

    #[test]
    fn test_round_trip() {
        for token in ["0", "1", "1:0", "14:0", "106", "4294967295:65535", "007:01"] {
            let address: ObjectAddress = token.parse().unwrap();
            let reparsed: ObjectAddress = address.to_string().parse().unwrap();
            assert_eq!(address, reparsed, "token {token}");
        }
    }

    #[test]
    fn test_rejects_malformed() {
        for token in [
            "", ":", "1:", ":0", "-1", "+1", "1:-0", "abc", "1:0:0", " 1", "1 ", "1: 0", "1.5",
            "0x10", "4294967296", "1:65536",
        ] {
            let result = ObjectAddress::parse(token);
            assert!(
                matches!(result, Err(Error::MalformedAddress(ref t)) if t == token),
                "token {token:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_all_stops_at_first_bad_token() {
        let tokens = ["1", "x", "3"];
        assert!(matches!(
            ObjectAddress::parse_all(&tokens),
            Err(Error::MalformedAddress(t)) if t == "x"
        ));

        let tokens = vec!["1".to_string(), "14:0".to_string()];
        assert_eq!(ObjectAddress::parse_all(&tokens).unwrap().len(), 2);
    }

    #[test]
    fn test_object_id_conversion() {
        let id: lopdf::ObjectId = ObjectAddress::new(7, 1).into();
        assert_eq!(id, (7, 1));
        assert_eq!(ObjectAddress::from((9, 0)), ObjectAddress::new(9, 0));
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&ObjectAddress::new(3, 0)).unwrap();
        assert_eq!(json, "\"3:0\"");
    }
}
