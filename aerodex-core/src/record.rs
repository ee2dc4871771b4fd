//! # Records
//!
//! An airport record is a three-letter code plus a city name and a
//! coordinate pair. Records never change after construction; both indexes
//! share the same instance through [`SharedRecord`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Number of characters in an airport code
pub const CODE_LEN: usize = 3;

/// Handle shared by the ordered index and the hash index
pub type SharedRecord = Arc<Record>;

/// Three uppercase ASCII letters, e.g. `SFO`
///
/// Ordering is byte-wise, which for uppercase letters is alphabetical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Code([u8; CODE_LEN]);

impl Code {
    /// Parse and case-normalize a code
    pub fn new(input: &str) -> Result<Self> {
        let bytes = input.as_bytes();
        if bytes.len() != CODE_LEN {
            return Err(Error::InvalidCode {
                input: input.to_string(),
                reason: format!("expected {} characters, got {}", CODE_LEN, input.chars().count()),
            });
        }
        if !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(Error::InvalidCode {
                input: input.to_string(),
                reason: "only letters A-Z are allowed".to_string(),
            });
        }

        let mut code = [0u8; CODE_LEN];
        for (dst, src) in code.iter_mut().zip(bytes) {
            *dst = src.to_ascii_uppercase();
        }
        Ok(Self(code))
    }

    pub fn as_bytes(&self) -> &[u8; CODE_LEN] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // Always ASCII by construction
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl FromStr for Code {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Code::new(s)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An airport entry
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    code: Code,
    city: String,
    latitude: f64,
    longitude: f64,
}

impl Record {
    pub fn new(code: Code, city: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            code,
            city: city.into(),
            latitude,
            longitude,
        }
    }

    pub fn code(&self) -> &Code {
        &self.code
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Wrap into the handle stored by the indexes
    pub fn into_shared(self) -> SharedRecord {
        Arc::new(self)
    }
}

impl fmt::Display for Record {
    /// Screen layout: code, padded city, two-decimal coordinates
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:<18} {:<5.2} {:<5.2}",
            self.code, self.city, self.latitude, self.longitude
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_uppercased() {
        let code = Code::new("sfo").unwrap();
        assert_eq!(code.as_str(), "SFO");
        assert_eq!(code, "SFO".parse().unwrap());
    }

    #[test]
    fn test_code_rejects_bad_input() {
        assert!(matches!(Code::new("SF"), Err(Error::InvalidCode { .. })));
        assert!(matches!(Code::new("SFOX"), Err(Error::InvalidCode { .. })));
        assert!(matches!(Code::new("S1O"), Err(Error::InvalidCode { .. })));
        assert!(matches!(Code::new("ÅBC"), Err(Error::InvalidCode { .. })));
    }

    #[test]
    fn test_code_ordering_is_alphabetical() {
        let a = Code::new("AAB").unwrap();
        let b = Code::new("ABA").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_record_display() {
        let rec = Record::new(Code::new("lax").unwrap(), "Los Angeles", 33.94, -118.41);
        assert_eq!(rec.to_string(), "LAX Los Angeles        33.94 -118.41");
    }
}
