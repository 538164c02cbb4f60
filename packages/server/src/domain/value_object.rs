//! Value objects.

use std::fmt;

use super::error::ValueError;

/// Flight identifier: a non-empty token without whitespace
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlightId(String);

impl FlightId {
    pub fn new(id: String) -> Result<Self, ValueError> {
        if id.is_empty() {
            return Err(ValueError::EmptyFlightId);
        }
        if id.chars().any(char::is_whitespace) {
            return Err(ValueError::InvalidFlightId(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for FlightId {
    type Error = ValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name a session logs on with; unique among logged-on sessions once assigned
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(name: String) -> Result<Self, ValueError> {
        if name.is_empty() {
            return Err(ValueError::EmptyUsername);
        }
        if name.chars().any(char::is_whitespace) {
            return Err(ValueError::InvalidUsername(name));
        }
        Ok(Self(name))
    }

    /// Append a disambiguating counter (`bob` -> `bob1`)
    pub fn with_suffix(&self, suffix: usize) -> Self {
        Self(format!("{}{}", self.0, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Username {
    type Error = ValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
