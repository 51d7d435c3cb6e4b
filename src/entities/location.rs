// 📍 Location Entity
// Owned by exactly one project. The canonical form "{city}, {state}" is the only
// shape persisted, so neither part may contain ", " itself.

use crate::error::ValidationError;
use crate::validators::{find_state_in_address, UNKNOWN_STATE};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    state: String,
    city: String,
}

impl Location {
    pub fn new(state: impl Into<String>, city: impl Into<String>) -> Self {
        Location {
            state: state.into(),
            city: city.into(),
        }
    }

    /// Rebuild a location from its canonical string
    ///
    /// Splits on the FIRST ", " (city before, state after). Without a separator
    /// the whole string becomes the city and the state is "Unknown".
    pub fn parse(canonical: &str) -> Self {
        match canonical.split_once(", ") {
            Some((city, state)) => Location::new(state, city),
            None => Location::new(UNKNOWN_STATE, canonical),
        }
    }

    /// Build a location from a free-form address that names a state somewhere
    ///
    /// The first enumerated state found in the address wins; the city is what
    /// remains after removing ", {state}". Addresses that would not survive a
    /// round trip through the canonical form are rejected: the state must follow
    /// a ", " separator and the remaining city must not contain another one.
    pub fn from_address(address: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidStateAddress(address.to_string());

        let state = find_state_in_address(address).ok_or_else(invalid)?;
        let suffix = format!(", {}", state);
        if !address.contains(&suffix) {
            return Err(invalid());
        }

        let city = address.replace(&suffix, "");
        let city = city.trim();
        if city.is_empty() || city.contains(", ") {
            return Err(invalid());
        }

        Ok(Location::new(state, city))
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn is_unknown(&self) -> bool {
        self.state == UNKNOWN_STATE
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.state)
    }
}
