// Field Validators
// Each validator accepts a raw string silently or fails with the matching
// ValidationError carrying the rejected value. The same rules gate interactive
// input, entity mutators and bulk import.

use crate::error::ValidationError;
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::RangeInclusive;

// ============================================================================
// ENUMERATED DOMAINS
// ============================================================================

pub const VALID_CATEGORIES: [&str; 8] = [
    "Bioenergy",
    "Energy from waste",
    "Battery storage",
    "Solar energy",
    "Distributed energy resources",
    "Electric vehicles",
    "Wind energy",
    "Education",
];

/// Australian states and territories plus "National".
/// Order matters for address matching: the first name found in an address wins.
pub const VALID_STATES: [&str; 9] = [
    "Australian Capital Territory",
    "National",
    "New South Wales",
    "Northern Territory",
    "Queensland",
    "South Australia",
    "Tasmania",
    "Victoria",
    "Western Australia",
];

pub const VALID_CITIES: [&str; 20] = [
    "Sydney",
    "Melbourne",
    "Brisbane",
    "Perth",
    "Adelaide",
    "Canberra",
    "Hobart",
    "Darwin",
    "Gold Coast",
    "Newcastle",
    "Wollongong",
    "Geelong",
    "Townsville",
    "Cairns",
    "Toowoomba",
    "Ballarat",
    "Bendigo",
    "Launceston",
    "Mackay",
    "Rockhampton",
];

pub const VALID_YEARS: RangeInclusive<u16> = 2009..=2025;

pub const VALID_STATUSES: [&str; 2] = ["Current", "Past"];

pub const VALID_CHOICES: [&str; 7] = ["1", "2", "3", "4", "5", "x", "X"];

pub const VALID_REPORT_TYPES: [&str; 4] = ["1", "2", "category", "state"];

/// Placeholder state for locations that could not be split into city and state
pub const UNKNOWN_STATE: &str = "Unknown";

static BUDGET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\$[0-9]+(\.[0-9]{2})?[mk]$").expect("budget pattern is valid")
});

// Two DD/MM/YYYY dates around an ASCII dash or en-dash, spaces required on both sides
static DATE_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2}/[0-9]{2}/[0-9]{4})\s+[\x{2013}-]\s+([0-9]{2}/[0-9]{2}/[0-9]{4})$")
        .expect("date range pattern is valid")
});

const DATE_FORMAT: &str = "%d/%m/%Y";

// ============================================================================
// VALIDATORS
// ============================================================================

pub fn validate_choice(choice: &str) -> Result<(), ValidationError> {
    if VALID_CHOICES.contains(&choice) {
        Ok(())
    } else {
        Err(ValidationError::InvalidChoice(choice.to_string()))
    }
}

/// Exact, case-sensitive membership in the category list
pub fn validate_category(category: &str) -> Result<(), ValidationError> {
    if VALID_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCategory(category.to_string()))
    }
}

pub fn validate_state(state: &str) -> Result<(), ValidationError> {
    if VALID_STATES.contains(&state) {
        Ok(())
    } else {
        Err(ValidationError::InvalidState(state.to_string()))
    }
}

pub fn validate_city(city: &str) -> Result<(), ValidationError> {
    if VALID_CITIES.contains(&city) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCity(city.to_string()))
    }
}

/// Accepts only the canonical decimal form of a year in 2009..=2025
/// ("2020" passes, "02020" and " 2020" do not).
pub fn validate_year(year: &str) -> Result<(), ValidationError> {
    let accepted = year
        .parse::<u16>()
        .map(|y| VALID_YEARS.contains(&y) && y.to_string() == year)
        .unwrap_or(false);

    if accepted {
        Ok(())
    } else {
        Err(ValidationError::InvalidYear(year.to_string()))
    }
}

pub fn validate_status(status: &str) -> Result<(), ValidationError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(ValidationError::InvalidStatus(status.to_string()))
    }
}

pub fn validate_report_type(report_type: &str) -> Result<(), ValidationError> {
    if VALID_REPORT_TYPES.contains(&report_type) {
        Ok(())
    } else {
        Err(ValidationError::InvalidReportType(report_type.to_string()))
    }
}

/// Budget strings look like `$4.81m` or `$500k` (suffix case-insensitive)
pub fn validate_budget(budget: &str) -> Result<(), ValidationError> {
    if BUDGET_RE.is_match(budget) {
        Ok(())
    } else {
        Err(ValidationError::InvalidBudget(budget.to_string()))
    }
}

/// Validates `DD/MM/YYYY – DD/MM/YYYY`: both sides must be real calendar dates
/// and the start must be strictly before the end.
pub fn validate_date_range(date_range: &str) -> Result<(), ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidDateRange {
        value: date_range.to_string(),
        reason: reason.to_string(),
    };

    let caps = DATE_RANGE_RE
        .captures(date_range)
        .ok_or_else(|| invalid("Use format: DD/MM/YYYY – DD/MM/YYYY"))?;

    let start = NaiveDate::parse_from_str(&caps[1], DATE_FORMAT)
        .map_err(|_| invalid("Start date is not a valid calendar date"))?;
    let end = NaiveDate::parse_from_str(&caps[2], DATE_FORMAT)
        .map_err(|_| invalid("End date is not a valid calendar date"))?;

    if start.year() < 1 || end.year() < 1 {
        return Err(invalid("Years before 0001 are not valid calendar dates"));
    }
    if start >= end {
        return Err(invalid("Start date must be before end date"));
    }

    Ok(())
}

/// Non-negative, finite monetary amount (total cost or funding)
pub fn validate_amount(amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidAmount(amount.to_string()))
    }
}

/// Parse and validate a user-entered amount
pub fn parse_amount(raw: &str) -> Result<f64, ValidationError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidAmount(raw.to_string()))?;
    validate_amount(value).map_err(|_| ValidationError::InvalidAmount(raw.to_string()))?;
    Ok(value)
}

// ============================================================================
// ADDRESSES
// ============================================================================

/// First state name (in enumeration order) appearing anywhere in the address
///
/// Substring match, not structured parsing: "National Park, Queensland"
/// resolves to "National".
pub fn find_state_in_address(address: &str) -> Option<&'static str> {
    VALID_STATES
        .iter()
        .copied()
        .find(|state| address.contains(state))
}

pub fn validate_state_address(address: &str) -> Result<(), ValidationError> {
    find_state_in_address(address)
        .map(|_| ())
        .ok_or_else(|| ValidationError::InvalidStateAddress(address.to_string()))
}

// ============================================================================
// TESTS
// ============================================================================
