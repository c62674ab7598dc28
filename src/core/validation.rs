//! Field level validation rules shared by the forms.

use crate::core::conversion::parse_exact_amount;
use regex::Regex;
use rust_decimal::Decimal;
use std::fmt;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_'+\-]+(\.[A-Za-z0-9_'+\-]+)*@([A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
    )
    .expect("email pattern is valid")
});

static PHONE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\s-]+$").expect("phone pattern is valid"));

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("digits pattern is valid"));

/// One message per field, in the order the fields were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(&'static str, String)>,
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self
            .errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect();
        write!(f, "{}", joined.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `field` unless the field already has one.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.errors.push((field, message.into()));
        }
    }

    /// Records the outcome of a rule, returning the accepted value.
    pub fn check<T>(
        &mut self,
        field: &'static str,
        outcome: Result<T, &'static str>,
    ) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(message) => {
                self.add(field, message);
                None
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }
}

pub fn required<'a>(value: &'a str, message: &'static str) -> Result<&'a str, &'static str> {
    if value.is_empty() {
        Err(message)
    } else {
        Ok(value)
    }
}

pub fn positive_amount(value: &str) -> Result<Decimal, &'static str> {
    if value.is_empty() {
        return Err("Amount is required");
    }
    match parse_exact_amount(value) {
        Some(amount) if amount > Decimal::ZERO => Ok(amount),
        _ => Err("Amount must be a positive number"),
    }
}

pub fn account_number(value: &str) -> Result<&str, &'static str> {
    if value.is_empty() {
        return Err("Account number is required");
    }
    if DIGITS.is_match(value) {
        Ok(value)
    } else {
        Err("Account number must contain only digits")
    }
}

/// Trims, then checks presence and address shape.
pub fn email(value: &str) -> Result<String, &'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("Email is required");
    }
    if EMAIL.is_match(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err("Please enter a valid email address")
    }
}

pub fn phone_number(value: &str) -> Result<&str, &'static str> {
    if value.is_empty() {
        return Err("Phone number is required");
    }
    if !PHONE_CHARS.is_match(value) {
        return Err("Phone number must contain only digits, spaces, or hyphens");
    }
    let digits = value.chars().filter(char::is_ascii_digit).count();
    if (10..=15).contains(&digits) {
        Ok(value)
    } else {
        Err("Phone number must contain between 10 and 15 digits")
    }
}
