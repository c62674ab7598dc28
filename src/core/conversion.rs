//! Amount conversion between the two fields of a pay/receive form.
//!
//! Conversion is total: with the default [`InvalidAmountPolicy::Zero`] every
//! unusable input (blank, non-numeric, non-positive, unknown pair, overflow)
//! becomes [`ZERO_AMOUNT`]. The [`InvalidAmountPolicy::Reject`] policy keeps
//! the typed [`ConversionError`] instead so callers can block submission.

use crate::core::rates::RateTable;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

pub const ZERO_AMOUNT: &str = "0.00";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("Amount must be a number")]
    InvalidAmount,
    #[error("Amount must be a positive number")]
    NonPositive,
    #[error("No conversion rate from {from} to {to}")]
    UnsupportedPair { from: String, to: String },
    #[error("Amount is too large to convert")]
    OutOfRange,
}

/// What to do with input that cannot be converted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidAmountPolicy {
    /// Show `0.00` in the other field.
    #[default]
    Zero,
    /// Surface the error and leave the other field untouched.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Multiply the pay amount by the rate.
    PayToReceive,
    /// Divide the receive amount by the rate.
    ReceiveToPay,
}

/// Removes comma thousands separators.
pub fn strip_grouping(value: &str) -> String {
    value.replace(',', "")
}

/// Groups the integer part with commas, keeping the decimal part as typed.
///
/// Characters other than digits and `.` are dropped first, so this also
/// accepts already grouped input.
pub fn format_grouped(value: &str) -> String {
    let numeric: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if numeric.is_empty() || numeric == "." {
        return String::new();
    }

    let mut parts = numeric.split('.');
    let integer = parts.next().unwrap_or_default();
    let decimal = parts.next().unwrap_or_default();

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if decimal.is_empty() {
        grouped
    } else {
        format!("{grouped}.{decimal}")
    }
}

/// Parses the longest leading decimal number, after removing grouping.
///
/// `"2,500.75"` is 2500.75 and `"12abc"` is 12; `"abc"` and `"."` do not
/// parse. Exponent notation is not recognised.
pub fn parse_amount(value: &str) -> Option<Decimal> {
    let cleaned = strip_grouping(value);
    let bytes = cleaned.trim_start().as_bytes();

    let mut pos = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            pos = 1;
            true
        }
        Some(b'+') => {
            pos = 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let integer = &bytes[int_start..pos];

    let mut fraction: &[u8] = &[];
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        fraction = &bytes[frac_start..end];
    }

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    // Both slices hold ASCII digits only.
    let integer = std::str::from_utf8(integer).ok()?;
    let fraction = std::str::from_utf8(fraction).ok()?;
    let mut normalized = String::new();
    if negative {
        normalized.push('-');
    }
    normalized.push_str(if integer.is_empty() { "0" } else { integer });
    if !fraction.is_empty() {
        normalized.push('.');
        normalized.push_str(fraction);
    }
    Decimal::from_str(&normalized).ok()
}

/// Strict parse used by field validation: the whole trimmed value must be a
/// plain decimal number.
pub fn parse_exact_amount(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty()
        || !trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
    {
        return None;
    }
    Decimal::from_str(trimmed).ok()
}

/// Rounds half away from zero and always renders two decimals.
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// Converts `amount` between `from` and `to` using the rate stored for the
/// ordered pair `(from, to)`.
pub fn try_convert(
    table: &RateTable,
    amount: &str,
    from: &str,
    to: &str,
    direction: Direction,
) -> Result<Decimal, ConversionError> {
    let value = parse_amount(amount).ok_or(ConversionError::InvalidAmount)?;
    if value <= Decimal::ZERO {
        return Err(ConversionError::NonPositive);
    }

    let rate = table
        .rate(from, to)
        .ok_or_else(|| ConversionError::UnsupportedPair {
            from: from.to_string(),
            to: to.to_string(),
        })?;

    let converted = match direction {
        Direction::PayToReceive => value.checked_mul(rate),
        Direction::ReceiveToPay => value.checked_div(rate),
    };
    converted.ok_or(ConversionError::OutOfRange)
}

/// Pay amount to receive amount, falling back to `"0.00"`.
pub fn convert(table: &RateTable, amount: &str, from: &str, to: &str) -> String {
    Converter::new(table, InvalidAmountPolicy::Zero)
        .apply(amount, from, to, Direction::PayToReceive)
        .unwrap_or_else(|_| ZERO_AMOUNT.to_string())
}

/// Receive amount back to pay amount, falling back to `"0.00"`.
pub fn convert_inverse(table: &RateTable, amount: &str, from: &str, to: &str) -> String {
    Converter::new(table, InvalidAmountPolicy::Zero)
        .apply(amount, from, to, Direction::ReceiveToPay)
        .unwrap_or_else(|_| ZERO_AMOUNT.to_string())
}

/// A rate table bound to an invalid-input policy.
#[derive(Debug, Clone, Copy)]
pub struct Converter<'a> {
    table: &'a RateTable,
    policy: InvalidAmountPolicy,
}

impl<'a> Converter<'a> {
    pub fn new(table: &'a RateTable, policy: InvalidAmountPolicy) -> Self {
        Self { table, policy }
    }

    /// Converts and formats to two decimals. Only fails under
    /// [`InvalidAmountPolicy::Reject`].
    pub fn apply(
        &self,
        amount: &str,
        from: &str,
        to: &str,
        direction: Direction,
    ) -> Result<String, ConversionError> {
        match try_convert(self.table, amount, from, to, direction) {
            Ok(value) => Ok(format_amount(value)),
            Err(e) => match self.policy {
                InvalidAmountPolicy::Zero => {
                    debug!(amount, from, to, error = %e, "Conversion fell back to zero");
                    Ok(ZERO_AMOUNT.to_string())
                }
                InvalidAmountPolicy::Reject => Err(e),
            },
        }
    }
}

/// The two linked amount fields of a conversion form and their currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountPair {
    pub pay_amount: String,
    pub pay_currency: String,
    pub receive_amount: String,
    pub receive_currency: String,
}

impl AmountPair {
    /// Called when the pay field loses focus: recomputes the receive amount.
    /// A blank pay amount leaves both fields alone.
    pub fn pay_edited(&mut self, converter: &Converter) -> Result<(), ConversionError> {
        if self.pay_amount.is_empty() {
            return Ok(());
        }
        self.receive_amount = converter.apply(
            &self.pay_amount,
            &self.pay_currency,
            &self.receive_currency,
            Direction::PayToReceive,
        )?;
        Ok(())
    }

    /// Called when the receive field loses focus: recomputes the pay amount.
    pub fn receive_edited(&mut self, converter: &Converter) -> Result<(), ConversionError> {
        let raw = strip_grouping(&self.receive_amount);
        if raw.is_empty() {
            return Ok(());
        }
        self.receive_amount = raw;
        self.pay_amount = converter.apply(
            &self.receive_amount,
            &self.pay_currency,
            &self.receive_currency,
            Direction::ReceiveToPay,
        )?;
        Ok(())
    }

    /// Changing either currency keeps the pay amount and recomputes the
    /// receive amount.
    pub fn select_pay_currency(
        &mut self,
        code: &str,
        converter: &Converter,
    ) -> Result<(), ConversionError> {
        self.pay_currency = code.to_string();
        self.pay_edited(converter)
    }

    pub fn select_receive_currency(
        &mut self,
        code: &str,
        converter: &Converter,
    ) -> Result<(), ConversionError> {
        self.receive_currency = code.to_string();
        self.pay_edited(converter)
    }
}
