//! Static conversion rates keyed by (source, target) currency code.

use anyhow::{Result, bail};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Rates as they appear in configuration: `source -> target -> rate`.
pub type RateOverrides = BTreeMap<String, BTreeMap<String, Decimal>>;

/// Units of target currency per one unit of source currency.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    rates: HashMap<(String, String), Decimal>,
}

fn key(from: &str, to: &str) -> (String, String) {
    (from.trim().to_lowercase(), to.trim().to_lowercase())
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The rates shipped with the application, crypto to fiat only.
    pub fn builtin() -> Self {
        let table: [(&str, [(&str, Decimal); 4]); 4] = [
            (
                "eth",
                [
                    ("ngn", Decimal::new(2_500_000, 0)),
                    ("usd", Decimal::new(2_500, 0)),
                    ("eur", Decimal::new(2_300, 0)),
                    ("gbp", Decimal::new(2_000, 0)),
                ],
            ),
            (
                "usdt",
                [
                    ("ngn", Decimal::new(1_500, 0)),
                    ("usd", Decimal::ONE),
                    ("eur", Decimal::new(92, 2)),
                    ("gbp", Decimal::new(79, 2)),
                ],
            ),
            (
                "usdc",
                [
                    ("ngn", Decimal::new(1_500, 0)),
                    ("usd", Decimal::ONE),
                    ("eur", Decimal::new(92, 2)),
                    ("gbp", Decimal::new(79, 2)),
                ],
            ),
            (
                "bnb",
                [
                    ("ngn", Decimal::new(500_000, 0)),
                    ("usd", Decimal::new(500, 0)),
                    ("eur", Decimal::new(460, 0)),
                    ("gbp", Decimal::new(400, 0)),
                ],
            ),
        ];

        let rates = table
            .iter()
            .flat_map(|(from, targets)| {
                targets
                    .iter()
                    .map(move |(to, rate)| (key(from, to), *rate))
            })
            .collect();
        Self { rates }
    }

    /// Builds the builtin table, applies configured overrides and fills in
    /// reciprocal rates for the reverse direction.
    pub fn from_overrides(overrides: &RateOverrides) -> Result<Self> {
        let mut table = Self::builtin();
        for (from, targets) in overrides {
            for (to, rate) in targets {
                table.insert(from, to, *rate)?;
            }
        }
        Ok(table.with_reciprocals())
    }

    /// Inserts or replaces a rate. Rates must be positive.
    pub fn insert(&mut self, from: &str, to: &str, rate: Decimal) -> Result<()> {
        if rate <= Decimal::ZERO {
            bail!("Conversion rate {from}->{to} must be positive, got {rate}");
        }
        debug!(from, to, %rate, "Registering conversion rate");
        self.rates.insert(key(from, to), rate);
        Ok(())
    }

    pub fn rate(&self, from: &str, to: &str) -> Option<Decimal> {
        self.rates.get(&key(from, to)).copied()
    }

    /// Adds `to -> from = 1 / rate` for every pair whose reverse direction is
    /// not already present. Explicit entries always win.
    pub fn with_reciprocals(mut self) -> Self {
        let missing: Vec<_> = self
            .rates
            .iter()
            .filter(|((from, to), _)| !self.rates.contains_key(&(to.clone(), from.clone())))
            .filter_map(|((from, to), rate)| {
                Decimal::ONE
                    .checked_div(*rate)
                    .map(|inverse| ((to.clone(), from.clone()), inverse))
            })
            .collect();
        self.rates.extend(missing);
        self
    }

    /// All pairs sorted by source then target code.
    pub fn pairs(&self) -> Vec<(&str, &str, Decimal)> {
        let mut pairs: Vec<_> = self
            .rates
            .iter()
            .map(|((from, to), rate)| (from.as_str(), to.as_str(), *rate))
            .collect();
        pairs.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        pairs
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
