//! State carried across the payout wizard and the typed guards each step
//! applies to it before rendering.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Which landing tab produced the conversion selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    #[default]
    CryptoToCash,
    CashToCrypto,
}

/// The submitted landing form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionSelection {
    #[serde(default)]
    pub flow: Flow,
    pub pay_amount: String,
    pub pay_currency: String,
    pub receive_amount: String,
    pub receive_currency: String,
    pub pay_from: String,
    pub pay_to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    pub bank: String,
    pub account_number: String,
    pub account_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub email: String,
    /// Dialling code and local number, e.g. `+234 803 123 4567`.
    pub phone_number: String,
}

/// Everything collected so far. Steps only ever add their own record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crypto_to_cash: Option<ConversionSelection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_info: Option<BankDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<ContactDetails>,
}

impl WizardState {
    pub fn with_selection(self, selection: ConversionSelection) -> Self {
        Self {
            crypto_to_cash: Some(selection),
            ..self
        }
    }

    pub fn with_bank_info(self, bank: BankDetails) -> Self {
        Self {
            bank_info: Some(bank),
            ..self
        }
    }

    pub fn with_contact_info(self, contact: ContactDetails) -> Self {
        Self {
            contact_info: Some(contact),
            ..self
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse wizard state")
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read wizard state: {}", path.as_ref().display())
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize wizard state")
    }
}

/// The steps of the payout wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    BankInfo,
    ContactInfo,
    SenderDetails,
    Success,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Step::BankInfo => "bank-info",
                Step::ContactInfo => "contact-info",
                Step::SenderDetails => "sender-details",
                Step::Success => "success",
            }
        )
    }
}

/// The typed input of a wizard step, extracted from the carried state.
///
/// `from_state` is the only presence check a step performs: `None` means a
/// predecessor record is missing and the step must not render.
pub trait StepInput: Sized {
    const STEP: Step;

    fn from_state(state: &WizardState) -> Option<Self>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankInfoInput {
    pub selection: ConversionSelection,
}

impl StepInput for BankInfoInput {
    const STEP: Step = Step::BankInfo;

    fn from_state(state: &WizardState) -> Option<Self> {
        Some(Self {
            selection: state.crypto_to_cash.clone()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInfoInput {
    pub selection: ConversionSelection,
    pub bank: BankDetails,
}

impl StepInput for ContactInfoInput {
    const STEP: Step = Step::ContactInfo;

    fn from_state(state: &WizardState) -> Option<Self> {
        Some(Self {
            selection: state.crypto_to_cash.clone()?,
            bank: state.bank_info.clone()?,
        })
    }
}

/// All three records, as needed by the last two steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub selection: ConversionSelection,
    pub bank: BankDetails,
    pub contact: ContactDetails,
}

impl Transfer {
    fn from_state(state: &WizardState) -> Option<Self> {
        Some(Self {
            selection: state.crypto_to_cash.clone()?,
            bank: state.bank_info.clone()?,
            contact: state.contact_info.clone()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderDetailsInput {
    pub transfer: Transfer,
}

impl StepInput for SenderDetailsInput {
    const STEP: Step = Step::SenderDetails;

    fn from_state(state: &WizardState) -> Option<Self> {
        Transfer::from_state(state).map(|transfer| Self { transfer })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessInput {
    pub transfer: Transfer,
}

impl StepInput for SuccessInput {
    const STEP: Step = Step::Success;

    fn from_state(state: &WizardState) -> Option<Self> {
        Transfer::from_state(state).map(|transfer| Self { transfer })
    }
}

/// Reference shown on the success screen: `NC` and nine digits taken from
/// the issue time.
pub fn transaction_reference(issued_at: DateTime<Utc>) -> String {
    let digits = issued_at.timestamp_millis().rem_euclid(1_000_000_000);
    format!("NC{digits:09}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn selection() -> ConversionSelection {
        ConversionSelection {
            flow: Flow::CryptoToCash,
            pay_amount: "1.00".to_string(),
            pay_currency: "eth".to_string(),
            receive_amount: "2500000.00".to_string(),
            receive_currency: "ngn".to_string(),
            pay_from: "metamask".to_string(),
            pay_to: "bank_transfer".to_string(),
        }
    }

    fn bank() -> BankDetails {
        BankDetails {
            bank: "gtbank".to_string(),
            account_number: "0123456789".to_string(),
            account_name: "John Doe".to_string(),
        }
    }

    fn contact() -> ContactDetails {
        ContactDetails {
            email: "ada@example.com".to_string(),
            phone_number: "+234 803 123 4567".to_string(),
        }
    }

    #[test]
    fn test_gates_require_predecessors() {
        let empty = WizardState::default();
        assert!(BankInfoInput::from_state(&empty).is_none());

        let after_landing = empty.with_selection(selection());
        assert!(BankInfoInput::from_state(&after_landing).is_some());
        assert!(ContactInfoInput::from_state(&after_landing).is_none());

        let after_bank = after_landing.with_bank_info(bank());
        let input = ContactInfoInput::from_state(&after_bank).unwrap();
        assert_eq!(input.bank.bank, "gtbank");
        assert!(SenderDetailsInput::from_state(&after_bank).is_none());

        let complete = after_bank.with_contact_info(contact());
        assert!(SenderDetailsInput::from_state(&complete).is_some());
        assert_eq!(
            SuccessInput::from_state(&complete).unwrap().transfer.contact,
            contact()
        );
    }

    #[test]
    fn test_contact_without_bank_info_is_rejected() {
        let state = WizardState::default()
            .with_selection(selection())
            .with_contact_info(contact());
        assert!(ContactInfoInput::from_state(&state).is_none());
        assert!(SenderDetailsInput::from_state(&state).is_none());
    }

    #[test]
    fn test_appending_keeps_previous_records() {
        let state = WizardState::default()
            .with_selection(selection())
            .with_bank_info(bank());
        let next = state.clone().with_contact_info(contact());
        assert_eq!(next.crypto_to_cash, state.crypto_to_cash);
        assert_eq!(next.bank_info, state.bank_info);
        assert!(state.contact_info.is_none());
    }

    #[test]
    fn test_state_json_uses_navigation_keys() {
        let state = WizardState::default()
            .with_selection(selection())
            .with_bank_info(bank());
        let json = state.to_json().unwrap();
        assert!(json.contains("\"cryptoToCash\""));
        assert!(json.contains("\"payAmount\": \"1.00\""));
        assert!(json.contains("\"accountNumber\""));
        assert!(!json.contains("contactInfo"));

        let parsed = WizardState::from_json(&json).unwrap();
        assert_eq!(parsed, state);
    }

    #[test]
    fn test_state_json_without_flow_defaults_to_crypto_to_cash() {
        let json = r#"{
            "cryptoToCash": {
                "payAmount": "1.00",
                "payCurrency": "eth",
                "receiveAmount": "2500000.00",
                "receiveCurrency": "ngn",
                "payFrom": "other",
                "payTo": "cash_pickup"
            }
        }"#;
        let state = WizardState::from_json(json).unwrap();
        assert_eq!(state.crypto_to_cash.unwrap().flow, Flow::CryptoToCash);
        assert!(WizardState::from_json("{\"bankInfo\": 3}").is_err());
    }

    #[test]
    fn test_transaction_reference() {
        let issued = Utc.timestamp_millis_opt(1_760_000_123_456).unwrap();
        assert_eq!(transaction_reference(issued), "NC000123456");
        assert_eq!(Step::ContactInfo.to_string(), "contact-info");
    }
}
