//! The forms of the landing tabs and the payout wizard.
//!
//! Each form holds the raw field values as typed by the user and turns them
//! into a wizard record through `validate`, collecting one message per
//! invalid field.

use crate::core::conversion::{AmountPair, ConversionError, Converter, Direction, strip_grouping};
use crate::core::currency::{
    self, BANKS, COUNTRY_CODES, CRYPTO_CURRENCIES, DEFAULT_COUNTRY_CODE, FIAT_CURRENCIES,
    PAYOUT_METHODS, SelectOption, WALLETS,
};
use crate::core::validation::{self, FieldErrors};
use crate::core::wizard::{BankDetails, ContactDetails, ConversionSelection, Flow};

/// The landing tabs in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingTab {
    CryptoToCash,
    CashToCrypto,
    CryptoToFiatLoan,
}

impl LandingTab {
    pub const ALL: [LandingTab; 3] = [
        LandingTab::CryptoToCash,
        LandingTab::CashToCrypto,
        LandingTab::CryptoToFiatLoan,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            LandingTab::CryptoToCash => "Crypto to cash",
            LandingTab::CashToCrypto => "Cash to crypto",
            LandingTab::CryptoToFiatLoan => "Crypto to fiat loan",
        }
    }
}

/// The pay/receive form behind the first two landing tabs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionForm {
    pub flow: Flow,
    pub amounts: AmountPair,
    pub pay_from: String,
    pub pay_to: String,
}

impl ConversionForm {
    pub fn new(flow: Flow) -> Self {
        let amounts = match flow {
            Flow::CryptoToCash => AmountPair {
                pay_amount: "1.00".to_string(),
                pay_currency: "eth".to_string(),
                receive_amount: "2500000.00".to_string(),
                receive_currency: "ngn".to_string(),
            },
            Flow::CashToCrypto => AmountPair {
                pay_amount: "2500000.00".to_string(),
                pay_currency: "ngn".to_string(),
                receive_amount: "1.00".to_string(),
                receive_currency: "eth".to_string(),
            },
        };
        Self {
            flow,
            amounts,
            pay_from: String::new(),
            pay_to: String::new(),
        }
    }

    pub fn pay_currencies(&self) -> &'static [SelectOption] {
        match self.flow {
            Flow::CryptoToCash => CRYPTO_CURRENCIES,
            Flow::CashToCrypto => FIAT_CURRENCIES,
        }
    }

    pub fn receive_currencies(&self) -> &'static [SelectOption] {
        match self.flow {
            Flow::CryptoToCash => FIAT_CURRENCIES,
            Flow::CashToCrypto => CRYPTO_CURRENCIES,
        }
    }

    /// Options of the "Pay from" field: a wallet when paying crypto, a
    /// payment method when paying cash.
    pub fn pay_from_options(&self) -> &'static [SelectOption] {
        match self.flow {
            Flow::CryptoToCash => WALLETS,
            Flow::CashToCrypto => PAYOUT_METHODS,
        }
    }

    pub fn pay_to_options(&self) -> &'static [SelectOption] {
        match self.flow {
            Flow::CryptoToCash => PAYOUT_METHODS,
            Flow::CashToCrypto => WALLETS,
        }
    }

    fn pay_from_message(&self) -> &'static str {
        match self.flow {
            Flow::CryptoToCash => "Wallet is required",
            Flow::CashToCrypto => "Payment method is required",
        }
    }

    fn pay_to_message(&self) -> &'static str {
        match self.flow {
            Flow::CryptoToCash => "Payment method is required",
            Flow::CashToCrypto => "Wallet is required",
        }
    }

    /// Validates every field. Under the reject policy an amount that cannot
    /// be converted is reported against `payAmount` as well.
    pub fn validate(&self, converter: &Converter) -> Result<ConversionSelection, FieldErrors> {
        let mut errors = FieldErrors::new();
        let amounts = &self.amounts;
        let pay_amount = strip_grouping(&amounts.pay_amount);
        let receive_amount = strip_grouping(&amounts.receive_amount);

        errors.check("payAmount", validation::positive_amount(&pay_amount));
        errors.check(
            "payCurrency",
            validation::required(&amounts.pay_currency, "Currency is required"),
        );
        errors.check("receiveAmount", validation::positive_amount(&receive_amount));
        errors.check(
            "receiveCurrency",
            validation::required(&amounts.receive_currency, "Currency is required"),
        );
        errors.check(
            "payFrom",
            validation::required(&self.pay_from, self.pay_from_message()),
        );
        errors.check(
            "payTo",
            validation::required(&self.pay_to, self.pay_to_message()),
        );

        if let Err(e) = converter.apply(
            &pay_amount,
            &amounts.pay_currency,
            &amounts.receive_currency,
            Direction::PayToReceive,
        ) {
            errors.add("payAmount", conversion_message(&e));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ConversionSelection {
            flow: self.flow,
            pay_amount,
            pay_currency: amounts.pay_currency.clone(),
            receive_amount,
            receive_currency: amounts.receive_currency.clone(),
            pay_from: self.pay_from.clone(),
            pay_to: self.pay_to.clone(),
        })
    }
}

fn conversion_message(error: &ConversionError) -> String {
    match error {
        ConversionError::InvalidAmount | ConversionError::NonPositive => {
            "Amount must be a positive number".to_string()
        }
        other => other.to_string(),
    }
}

/// The crypto-to-fiat loan waitlist signup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoanWaitlistForm {
    pub email: String,
}

impl LoanWaitlistForm {
    pub fn validate(&self) -> Result<String, FieldErrors> {
        let mut errors = FieldErrors::new();
        match errors.check("email", validation::email(&self.email)) {
            Some(email) => Ok(email),
            None => Err(errors),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankInfoForm {
    pub bank: String,
    pub account_number: String,
    /// Not editable; filled in from the configured placeholder.
    pub account_name: String,
}

impl BankInfoForm {
    pub fn new(account_name: &str) -> Self {
        Self {
            bank: String::new(),
            account_number: String::new(),
            account_name: account_name.to_string(),
        }
    }

    pub fn banks(&self) -> &'static [SelectOption] {
        BANKS
    }

    pub fn validate(&self) -> Result<BankDetails, FieldErrors> {
        let mut errors = FieldErrors::new();
        let bank = errors.check("bank", validation::required(&self.bank, "Bank is required"));
        let account_number = errors.check(
            "accountNumber",
            validation::account_number(&self.account_number),
        );

        match (bank, account_number) {
            (Some(bank), Some(account_number)) => Ok(BankDetails {
                bank: bank.to_string(),
                account_number: account_number.to_string(),
                account_name: self.account_name.clone(),
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInfoForm {
    pub email: String,
    pub country_code: String,
    pub phone_number: String,
}

impl Default for ContactInfoForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            phone_number: String::new(),
        }
    }
}

impl ContactInfoForm {
    pub fn country_codes(&self) -> &'static [SelectOption] {
        COUNTRY_CODES
    }

    pub fn validate(&self) -> Result<ContactDetails, FieldErrors> {
        let mut errors = FieldErrors::new();
        let email = errors.check("email", validation::email(&self.email));
        let country_code = errors.check(
            "countryCode",
            validation::required(&self.country_code, "Country code is required"),
        );
        let phone = errors.check("phoneNumber", validation::phone_number(&self.phone_number));

        match (email, country_code, phone) {
            (Some(email), Some(code), Some(phone)) => Ok(ContactDetails {
                email,
                phone_number: format!("{code} {phone}"),
            }),
            _ => Err(errors),
        }
    }
}

/// Summary rows of the sender details screen.
pub fn sender_summary(selection: &ConversionSelection) -> Vec<(&'static str, String)> {
    let pay_code = currency::display_code(&selection.pay_currency);
    let wallet_options = match selection.flow {
        Flow::CryptoToCash => WALLETS,
        Flow::CashToCrypto => PAYOUT_METHODS,
    };
    vec![
        (
            "Amount to send",
            format!("{} {pay_code}", selection.pay_amount),
        ),
        ("Network", pay_code),
        (
            "Wallet",
            currency::label_for(wallet_options, &selection.pay_from).to_string(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conversion::InvalidAmountPolicy;
    use crate::core::rates::RateTable;

    fn table() -> RateTable {
        RateTable::builtin().with_reciprocals()
    }

    #[test]
    fn test_crypto_to_cash_defaults_are_consistent() {
        let table = table();
        let converter = Converter::new(&table, InvalidAmountPolicy::Zero);
        let mut form = ConversionForm::new(Flow::CryptoToCash);
        let before = form.amounts.receive_amount.clone();
        form.amounts.pay_edited(&converter).unwrap();
        assert_eq!(form.amounts.receive_amount, before);

        let mut form = ConversionForm::new(Flow::CashToCrypto);
        form.amounts.pay_edited(&converter).unwrap();
        assert_eq!(form.amounts.receive_amount, "1.00");
    }

    #[test]
    fn test_conversion_form_requires_selections() {
        let table = table();
        let converter = Converter::new(&table, InvalidAmountPolicy::Zero);
        let form = ConversionForm::new(Flow::CryptoToCash);

        let errors = form.validate(&converter).unwrap_err();
        assert_eq!(errors.get("payFrom"), Some("Wallet is required"));
        assert_eq!(errors.get("payTo"), Some("Payment method is required"));
        assert_eq!(errors.len(), 2);

        let form = ConversionForm::new(Flow::CashToCrypto);
        let errors = form.validate(&converter).unwrap_err();
        assert_eq!(errors.get("payFrom"), Some("Payment method is required"));
        assert_eq!(errors.get("payTo"), Some("Wallet is required"));
    }

    #[test]
    fn test_conversion_form_produces_selection() {
        let table = table();
        let converter = Converter::new(&table, InvalidAmountPolicy::Zero);
        let mut form = ConversionForm::new(Flow::CryptoToCash);
        form.amounts.receive_amount = "2,500,000.00".to_string();
        form.pay_from = "metamask".to_string();
        form.pay_to = "bank_transfer".to_string();

        let selection = form.validate(&converter).unwrap();
        assert_eq!(selection.flow, Flow::CryptoToCash);
        assert_eq!(selection.receive_amount, "2500000.00");
        assert_eq!(selection.pay_from, "metamask");

        let mut form = ConversionForm::new(Flow::CashToCrypto);
        form.amounts.pay_amount = "2,500,000.00".to_string();
        form.pay_from = "bank_transfer".to_string();
        form.pay_to = "rainbow".to_string();

        let selection = form.validate(&converter).unwrap();
        assert_eq!(selection.pay_amount, "2500000.00");
    }

    #[test]
    fn test_conversion_form_amount_rules() {
        let table = table();
        let converter = Converter::new(&table, InvalidAmountPolicy::Zero);
        let mut form = ConversionForm::new(Flow::CryptoToCash);
        form.pay_from = "rainbow".to_string();
        form.pay_to = "cash_pickup".to_string();
        form.amounts.pay_amount = String::new();
        form.amounts.receive_amount = "0.00".to_string();

        let errors = form.validate(&converter).unwrap_err();
        assert_eq!(errors.get("payAmount"), Some("Amount is required"));
        assert_eq!(
            errors.get("receiveAmount"),
            Some("Amount must be a positive number")
        );
    }

    #[test]
    fn test_reject_policy_blocks_unsupported_pair() {
        let table = table();
        let converter = Converter::new(&table, InvalidAmountPolicy::Reject);
        let mut form = ConversionForm::new(Flow::CryptoToCash);
        form.pay_from = "rainbow".to_string();
        form.pay_to = "cash_pickup".to_string();
        form.amounts.receive_currency = "jpy".to_string();

        let errors = form.validate(&converter).unwrap_err();
        assert_eq!(
            errors.get("payAmount"),
            Some("No conversion rate from eth to jpy")
        );

        let zero = Converter::new(&table, InvalidAmountPolicy::Zero);
        assert!(form.validate(&zero).is_ok());
    }

    #[test]
    fn test_loan_waitlist_form() {
        let form = LoanWaitlistForm {
            email: " ada@example.com ".to_string(),
        };
        assert_eq!(form.validate().unwrap(), "ada@example.com");

        let errors = LoanWaitlistForm::default().validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Email is required"));
    }

    #[test]
    fn test_bank_info_form() {
        let mut form = BankInfoForm::new("John Doe");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("bank"), Some("Bank is required"));
        assert_eq!(errors.get("accountNumber"), Some("Account number is required"));

        form.bank = "uba".to_string();
        form.account_number = "12ab".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("accountNumber"),
            Some("Account number must contain only digits")
        );

        form.account_number = "0123456789".to_string();
        let details = form.validate().unwrap();
        assert_eq!(details.account_name, "John Doe");
        assert_eq!(details.bank, "uba");
    }

    #[test]
    fn test_contact_info_form() {
        let mut form = ContactInfoForm::default();
        assert_eq!(form.country_code, "+234");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("phoneNumber"), Some("Phone number is required"));

        form.email = "ada@example.com".to_string();
        form.phone_number = "803 123 4567".to_string();
        form.country_code = "+44".to_string();
        let details = form.validate().unwrap();
        assert_eq!(details.phone_number, "+44 803 123 4567");

        form.country_code = String::new();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("countryCode"), Some("Country code is required"));
    }

    #[test]
    fn test_sender_summary() {
        let selection = ConversionSelection {
            flow: Flow::CryptoToCash,
            pay_amount: "0.25".to_string(),
            pay_currency: "usdt".to_string(),
            receive_amount: "375.00".to_string(),
            receive_currency: "ngn".to_string(),
            pay_from: "walletconnect".to_string(),
            pay_to: "mobile_money".to_string(),
        };
        let rows = sender_summary(&selection);
        assert_eq!(rows[0], ("Amount to send", "0.25 USDT".to_string()));
        assert_eq!(rows[1], ("Network", "USDT".to_string()));
        assert_eq!(rows[2], ("Wallet", "Wallet Connect".to_string()));
    }
}
