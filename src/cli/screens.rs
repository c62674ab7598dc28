//! Text rendering of each screen. Shared by `remit open` and the wizard.

use super::ui::{self, StyleType};
use crate::core::conversion::format_grouped;
use crate::core::currency::{self, BANKS, PAYOUT_METHODS, SelectOption, display_code};
use crate::core::forms::{self, ConversionForm, LandingTab};
use crate::core::wizard::{
    BankInfoInput, ContactInfoInput, ConversionSelection, Flow, SenderDetailsInput,
    SuccessInput,
};
use comfy_table::Cell;

pub const NOT_FOUND_TITLE: &str = "Page not found";
pub const NOT_FOUND_MESSAGE: &str = "The page you're looking for doesn't exist.";
pub const PROCESSING_TITLE: &str = "Your transaction is processing.";
pub const PROCESSING_MESSAGE: &str = "The recipient will receive it shortly.";
pub const COMING_SOON_TITLE: &str = "Coming Soon!";
pub const HOME_HINT: &str = "Go back to home";

const NOT_SELECTED: &str = "Not selected";

fn selected(options: &[SelectOption], value: &str) -> String {
    if value.is_empty() {
        NOT_SELECTED.to_string()
    } else {
        currency::label_for(options, value).to_string()
    }
}

/// The landing tab bar, with the active tab bracketed.
pub fn tab_bar(active: LandingTab) -> String {
    LandingTab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let label = format!("{}. {}", i + 1, tab.title());
            if *tab == active {
                ui::style_text(&format!("[{label}]"), StyleType::Value)
            } else {
                ui::style_text(&label, StyleType::Subtle)
            }
        })
        .collect::<Vec<_>>()
        .join("   ")
}

/// Current values of a conversion form, grouped the way the amount inputs
/// display them.
pub fn conversion_form(form: &ConversionForm) -> String {
    let amounts = &form.amounts;

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Field"), ui::header_cell("Value")]);
    table.add_row(vec![
        Cell::new("You pay"),
        ui::amount_cell(&format!(
            "{} {}",
            format_grouped(&amounts.pay_amount),
            display_code(&amounts.pay_currency)
        )),
    ]);
    table.add_row(vec![
        Cell::new("You receive"),
        ui::highlight_cell(&format!(
            "{} {}",
            format_grouped(&amounts.receive_amount),
            display_code(&amounts.receive_currency)
        )),
    ]);
    table.add_row(vec![
        Cell::new("Pay from"),
        Cell::new(selected(form.pay_from_options(), &form.pay_from)),
    ]);
    table.add_row(vec![
        Cell::new("Pay to"),
        Cell::new(selected(form.pay_to_options(), &form.pay_to)),
    ]);
    table.to_string()
}

pub fn loan_waitlist() -> String {
    [
        ui::style_text(COMING_SOON_TITLE, StyleType::Title),
        "Crypto to Fiat Loan is almost here.".to_string(),
        ui::style_text(
            "Enter your email and we'll let you know the moment it's live.",
            StyleType::Subtle,
        ),
    ]
    .join("\n")
}

pub fn landing(active: LandingTab, form: &ConversionForm) -> String {
    let body = match active {
        LandingTab::CryptoToFiatLoan => loan_waitlist(),
        _ => conversion_form(form),
    };
    format!("{}\n\n{}", tab_bar(active), body)
}

fn selection_line(selection: &ConversionSelection) -> String {
    format!(
        "You send {} {} and the recipient gets {} {}",
        format_grouped(&selection.pay_amount),
        display_code(&selection.pay_currency),
        format_grouped(&selection.receive_amount),
        display_code(&selection.receive_currency)
    )
}

fn recipient_header(step: &str) -> String {
    format!(
        "{}  {}",
        ui::style_text("Recipient details", StyleType::Title),
        ui::style_text(step, StyleType::Subtle)
    )
}

pub fn bank_info(input: &BankInfoInput, account_name: &str) -> String {
    [
        recipient_header("Bank info"),
        selection_line(&input.selection),
        format!(
            "{} {}",
            ui::style_text("Account name:", StyleType::Label),
            account_name
        ),
    ]
    .join("\n")
}

pub fn contact_info(input: &ContactInfoInput) -> String {
    [
        recipient_header("Contact info"),
        selection_line(&input.selection),
        format!(
            "{} {}, {} ({})",
            ui::style_text("Bank:", StyleType::Label),
            currency::label_for(BANKS, &input.bank.bank),
            input.bank.account_number,
            input.bank.account_name
        ),
    ]
    .join("\n")
}

pub fn sender_details(
    input: &SenderDetailsInput,
    deposit_address: &str,
    copy_label: &str,
) -> String {
    let selection = &input.transfer.selection;
    let code = display_code(&selection.pay_currency);

    let mut summary = ui::new_styled_table();
    for (label, value) in forms::sender_summary(selection) {
        summary.add_row(vec![Cell::new(label), ui::amount_cell(&value)]);
    }

    let (title, warning) = match selection.flow {
        Flow::CryptoToCash => (
            format!("Send {code} to the address below"),
            format!(
                "Only send {code} to this address. Ensure the sender is on the {code} network otherwise you might lose your deposit"
            ),
        ),
        Flow::CashToCrypto => {
            let method = selected(PAYOUT_METHODS, &selection.pay_from);
            (
                format!("Pay {code} by {method} using the reference below"),
                format!(
                    "Only pay in {code} and include this reference so the payment can be matched to your transfer"
                ),
            )
        }
    };

    [
        ui::style_text(&title, StyleType::Title),
        String::new(),
        format!(
            "  {}  {}",
            ui::style_text(deposit_address, StyleType::Value),
            ui::style_text(copy_label, StyleType::Success)
        ),
        String::new(),
        summary.to_string(),
        ui::style_text(&warning, StyleType::Subtle),
    ]
    .join("\n")
}

pub fn success(input: &SuccessInput, reference: &str, copy_label: &str) -> String {
    [
        ui::style_text(PROCESSING_TITLE, StyleType::Success),
        ui::style_text(PROCESSING_MESSAGE, StyleType::Subtle),
        String::new(),
        selection_line(&input.transfer.selection),
        format!(
            "{} {}  {}",
            ui::style_text("Transaction ID", StyleType::Label),
            ui::style_text(reference, StyleType::Value),
            ui::style_text(copy_label, StyleType::Success)
        ),
    ]
    .join("\n")
}

pub fn not_found(location: &str) -> String {
    [
        ui::style_text(NOT_FOUND_TITLE, StyleType::Title),
        ui::style_text(NOT_FOUND_MESSAGE, StyleType::Subtle),
        format!("{} ({location})", ui::style_text(HOME_HINT, StyleType::Label)),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::wizard::{BankDetails, ContactDetails, Transfer};

    fn transfer() -> Transfer {
        Transfer {
            selection: ConversionSelection {
                flow: Flow::CryptoToCash,
                pay_amount: "1.00".to_string(),
                pay_currency: "eth".to_string(),
                receive_amount: "2500000.00".to_string(),
                receive_currency: "ngn".to_string(),
                pay_from: "metamask".to_string(),
                pay_to: "bank_transfer".to_string(),
            },
            bank: BankDetails {
                bank: "gtbank".to_string(),
                account_number: "0123456789".to_string(),
                account_name: "John Doe".to_string(),
            },
            contact: ContactDetails {
                email: "ada@example.com".to_string(),
                phone_number: "+234 803 123 4567".to_string(),
            },
        }
    }

    #[test]
    fn test_landing_shows_active_tab_and_form() {
        let form = ConversionForm::new(Flow::CryptoToCash);
        let output = landing(LandingTab::CryptoToCash, &form);
        assert!(output.contains("[1. Crypto to cash]"));
        assert!(output.contains("2,500,000.00 NGN"));
        assert!(output.contains(NOT_SELECTED));

        let output = landing(LandingTab::CryptoToFiatLoan, &form);
        assert!(output.contains(COMING_SOON_TITLE));
        assert!(!output.contains("You pay"));
    }

    #[test]
    fn test_sender_details_lists_address_and_summary() {
        let input = SenderDetailsInput {
            transfer: transfer(),
        };
        let output = sender_details(&input, "4LiV4YjbxsL6739MKghUd", "[copy]");
        assert!(output.contains("Send ETH to the address below"));
        assert!(output.contains("4LiV4YjbxsL6739MKghUd"));
        assert!(output.contains("1.00 ETH"));
        assert!(output.contains("MetaMask"));
        assert!(output.contains("Only send ETH to this address"));
    }

    #[test]
    fn test_sender_details_cash_payment_wording() {
        let mut transfer = transfer();
        transfer.selection = ConversionSelection {
            flow: Flow::CashToCrypto,
            pay_amount: "5000".to_string(),
            pay_currency: "usd".to_string(),
            receive_amount: "2.00".to_string(),
            receive_currency: "eth".to_string(),
            pay_from: "bank_transfer".to_string(),
            pay_to: "rainbow".to_string(),
        };
        let input = SenderDetailsInput { transfer };
        let output = sender_details(&input, "4LiV4YjbxsL6739MKghUd", "[copy]");
        assert!(output.contains("Pay USD by Bank Transfer using the reference below"));
        assert!(output.contains("Only pay in USD"));
        assert!(!output.contains("network"));
        assert!(!output.contains("Send USD"));
    }

    #[test]
    fn test_success_and_not_found() {
        let input = SuccessInput {
            transfer: transfer(),
        };
        let output = success(&input, "NC000123456", "Copied!");
        assert!(output.contains(PROCESSING_TITLE));
        assert!(output.contains("NC000123456"));
        assert!(output.contains("Copied!"));

        let output = not_found("/nope");
        assert!(output.contains(NOT_FOUND_TITLE));
        assert!(output.contains("/nope"));
    }
}
