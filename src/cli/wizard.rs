//! The interactive payout wizard.
//!
//! Every screen is driven by line input. At any prompt `:home` goes back to
//! the landing tabs with an empty state and `:quit` (or end of input) exits.

use super::screens;
use super::ui::{self, StyleType};
use crate::core::Navigator;
use crate::core::clipboard::{ClipboardSink, CopyIndicator};
use crate::core::config::AppConfig;
use crate::core::conversion::{ConversionError, Converter, format_grouped, strip_grouping};
use crate::core::currency::{self, SelectOption};
use crate::core::forms::{
    BankInfoForm, ContactInfoForm, ConversionForm, LandingTab, LoanWaitlistForm,
};
use crate::core::navigation::Screen;
use crate::core::route::{PayTab, Route};
use crate::core::validation::FieldErrors;
use crate::core::wizard::{
    BankInfoInput, ContactInfoInput, Flow, SenderDetailsInput, SuccessInput, WizardState,
    transaction_reference,
};
use crate::providers::TerminalClipboard;
use anyhow::{Context, Result};
use chrono::Utc;
use std::io::{BufRead, Write};
use tracing::{debug, info};

pub const HOME_COMMAND: &str = ":home";
pub const QUIT_COMMAND: &str = ":quit";

/// What a prompt produced.
enum Answer {
    Value(String),
    Home,
    Quit,
}

/// Whether the wizard keeps running after a screen.
#[derive(Debug, PartialEq, Eq)]
enum Control {
    Continue,
    Quit,
}

/// Unwraps an [`Answer`], leaving the current screen on `:home` or `:quit`.
macro_rules! answer {
    ($wizard:ident, $prompt:expr) => {
        match $prompt? {
            Answer::Value(value) => value,
            Answer::Home => {
                $wizard.navigator.home();
                return Ok(Control::Continue);
            }
            Answer::Quit => return Ok(Control::Quit),
        }
    };
}

/// Picks an option by 1-based index or by value.
fn pick<'a>(options: &'a [SelectOption], input: &str) -> Option<&'a SelectOption> {
    index(input)
        .and_then(|i| options.get(i))
        .or_else(|| currency::find(options, input))
}

/// Zero-based index of a 1-based numeric answer. Signed input such as `+1`
/// is a value, not an index.
fn index(input: &str) -> Option<usize> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    input.parse::<usize>().ok()?.checked_sub(1)
}

pub struct Wizard<'a, R, W> {
    config: &'a AppConfig,
    converter: Converter<'a>,
    clipboard: &'a dyn ClipboardSink,
    indicator: CopyIndicator,
    navigator: Navigator,
    reference: Option<String>,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Wizard<'a, R, W> {
    pub fn new(
        config: &'a AppConfig,
        converter: Converter<'a>,
        clipboard: &'a dyn ClipboardSink,
        input: R,
        output: W,
    ) -> Self {
        Self {
            config,
            converter,
            clipboard,
            indicator: CopyIndicator::new(config.clipboard.reset_after()),
            navigator: Navigator::new(),
            reference: None,
            input,
            output,
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Runs screens until the user quits or input ends.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\n{}", ui::separator())?;
            let control = match self.navigator.current() {
                Screen::Landing => self.landing()?,
                Screen::BankInfo(input) => self.bank_info(&input)?,
                Screen::ContactInfo(input) => self.contact_info(&input)?,
                Screen::SenderDetails(input) => self.sender_details(&input).await?,
                Screen::Success(input) => self.success(&input).await?,
                Screen::NotFound(location) => {
                    writeln!(self.output, "{}", screens::not_found(&location))?;
                    self.navigator.home();
                    Control::Continue
                }
            };
            if control == Control::Quit {
                debug!(location = %self.navigator.location(), "Leaving wizard");
                return Ok(());
            }
        }
    }

    fn prompt(&mut self, label: &str) -> Result<Answer> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(Answer::Quit);
        }

        Ok(match line.trim() {
            HOME_COMMAND => Answer::Home,
            QUIT_COMMAND => Answer::Quit,
            value => Answer::Value(value.to_string()),
        })
    }

    /// Lists `options` and asks for one. A blank answer keeps `current`,
    /// which may itself be blank and is then left to form validation.
    fn choose(
        &mut self,
        label: &str,
        options: &[SelectOption],
        current: &str,
    ) -> Result<Answer> {
        for (i, option) in options.iter().enumerate() {
            if option.label.eq_ignore_ascii_case(option.value) {
                writeln!(self.output, "  {}) {}", i + 1, option.label)?;
            } else {
                writeln!(self.output, "  {}) {} ({})", i + 1, option.label, option.value)?;
            }
        }
        let label = if current.is_empty() {
            label.to_string()
        } else {
            format!("{label} [{}]", currency::label_for(options, current))
        };

        loop {
            let value = match self.prompt(&label)? {
                Answer::Value(value) => value,
                other => return Ok(other),
            };
            if value.is_empty() {
                return Ok(Answer::Value(current.to_string()));
            }
            match pick(options, &value) {
                Some(option) => return Ok(Answer::Value(option.value.to_string())),
                None => self.error(&format!("Unknown choice: {value}"))?,
            }
        }
    }

    fn error(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", ui::style_text(message, StyleType::Error))?;
        Ok(())
    }

    fn field_errors(&mut self, errors: &FieldErrors) -> Result<()> {
        for line in ui::field_error_lines(errors) {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    fn synced(&mut self, result: Result<(), ConversionError>) -> Result<()> {
        match result {
            Ok(()) => Ok(()),
            Err(e) => self.error(&e.to_string()),
        }
    }

    fn landing(&mut self) -> Result<Control> {
        writeln!(self.output, "{}", screens::tab_bar(LandingTab::CryptoToCash))?;
        let tab = loop {
            let value = answer!(self, self.prompt("Choose a tab [1]"));
            let index = if value.is_empty() { "1" } else { value.as_str() };
            match pick_tab(index) {
                Some(tab) => break tab,
                None => self.error(&format!("Unknown tab: {value}"))?,
            }
        };

        match tab {
            LandingTab::CryptoToCash => self.conversion(Flow::CryptoToCash),
            LandingTab::CashToCrypto => self.conversion(Flow::CashToCrypto),
            LandingTab::CryptoToFiatLoan => self.loan_waitlist(),
        }
    }

    fn conversion(&mut self, flow: Flow) -> Result<Control> {
        let converter = self.converter;
        let mut form = ConversionForm::new(flow);
        let (from_label, to_label) = match flow {
            Flow::CryptoToCash => ("Pay from wallet", "Receive cash by"),
            Flow::CashToCrypto => ("Pay cash by", "Receive to wallet"),
        };

        loop {
            writeln!(self.output, "{}", screens::conversion_form(&form))?;

            let code = answer!(
                self,
                self.choose(
                    "You pay currency",
                    form.pay_currencies(),
                    &form.amounts.pay_currency
                )
            );
            if code != form.amounts.pay_currency {
                let synced = form.amounts.select_pay_currency(&code, &converter);
                self.synced(synced)?;
            }

            let amount = answer!(
                self,
                self.prompt(&format!(
                    "You pay [{}]",
                    format_grouped(&form.amounts.pay_amount)
                ))
            );
            if !amount.is_empty() {
                form.amounts.pay_amount = strip_grouping(&amount);
                let synced = form.amounts.pay_edited(&converter);
                self.synced(synced)?;
            }

            let code = answer!(
                self,
                self.choose(
                    "You receive currency",
                    form.receive_currencies(),
                    &form.amounts.receive_currency
                )
            );
            if code != form.amounts.receive_currency {
                let synced = form.amounts.select_receive_currency(&code, &converter);
                self.synced(synced)?;
            }

            let amount = answer!(
                self,
                self.prompt(&format!(
                    "You receive [{}]",
                    format_grouped(&form.amounts.receive_amount)
                ))
            );
            if !amount.is_empty() {
                form.amounts.receive_amount = amount;
                let synced = form.amounts.receive_edited(&converter);
                self.synced(synced)?;
            }

            writeln!(self.output, "{}", screens::conversion_form(&form))?;

            form.pay_from = answer!(
                self,
                self.choose(from_label, form.pay_from_options(), &form.pay_from)
            );
            form.pay_to = answer!(
                self,
                self.choose(to_label, form.pay_to_options(), &form.pay_to)
            );

            match form.validate(&converter) {
                Ok(selection) => {
                    info!(flow = ?flow, "Conversion submitted");
                    self.navigator.navigate(
                        Route::Pay(PayTab::BankInfo),
                        WizardState::default().with_selection(selection),
                    );
                    return Ok(Control::Continue);
                }
                Err(errors) => self.field_errors(&errors)?,
            }
        }
    }

    fn loan_waitlist(&mut self) -> Result<Control> {
        writeln!(self.output, "{}", screens::loan_waitlist())?;
        let mut form = LoanWaitlistForm::default();
        loop {
            form.email = answer!(self, self.prompt("Email"));
            match form.validate() {
                Ok(email) => {
                    info!(email, "Joined the loan waitlist");
                    writeln!(
                        self.output,
                        "{}",
                        ui::style_text(
                            &format!("Thanks! We'll let {email} know when it's live."),
                            StyleType::Success
                        )
                    )?;
                    return Ok(Control::Continue);
                }
                Err(errors) => self.field_errors(&errors)?,
            }
        }
    }

    fn bank_info(&mut self, input: &BankInfoInput) -> Result<Control> {
        let config = self.config;
        let placeholder = &config.payout.account_name_placeholder;
        writeln!(self.output, "{}", screens::bank_info(input, placeholder))?;

        let mut form = BankInfoForm::new(placeholder);
        loop {
            form.bank = answer!(self, self.choose("Bank", form.banks(), &form.bank));
            form.account_number = answer!(self, self.prompt("Account number"));
            match form.validate() {
                Ok(bank) => {
                    let state = self.navigator.state().clone().with_bank_info(bank);
                    self.navigator
                        .navigate(Route::Pay(PayTab::ContactInfo), state);
                    return Ok(Control::Continue);
                }
                Err(errors) => self.field_errors(&errors)?,
            }
        }
    }

    fn contact_info(&mut self, input: &ContactInfoInput) -> Result<Control> {
        writeln!(self.output, "{}", screens::contact_info(input))?;

        let mut form = ContactInfoForm::default();
        loop {
            form.email = answer!(self, self.prompt("Recipient email"));
            form.country_code = answer!(
                self,
                self.choose("Country code", form.country_codes(), &form.country_code)
            );
            form.phone_number = answer!(self, self.prompt("Recipient phone number"));
            match form.validate() {
                Ok(contact) => {
                    let state = self.navigator.state().clone().with_contact_info(contact);
                    self.navigator
                        .navigate(Route::Pay(PayTab::SenderDetails), state);
                    return Ok(Control::Continue);
                }
                Err(errors) => self.field_errors(&errors)?,
            }
        }
    }

    async fn sender_details(&mut self, input: &SenderDetailsInput) -> Result<Control> {
        let config = self.config;
        let address = &config.payout.deposit_address;
        self.indicator = CopyIndicator::new(config.clipboard.reset_after());

        loop {
            writeln!(
                self.output,
                "{}",
                screens::sender_details(input, address, self.indicator.label())
            )?;
            let action = answer!(
                self,
                self.prompt("[c] copy address  [s] I have sent it  [h] home")
            );
            match action.to_lowercase().as_str() {
                "c" => {
                    self.indicator.copy(self.clipboard, address).await;
                }
                "s" => {
                    self.reference = Some(transaction_reference(Utc::now()));
                    let state = self.navigator.state().clone();
                    self.navigator.navigate(Route::Success, state);
                    return Ok(Control::Continue);
                }
                "h" => {
                    self.navigator.home();
                    return Ok(Control::Continue);
                }
                _ => self.error(&format!("Unknown action: {action}"))?,
            }
        }
    }

    async fn success(&mut self, input: &SuccessInput) -> Result<Control> {
        debug!(state = ?self.navigator.state(), "Transaction submitted");
        let reference = self
            .reference
            .get_or_insert_with(|| transaction_reference(Utc::now()))
            .clone();
        self.indicator = CopyIndicator::new(self.config.clipboard.reset_after());

        loop {
            writeln!(
                self.output,
                "{}",
                screens::success(input, &reference, self.indicator.label())
            )?;
            let action = answer!(
                self,
                self.prompt(&format!(
                    "[c] copy transaction ID  [h] {}  [q] quit",
                    screens::HOME_HINT
                ))
            );
            match action.to_lowercase().as_str() {
                "c" => {
                    self.indicator.copy(self.clipboard, &reference).await;
                }
                "h" => {
                    self.reference = None;
                    self.navigator.home();
                    return Ok(Control::Continue);
                }
                "q" => return Ok(Control::Quit),
                _ => self.error(&format!("Unknown action: {action}"))?,
            }
        }
    }
}

fn pick_tab(input: &str) -> Option<LandingTab> {
    index(input).and_then(|i| LandingTab::ALL.get(i)).copied()
}

/// Runs the wizard on stdin and stdout, copying through the terminal.
pub async fn run(config: &AppConfig) -> Result<()> {
    let table = config.rate_table()?;
    let converter = Converter::new(&table, config.conversion.invalid_amount);
    let clipboard = TerminalClipboard::new();
    let stdin = std::io::stdin();

    info!(rates = table.len(), "Starting wizard");
    let mut wizard = Wizard::new(
        config,
        converter,
        &clipboard,
        stdin.lock(),
        std::io::stdout(),
    );
    wizard.run().await
}
