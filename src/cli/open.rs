use super::screens;
use crate::core::clipboard::COPY_LABEL;
use crate::core::config::AppConfig;
use crate::core::forms::{ConversionForm, LandingTab};
use crate::core::navigation::{Navigator, Screen};
use crate::core::route::Route;
use crate::core::wizard::{Flow, WizardState, transaction_reference};
use anyhow::Result;
use chrono::Utc;
use tracing::{debug, info};

/// Renders a screen with the default copy label. The landing screen shows
/// the first tab with its default form.
pub fn render_screen(config: &AppConfig, screen: &Screen) -> String {
    match screen {
        Screen::Landing => screens::landing(
            LandingTab::CryptoToCash,
            &ConversionForm::new(Flow::CryptoToCash),
        ),
        Screen::BankInfo(input) => {
            screens::bank_info(input, &config.payout.account_name_placeholder)
        }
        Screen::ContactInfo(input) => screens::contact_info(input),
        Screen::SenderDetails(input) => {
            screens::sender_details(input, &config.payout.deposit_address, COPY_LABEL)
        }
        Screen::Success(input) => {
            debug!(state = ?input.transfer, "Rendering success screen");
            screens::success(input, &transaction_reference(Utc::now()), COPY_LABEL)
        }
        Screen::NotFound(location) => screens::not_found(location),
    }
}

/// Resolves `location` against `state` and renders where it ends up.
pub fn render_location(config: &AppConfig, location: &str, state: &WizardState) -> String {
    let route = Route::parse(location);
    let mut navigator = Navigator::new();
    navigator.navigate(route.clone(), state.clone());
    let screen = navigator.current();

    if navigator.location() != &route {
        debug!(%route, "Rendering landing in place of gated location");
    }
    render_screen(config, &screen)
}

pub fn run(config: &AppConfig, location: &str, state_path: Option<&str>) -> Result<()> {
    let state = match state_path {
        Some(path) => WizardState::load_from_path(path)?,
        None => WizardState::default(),
    };
    info!(location, "Opening location");
    println!("{}", render_location(config, location, &state));
    Ok(())
}
