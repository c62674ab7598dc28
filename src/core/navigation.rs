//! Route resolution and the navigator owning the carried wizard state.

use crate::core::route::{PayTab, Route};
use crate::core::wizard::{
    BankInfoInput, ContactInfoInput, SenderDetailsInput, StepInput, SuccessInput, WizardState,
};
use tracing::debug;

/// What a location renders once its step gate has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Landing,
    BankInfo(BankInfoInput),
    ContactInfo(ContactInfoInput),
    SenderDetails(SenderDetailsInput),
    Success(SuccessInput),
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Render(Screen),
    /// A predecessor record is missing; go back to `/`.
    RedirectHome,
}

fn gate<T: StepInput>(state: &WizardState, screen: fn(T) -> Screen) -> Resolution {
    match T::from_state(state) {
        Some(input) => Resolution::Render(screen(input)),
        None => {
            debug!(step = %T::STEP, "Missing wizard state, redirecting to /");
            Resolution::RedirectHome
        }
    }
}

/// Resolves a route against the state handed over by the previous step.
pub fn resolve(route: &Route, state: &WizardState) -> Resolution {
    match route {
        Route::Index => Resolution::Render(Screen::Landing),
        Route::Pay(PayTab::BankInfo) => gate(state, Screen::BankInfo),
        Route::Pay(PayTab::ContactInfo) => gate(state, Screen::ContactInfo),
        Route::Pay(PayTab::SenderDetails) => gate(state, Screen::SenderDetails),
        Route::Success => gate(state, Screen::Success),
        Route::NotFound(location) => Resolution::Render(Screen::NotFound(location.clone())),
    }
}

/// Current location plus the state that travelled with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    location: Route,
    state: WizardState,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            location: Route::Index,
            state: WizardState::default(),
        }
    }

    pub fn location(&self) -> &Route {
        &self.location
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Moves to `route`, replacing the carried state with `state`.
    pub fn navigate(&mut self, route: Route, state: WizardState) {
        debug!(from = %self.location, to = %route, "Navigating");
        self.location = route;
        self.state = state;
    }

    /// Back to `/`, dropping everything collected so far.
    pub fn home(&mut self) {
        self.navigate(Route::Index, WizardState::default());
    }

    /// The screen for the current location. A failed step gate moves the
    /// navigator to `/` and renders the landing screen.
    pub fn current(&mut self) -> Screen {
        match resolve(&self.location, &self.state) {
            Resolution::Render(screen) => screen,
            Resolution::RedirectHome => {
                self.home();
                Screen::Landing
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::wizard::{BankDetails, ConversionSelection, Flow};

    fn selection() -> ConversionSelection {
        ConversionSelection {
            flow: Flow::CryptoToCash,
            pay_amount: "50".to_string(),
            pay_currency: "usdt".to_string(),
            receive_amount: "50.00".to_string(),
            receive_currency: "usd".to_string(),
            pay_from: "other".to_string(),
            pay_to: "direct_transfer".to_string(),
        }
    }

    #[test]
    fn test_contact_info_without_bank_info_redirects_home() {
        let mut nav = Navigator::new();
        let state = WizardState::default().with_selection(selection());
        nav.navigate(Route::parse("/pay?tab=contact-info"), state);

        assert_eq!(nav.current(), Screen::Landing);
        assert_eq!(nav.location(), &Route::Index);
        assert_eq!(nav.state(), &WizardState::default());
    }

    #[test]
    fn test_gated_steps_render_with_state() {
        let state = WizardState::default().with_selection(selection());
        match resolve(&Route::Pay(PayTab::BankInfo), &state) {
            Resolution::Render(Screen::BankInfo(input)) => {
                assert_eq!(input.selection.pay_amount, "50")
            }
            other => panic!("Expected bank info screen, got {other:?}"),
        }

        let state = state.with_bank_info(BankDetails {
            bank: "access_bank".to_string(),
            account_number: "0001112223".to_string(),
            account_name: "John Doe".to_string(),
        });
        assert!(matches!(
            resolve(&Route::Pay(PayTab::ContactInfo), &state),
            Resolution::Render(Screen::ContactInfo(_))
        ));
        assert_eq!(
            resolve(&Route::Pay(PayTab::SenderDetails), &state),
            Resolution::RedirectHome
        );
        assert_eq!(resolve(&Route::Success, &state), Resolution::RedirectHome);
    }

    #[test]
    fn test_landing_and_not_found_need_no_state() {
        let state = WizardState::default();
        assert_eq!(
            resolve(&Route::Index, &state),
            Resolution::Render(Screen::Landing)
        );
        assert_eq!(
            resolve(&Route::parse("/nope"), &state),
            Resolution::Render(Screen::NotFound("/nope".to_string()))
        );
    }
}
