//! Core business logic: rates, conversion, forms and the payout wizard

pub mod clipboard;
pub mod config;
pub mod conversion;
pub mod currency;
pub mod forms;
pub mod log;
pub mod navigation;
pub mod rates;
pub mod route;
pub mod validation;
pub mod wizard;

// Re-export main types for cleaner imports
pub use clipboard::{ClipboardSink, CopyIndicator};
pub use conversion::{Converter, InvalidAmountPolicy, convert, convert_inverse};
pub use navigation::{Navigator, Screen};
pub use rates::RateTable;
pub use route::Route;
pub use wizard::WizardState;
