//! Terminal front end: command handlers, screens and shared styling

pub mod open;
pub mod quote;
pub mod rates;
pub mod screens;
pub mod setup;
pub mod ui;
pub mod wizard;
