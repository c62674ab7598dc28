use crate::core::validation::FieldErrors;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Label,
    Value,
    Error,
    Subtle,
    Success,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Label => style(text).bold(),
        StyleType::Value => style(text).cyan().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
        StyleType::Success => style(text).green().bold(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Right aligned cell for amounts and rates.
pub fn amount_cell(text: &str) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Bold green cell, used for the converted amount.
pub fn highlight_cell(text: &str) -> Cell {
    Cell::new(text)
        .add_attribute(Attribute::Bold)
        .fg(Color::Green)
        .set_alignment(CellAlignment::Right)
}

/// Width of the attached terminal, 80 columns otherwise.
pub fn terminal_width() -> usize {
    console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w as usize)
        .unwrap_or(80)
}

/// A separator line matching the terminal width.
pub fn separator() -> String {
    "─".repeat(terminal_width())
}

/// Formats field errors the way they appear under a form.
pub fn field_error_lines(errors: &FieldErrors) -> Vec<String> {
    errors
        .iter()
        .map(|(field, message)| {
            format!(
                "  {} {}",
                style_text(&format!("{field}:"), StyleType::Subtle),
                style_text(message, StyleType::Error)
            )
        })
        .collect()
}
