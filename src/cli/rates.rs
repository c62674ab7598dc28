use super::ui;
use crate::core::currency::display_code;
use crate::core::rates::RateTable;
use comfy_table::Cell;

/// Renders every known pair; derived reverse rates are shown to 8 places.
pub fn render(table: &RateTable) -> String {
    let mut output = ui::new_styled_table();
    output.set_header(vec![
        ui::header_cell("From"),
        ui::header_cell("To"),
        ui::header_cell("Rate"),
    ]);

    for (from, to, rate) in table.pairs() {
        output.add_row(vec![
            Cell::new(display_code(from)),
            Cell::new(display_code(to)),
            ui::amount_cell(&rate.round_dp(8).normalize().to_string()),
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text("Conversion rates", ui::StyleType::Title),
        output
    )
}

pub fn run(table: &RateTable) {
    println!("{}", render(table));
}
