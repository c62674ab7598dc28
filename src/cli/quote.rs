use super::ui;
use crate::core::conversion::{Converter, Direction, format_grouped};
use crate::core::currency::display_code;
use anyhow::{Context, Result};

/// A one-off conversion between two currencies.
#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub amount: String,
    pub pay: String,
    pub receive: String,
    /// Treat `amount` as the receive amount and solve for the pay amount.
    pub reverse: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub pay_amount: String,
    pub pay_currency: String,
    pub receive_amount: String,
    pub receive_currency: String,
}

pub fn calculate(request: &QuoteRequest, converter: &Converter) -> Result<Quote> {
    let direction = if request.reverse {
        Direction::ReceiveToPay
    } else {
        Direction::PayToReceive
    };
    let converted = converter
        .apply(&request.amount, &request.pay, &request.receive, direction)
        .with_context(|| {
            format!(
                "Cannot convert {} between {} and {}",
                request.amount, request.pay, request.receive
            )
        })?;

    let (pay_amount, receive_amount) = if request.reverse {
        (converted, request.amount.clone())
    } else {
        (request.amount.clone(), converted)
    };

    Ok(Quote {
        pay_amount,
        pay_currency: request.pay.to_lowercase(),
        receive_amount,
        receive_currency: request.receive.to_lowercase(),
    })
}

pub fn render(quote: &Quote) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(""),
        ui::header_cell("Amount"),
        ui::header_cell("Currency"),
    ]);
    table.add_row(vec![
        comfy_table::Cell::new("You pay"),
        ui::amount_cell(&format_grouped(&quote.pay_amount)),
        comfy_table::Cell::new(display_code(&quote.pay_currency)),
    ]);
    table.add_row(vec![
        comfy_table::Cell::new("You receive"),
        ui::highlight_cell(&format_grouped(&quote.receive_amount)),
        comfy_table::Cell::new(display_code(&quote.receive_currency)),
    ]);
    table.to_string()
}

pub fn run(request: &QuoteRequest, converter: &Converter) -> Result<()> {
    let quote = calculate(request, converter)?;
    println!("{}", render(&quote));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conversion::InvalidAmountPolicy;
    use crate::core::rates::RateTable;

    fn request(amount: &str, pay: &str, receive: &str, reverse: bool) -> QuoteRequest {
        QuoteRequest {
            amount: amount.to_string(),
            pay: pay.to_string(),
            receive: receive.to_string(),
            reverse,
        }
    }

    #[test]
    fn test_forward_and_reverse_quotes() {
        let table = RateTable::builtin().with_reciprocals();
        let converter = Converter::new(&table, InvalidAmountPolicy::Zero);

        let quote = calculate(&request("1.00", "ETH", "NGN", false), &converter).unwrap();
        assert_eq!(quote.receive_amount, "2500000.00");
        assert_eq!(quote.pay_currency, "eth");

        let quote = calculate(&request("50.00", "usdt", "usd", true), &converter).unwrap();
        assert_eq!(quote.pay_amount, "50.00");
        assert_eq!(quote.receive_amount, "50.00");

        let rendered = render(&calculate(&request("1", "eth", "ngn", false), &converter).unwrap());
        assert!(rendered.contains("2,500,000.00"));
        assert!(rendered.contains("You receive"));
    }

    #[test]
    fn test_policy_decides_failure() {
        let table = RateTable::builtin().with_reciprocals();

        let zero = Converter::new(&table, InvalidAmountPolicy::Zero);
        let quote = calculate(&request("abc", "eth", "ngn", false), &zero).unwrap();
        assert_eq!(quote.receive_amount, "0.00");

        let reject = Converter::new(&table, InvalidAmountPolicy::Reject);
        let err = calculate(&request("5", "ngn", "usd", false), &reject).unwrap_err();
        assert!(err.to_string().contains("Cannot convert 5 between ngn and usd"));
    }
}
