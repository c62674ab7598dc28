//! Supported currencies and the option lists offered by the forms.

/// A selectable value with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub label: &'static str,
    pub value: &'static str,
}

const fn option(label: &'static str, value: &'static str) -> SelectOption {
    SelectOption { label, value }
}

pub const CRYPTO_CURRENCIES: &[SelectOption] = &[
    option("ETH", "eth"),
    option("USDT", "usdt"),
    option("USDC", "usdc"),
    option("BNB", "bnb"),
];

pub const FIAT_CURRENCIES: &[SelectOption] = &[
    option("NGN", "ngn"),
    option("USD", "usd"),
    option("EUR", "eur"),
    option("GBP", "gbp"),
];

pub const WALLETS: &[SelectOption] = &[
    option("MetaMask", "metamask"),
    option("Rainbow", "rainbow"),
    option("Wallet Connect", "walletconnect"),
    option(
        "Other Crypto Wallets (Binance, Coinbase, Bybit etc)",
        "other",
    ),
];

pub const PAYOUT_METHODS: &[SelectOption] = &[
    option("Direct Transfer", "direct_transfer"),
    option("Cash Pickup", "cash_pickup"),
    option("Bank Transfer", "bank_transfer"),
    option("Mobile Money", "mobile_money"),
];

pub const BANKS: &[SelectOption] = &[
    option("Access Bank", "access_bank"),
    option("Zenith Bank", "zenith_bank"),
    option("GTBank", "gtbank"),
    option("UBA", "uba"),
];

/// Dialling codes offered next to the phone number field. The value is the
/// code itself, the label the country name.
pub const COUNTRY_CODES: &[SelectOption] = &[
    option("Nigeria", "+234"),
    option("United States", "+1"),
    option("United Kingdom", "+44"),
    option("France", "+33"),
    option("Germany", "+49"),
    option("India", "+91"),
    option("China", "+86"),
    option("Japan", "+81"),
];

pub const DEFAULT_COUNTRY_CODE: &str = "+234";

/// Looks up an option by value, ignoring ASCII case.
pub fn find<'a>(options: &'a [SelectOption], value: &str) -> Option<&'a SelectOption> {
    options
        .iter()
        .find(|item| item.value.eq_ignore_ascii_case(value.trim()))
}

/// Returns the label for `value`, or the value itself when it is not listed.
pub fn label_for<'a>(options: &'a [SelectOption], value: &'a str) -> &'a str {
    find(options, value).map_or(value, |item| item.label)
}

/// Ticker style rendering of a currency code (`eth` becomes `ETH`).
pub fn display_code(code: &str) -> String {
    code.trim().to_uppercase()
}
