//! Locations understood by the application.

use std::fmt;

pub const PAY_TAB_PARAM: &str = "tab";

/// The `tab` query value of `/pay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayTab {
    BankInfo,
    ContactInfo,
    SenderDetails,
}

impl PayTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayTab::BankInfo => "bank-info",
            PayTab::ContactInfo => "contact-info",
            PayTab::SenderDetails => "sender-details",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "bank-info" => Some(PayTab::BankInfo),
            "contact-info" => Some(PayTab::ContactInfo),
            "sender-details" => Some(PayTab::SenderDetails),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`, the landing tabs.
    Index,
    /// `/pay?tab=...`; a missing tab means bank info.
    Pay(PayTab),
    /// `/pay/success`
    Success,
    /// Anything else, keeping the requested location.
    NotFound(String),
}

impl Route {
    /// Parses a path with optional query string and fragment.
    ///
    /// Trailing slashes are ignored and an empty path is the root. An unknown
    /// `tab` value on `/pay` is treated as not found.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        let without_fragment = location.split('#').next().unwrap_or_default();
        let (path, query) = match without_fragment.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (without_fragment, None),
        };

        let normalized = path.trim_end_matches('/');
        match normalized {
            "" => Route::Index,
            "/pay" => {
                let tab = query.and_then(|q| query_param(q, PAY_TAB_PARAM));
                match tab {
                    None | Some("") => Route::Pay(PayTab::BankInfo),
                    Some(value) => PayTab::parse(value)
                        .map_or_else(|| Route::NotFound(location.to_string()), Route::Pay),
                }
            }
            "/pay/success" => Route::Success,
            _ => Route::NotFound(location.to_string()),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Index => write!(f, "/"),
            Route::Pay(tab) => write!(f, "/pay?{PAY_TAB_PARAM}={}", tab.as_str()),
            Route::Success => write!(f, "/pay/success"),
            Route::NotFound(location) => write!(f, "{location}"),
        }
    }
}

/// First value of `name` in a `k=v&k=v` query string.
fn query_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| match pair.split_once('=') {
            Some((key, value)) => Some((key, value)),
            None if !pair.is_empty() => Some((pair, "")),
            None => None,
        })
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_routes() {
        assert_eq!(Route::parse("/"), Route::Index);
        assert_eq!(Route::parse(""), Route::Index);
        assert_eq!(Route::parse("/pay"), Route::Pay(PayTab::BankInfo));
        assert_eq!(Route::parse("/pay/"), Route::Pay(PayTab::BankInfo));
        assert_eq!(
            Route::parse("/pay?tab=contact-info"),
            Route::Pay(PayTab::ContactInfo)
        );
        assert_eq!(
            Route::parse("/pay?ref=x&tab=sender-details#top"),
            Route::Pay(PayTab::SenderDetails)
        );
        assert_eq!(Route::parse("/pay/success"), Route::Success);
    }

    #[test]
    fn test_parse_unknown_routes() {
        assert_eq!(
            Route::parse("/checkout"),
            Route::NotFound("/checkout".to_string())
        );
        assert_eq!(
            Route::parse("/pay?tab=review"),
            Route::NotFound("/pay?tab=review".to_string())
        );
    }

    #[test]
    fn test_display_round_trips() {
        for route in [
            Route::Index,
            Route::Pay(PayTab::BankInfo),
            Route::Pay(PayTab::ContactInfo),
            Route::Pay(PayTab::SenderDetails),
            Route::Success,
        ] {
            assert_eq!(Route::parse(&route.to_string()), route);
        }
    }
}
