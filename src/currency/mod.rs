//! Locale-aware currency and amount formatting for the presentation layer.

/// Digit separators for a supported display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LocaleSpec {
    decimal: char,
    grouping: char,
    symbol_first: bool,
}

fn locale_for(language: &str) -> LocaleSpec {
    match language {
        "en" => LocaleSpec {
            decimal: '.',
            grouping: ',',
            symbol_first: true,
        },
        _ => LocaleSpec {
            decimal: ',',
            grouping: ' ',
            symbol_first: false,
        },
    }
}

/// Display symbol for the ISO codes the application ships with; anything
/// unknown falls back to the code itself.
pub fn symbol_for(currency: &str) -> &str {
    match currency {
        "AUD" | "USD" | "CAD" | "NZD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "CHF" => "CHF",
        other => other,
    }
}

/// Formats a bare amount with two decimals, grouped thousands, and the
/// language's separators.
pub fn format_amount(amount: f64, language: &str) -> String {
    let spec = locale_for(language);
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(spec.grouping);
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    out.push(spec.decimal);
    out.push_str(&format!("{fraction:02}"));
    out
}

/// Formats an amount in the configured currency, matching the calendar's
/// display conventions: `AUD` always renders as a `$ `-prefixed amount,
/// other currencies are symbol-first in English and amount-first in French.
pub fn format_currency(amount: f64, currency: &str, language: &str) -> String {
    let number = format_amount(amount, language);
    if currency == "AUD" {
        return format!("$ {number}");
    }
    let symbol = symbol_for(currency);
    if locale_for(language).symbol_first {
        format!("{symbol}{number}")
    } else {
        format!("{number} {symbol}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn french_grouping_and_decimal_comma() {
        assert_eq!(format_amount(1234.5, "fr"), "1 234,50");
        assert_eq!(format_amount(-1234567.89, "fr"), "-1 234 567,89");
        assert_eq!(format_amount(0.0, "fr"), "0,00");
    }

    #[test]
    fn english_grouping_and_decimal_point() {
        assert_eq!(format_amount(1234.5, "en"), "1,234.50");
        assert_eq!(format_amount(-0.4, "en"), "-0.40");
    }

    #[test]
    fn aud_keeps_the_dollar_space_prefix_in_both_languages() {
        assert_eq!(format_currency(1234.5, "AUD", "fr"), "$ 1 234,50");
        assert_eq!(format_currency(1234.5, "AUD", "en"), "$ 1,234.50");
    }

    #[test]
    fn other_currencies_follow_the_locale() {
        assert_eq!(format_currency(9.99, "EUR", "en"), "€9.99");
        assert_eq!(format_currency(9.99, "EUR", "fr"), "9,99 €");
        assert_eq!(format_currency(5.0, "XXX", "en"), "XXX5.00");
    }
}
