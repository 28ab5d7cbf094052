//! Grouped-number and currency rendering.
//!
//! Digits are peeled least-significant first into a reversed buffer -
//! requested decimal places, then the localized decimal separator, then whole
//! digits in groups of three with the thousands separator - and emitted in
//! reverse. Magnitudes are widened to unsigned before peeling so the signed
//! minimum cannot overflow on negation.

use crate::locale::{Affix, LocaleConfig};

/// Append `value` with the requested decimal places, optionally grouping
/// whole digits in threes.
pub(crate) fn append_number(
    out: &mut String,
    value: i64,
    decimals: u32,
    grouped: bool,
    cfg: &LocaleConfig,
) {
    let negative = value < 0;
    let mut magnitude = value.unsigned_abs();

    let mut reversed: Vec<char> = Vec::with_capacity(28);
    for _ in 0..decimals {
        reversed.push(char::from(b'0' + (magnitude % 10) as u8));
        magnitude /= 10;
    }
    if decimals > 0 {
        reversed.extend(cfg.decimal_separator.chars().rev());
    }

    let mut group = 0;
    loop {
        reversed.push(char::from(b'0' + (magnitude % 10) as u8));
        magnitude /= 10;
        group += 1;
        if magnitude == 0 {
            break;
        }
        if grouped && group == 3 {
            reversed.extend(cfg.group_separator.chars().rev());
            group = 0;
        }
    }

    if negative {
        reversed.push('-');
    }
    out.extend(reversed.into_iter().rev());
}

/// Append a currency amount.
///
/// The raw amount is scaled by the descriptor's fixed-point rate. With
/// `minor_units` unset the value rounds up away from zero to whole major
/// units; with it set, currencies whose rate is at least 100 drop minor
/// units from display entirely.
pub(crate) fn append_currency(out: &mut String, value: i64, minor_units: bool, cfg: &LocaleConfig) {
    let descriptor = &cfg.currency;
    let mut scaled = value.saturating_mul(descriptor.rate as i64);

    // Sign precedes the symbol.
    if scaled < 0 {
        out.push('-');
        scaled = scaled.saturating_neg();
    }

    let (symbol, affix) = if cfg.unicode_capable {
        (descriptor.symbol, descriptor.affix)
    } else {
        (descriptor.ascii_symbol, descriptor.ascii_affix)
    };

    if affix == Affix::Prefix {
        out.push_str(symbol);
    }

    if !minor_units {
        append_number(out, scaled.saturating_add(99) / 100, 0, true, cfg);
    } else if descriptor.rate >= 100 {
        append_number(out, scaled / 100, 0, true, cfg);
    } else {
        append_number(out, scaled, 2, true, cfg);
    }

    if affix == Affix::Suffix {
        out.push_str(symbol);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::CurrencyDescriptor;
    use pretty_assertions::assert_eq;

    fn render_number(value: i64, decimals: u32, grouped: bool, cfg: &LocaleConfig) -> String {
        let mut out = String::new();
        append_number(&mut out, value, decimals, grouped, cfg);
        out
    }

    fn render_currency(value: i64, minor_units: bool, cfg: &LocaleConfig) -> String {
        let mut out = String::new();
        append_currency(&mut out, value, minor_units, cfg);
        out
    }

    #[test]
    fn groups_in_threes() {
        let cfg = LocaleConfig::default();
        assert_eq!(render_number(1_234_567, 0, true, &cfg), "1,234,567");
        assert_eq!(render_number(1_234_567, 0, false, &cfg), "1234567");
        assert_eq!(render_number(0, 0, true, &cfg), "0");
        assert_eq!(render_number(-1_000, 0, true, &cfg), "-1,000");
        assert_eq!(render_number(999, 0, true, &cfg), "999");
        assert_eq!(render_number(1_000, 0, true, &cfg), "1,000");
    }

    #[test]
    fn localized_separators() {
        let cfg = LocaleConfig {
            group_separator: ".".to_string(),
            decimal_separator: ",".to_string(),
            ..LocaleConfig::default()
        };
        assert_eq!(render_number(1_234_567, 0, true, &cfg), "1.234.567");
        assert_eq!(render_number(12_345, 1, true, &cfg), "1.234,5");
    }

    #[test]
    fn decimal_places_are_zero_padded() {
        let cfg = LocaleConfig::default();
        assert_eq!(render_number(5, 2, true, &cfg), "0.05");
        assert_eq!(render_number(150, 2, true, &cfg), "1.50");
        assert_eq!(render_number(65, 1, true, &cfg), "6.5");
        assert_eq!(render_number(-5, 2, true, &cfg), "-0.05");
    }

    #[test]
    fn signed_minimum_does_not_overflow() {
        let cfg = LocaleConfig::default();
        assert_eq!(
            render_number(i64::MIN, 0, false, &cfg),
            "-9223372036854775808"
        );
    }

    #[test]
    fn currency_rounds_minor_units_up() {
        let cfg = LocaleConfig {
            currency: CurrencyDescriptor {
                rate: 1,
                ..CurrencyDescriptor::DOLLARS
            },
            ..LocaleConfig::default()
        };
        assert_eq!(render_currency(150, true, &cfg), "$1.50");
        assert_eq!(render_currency(150, false, &cfg), "$2");
        assert_eq!(render_currency(100, false, &cfg), "$1");
        assert_eq!(render_currency(101, false, &cfg), "$2");
        assert_eq!(render_currency(-150, true, &cfg), "-$1.50");
    }

    #[test]
    fn large_rate_drops_minor_units() {
        let cfg = LocaleConfig {
            currency: CurrencyDescriptor::YEN,
            ..LocaleConfig::default()
        };
        // 15 * 1000 = 15000, rate >= 100 so minor units never display.
        assert_eq!(render_currency(15, true, &cfg), "\u{a5}150");
        assert_eq!(render_currency(15, false, &cfg), "\u{a5}150");
    }

    #[test]
    fn ascii_fallback_symbol() {
        let cfg = LocaleConfig {
            unicode_capable: false,
            ..LocaleConfig::default()
        };
        // Pounds at rate 10: 150 scales to 1500 minor units.
        assert_eq!(render_currency(150, true, &cfg), "15.00GBP");
    }
}
