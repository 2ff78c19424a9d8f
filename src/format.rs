use rust_decimal::{Decimal, RoundingStrategy};

/// Format a figure expressed in billions for display, e.g. `$67.921 B`.
///
/// - The value is rounded half away from zero to `decimals` places and always
///   rendered with exactly that many fraction digits.
/// - `grouping` inserts thousands separators into the integer part
///   (`$2,732.2 B`).
/// - A negative sign precedes the currency symbol.
pub fn format_billions(value: f64, decimals: u32, grouping: bool) -> String {
    // Only non-finite input fails the conversion; JSON cannot carry those.
    let value = Decimal::from_f64_retain(value).unwrap_or_default();
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);

    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let mut s = pad_fraction_to_dp(&rounded.abs().normalize().to_string(), decimals);
    if grouping {
        s = group_thousands(&s);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${s} B")
}

fn pad_fraction_to_dp(s: &str, dp: u32) -> String {
    let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
    if dp == 0 {
        return int_part.to_string();
    }

    let mut out = String::with_capacity(int_part.len() + 1 + dp as usize);
    out.push_str(int_part);
    out.push('.');

    let mut written = 0usize;
    for ch in frac_part.chars().take(dp as usize) {
        out.push(ch);
        written += 1;
    }
    while written < dp as usize {
        out.push('0');
        written += 1;
    }

    out
}

/// Inserts a comma before every third integer digit counted from the
/// decimal point. Expects an unsigned plain decimal string.
fn group_thousands(s: &str) -> String {
    let (int_part, frac_part) = match s.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (s, None),
    };

    let mut out = String::with_capacity(s.len() + int_part.len() / 3);
    for (i, ch) in int_part.char_indices() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}
