//! Amounts are plain `f64` currency units. Rendering follows the Indian
//! numbering system: the last three integer digits form one group, and the
//! remaining digits are grouped in pairs (`12,34,567`).

/// Formats an amount with Indian digit grouping and at most two fraction
/// digits.
///
/// Trailing zero fraction digits are dropped, so `1200.0` renders as
/// `1,200` and `99.5` as `99.5`.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }

    let rendered = format!("{:.2}", amount.abs());
    let (integer, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut out = String::with_capacity(rendered.len() + integer.len() / 2 + 1);
    if amount < 0.0 && rendered.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    out.push_str(&group_indian(integer));
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Formats an amount prefixed with a currency symbol.
#[must_use]
pub fn format_with_symbol(symbol: &str, amount: f64) -> String {
    format!("{symbol}{}", format_amount(amount))
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        groups.push(right);
        rest = left;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();

    let mut out = groups.join(",");
    out.push(',');
    out.push_str(tail);
    out
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(0.0, "0")]
    #[test_case(400.0, "400")]
    #[test_case(1200.0, "1,200")]
    #[test_case(10400.0, "10,400")]
    #[test_case(123_456.0, "1,23,456")]
    #[test_case(1_234_567.0, "12,34,567")]
    #[test_case(99.5, "99.5")]
    #[test_case(1234.567, "1,234.57")]
    #[test_case(-2500.0, "-2,500")]
    fn formats_with_indian_grouping(amount: f64, expected: &str) {
        assert_eq!(format_amount(amount), expected);
    }

    #[test]
    fn tiny_negative_amounts_do_not_render_minus_zero() {
        assert_eq!(format_amount(-0.001), "0");
    }

    #[test]
    fn prefixes_symbol() {
        assert_eq!(format_with_symbol("₹", 34000.0), "₹34,000");
    }
}
