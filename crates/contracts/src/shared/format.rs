/// Formats an integer with dot thousands separators.
///
/// ```
/// use contracts::shared::format::group_thousands;
/// assert_eq!(group_thousands(1234567), "1.234.567");
/// assert_eq!(group_thousands(42), "42");
/// ```
pub fn group_thousands(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Formats a value as Brazilian currency: `R$ 1.234,56`.
pub fn format_brl(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let (reais, resto) = (cents / 100, cents % 100);
    let sign = if negative { "-" } else { "" };
    format!("{sign}R$ {},{resto:02}", group_thousands(reais))
}

/// Mirrors a raw credit-amount input into its display form. Anything that
/// does not parse shows as zero, matching an untouched slider.
pub fn format_brl_input(raw: &str) -> String {
    format_brl(raw.trim().replace(',', ".").parse::<f64>().unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1.000");
        assert_eq!(group_thousands(1234567890), "1.234.567.890");
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(1234.5), "R$ 1.234,50");
        assert_eq!(format_brl(150000.0), "R$ 150.000,00");
        assert_eq!(format_brl(-12.3), "-R$ 12,30");
        // Rounds to cents.
        assert_eq!(format_brl(0.005), "R$ 0,01");
    }

    #[test]
    fn test_format_brl_input() {
        assert_eq!(format_brl_input("150000"), "R$ 150.000,00");
        assert_eq!(format_brl_input(" 1234,5 "), "R$ 1.234,50");
        assert_eq!(format_brl_input("abc"), "R$ 0,00");
        assert_eq!(format_brl_input(""), "R$ 0,00");
    }
}
