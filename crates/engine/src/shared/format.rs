/// Форматирует число с разделителями тысяч (точками)
///
/// # Примеры
/// ```
/// use engine::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1.234.567");
/// assert_eq!(format_number(42), "42");
/// assert_eq!(format_number(0), "0");
/// ```
pub fn format_number(n: u64) -> String {
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

/// Денежная сумма без копеек, с разделителями триад (стиль VND)
pub fn format_money(v: f64) -> String {
    let negative = v < 0.0;
    let rounded = v.abs().round() as u64;
    let formatted = format_number(rounded);
    if negative {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

/// Сумма в миллионах с одним знаком, для осей графиков
pub fn format_millions(v: f64) -> String {
    format!("{:.1}", v / 1e6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.000");
        assert_eq!(format_number(1234), "1.234");
        assert_eq!(format_number(1234567), "1.234.567");
        assert_eq!(format_number(1234567890), "1.234.567.890");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "0");
        assert_eq!(format_money(1234567.4), "1.234.567");
        assert_eq!(format_money(-2500.6), "-2.501");
    }

    #[test]
    fn test_format_millions() {
        assert_eq!(format_millions(2_500_000.0), "2.5");
        assert_eq!(format_millions(0.0), "0.0");
    }
}
