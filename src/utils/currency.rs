/// Formats an amount as euros with two decimals and thousands separators,
/// e.g. `€1,234.50` or `-€3.00`. Display only; amounts are never rounded in
/// calculations.
pub fn format_eur(amount: f64) -> String {
    if !amount.is_finite() {
        return "€0.00".to_string();
    }
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}€{grouped}.{:02}", cents % 100)
}

#[cfg(test)]
mod tests {
    use super::format_eur;

    #[test]
    fn formats_two_decimals_with_grouping() {
        assert_eq!(format_eur(0.0), "€0.00");
        assert_eq!(format_eur(36.0), "€36.00");
        assert_eq!(format_eur(1234.5), "€1,234.50");
        assert_eq!(format_eur(1234567.891), "€1,234,567.89");
        assert_eq!(format_eur(-3.0), "-€3.00");
        assert_eq!(format_eur(-0.001), "€0.00");
        assert_eq!(format_eur(f64::NAN), "€0.00");
    }
}
