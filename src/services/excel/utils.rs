use super::types::Cell;

/// Tokens that stand for "no value" in published statistics tables.
pub const MISSING_PLACEHOLDERS: [&str; 2] = ["-", "\u{2013}"];

/// True when the whole trimmed text of the cell is a dash placeholder.
pub fn is_missing_placeholder(cell: &Cell) -> bool {
    match cell {
        Cell::Text(s) => MISSING_PLACEHOLDERS.contains(&s.trim()),
        _ => false,
    }
}

/// Parses a finite number out of text, ignoring surrounding whitespace.
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_match_is_exact_after_trim() {
        assert!(is_missing_placeholder(&Cell::Text("-".into())));
        assert!(is_missing_placeholder(&Cell::Text("  -  ".into())));
        assert!(is_missing_placeholder(&Cell::Text("\u{2013}".into())));

        assert!(!is_missing_placeholder(&Cell::Text("-5".into())));
        assert!(!is_missing_placeholder(&Cell::Text("n-a".into())));
        assert!(!is_missing_placeholder(&Cell::Text("--".into())));
        assert!(!is_missing_placeholder(&Cell::Number(0.0)));
        assert!(!is_missing_placeholder(&Cell::Empty));
    }

    #[test]
    fn parse_number_accepts_finite_values_only() {
        assert_eq!(parse_number(" 12.5 "), Some(12.5));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("1,234"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number(""), None);
    }
}
