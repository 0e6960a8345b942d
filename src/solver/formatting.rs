//! Number and formula formatting shared by every worked solution.
//! Results use a fixed number of decimals (2 by default, 4 for amounts in mol) so that
//! the same input always produces the same display strings.

pub const RESULT_DECIMALS: usize = 2;
pub const MOLE_DECIMALS: usize = 4;

pub fn fixed(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Shortest display of a number with at most 4 decimals: 2.0 -> "2", 0.024673 -> "0.0247"
pub fn trimmed(value: f64) -> String {
    let text = format!("{:.4}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

fn subscript_digit(c: char) -> char {
    match c.to_digit(10) {
        Some(d) => char::from_u32('₀' as u32 + d).unwrap_or(c),
        None => c,
    }
}

/// "C3H8" -> "C₃H₈"
pub fn unicode_formula(formula: &str) -> String {
    formula.chars().map(subscript_digit).collect()
}

/// "C3H8" -> "C_3H_8", "C10H22" -> "C_{10}H_{22}"
pub fn latex_formula(formula: &str) -> String {
    let mut out = String::new();
    let mut digits = String::new();
    let flush = |out: &mut String, digits: &mut String| {
        if digits.len() == 1 {
            out.push('_');
            out.push_str(digits);
        } else if !digits.is_empty() {
            out.push_str(&format!("_{{{}}}", digits));
        }
        digits.clear();
    };
    for c in formula.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else {
            flush(&mut out, &mut digits);
            out.push(c);
        }
    }
    flush(&mut out, &mut digits);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers() {
        assert_eq!(fixed(4.0, 2), "4.00");
        assert_eq!(fixed(0.226773, 4), "0.2268");
        assert_eq!(trimmed(2.0), "2");
        assert_eq!(trimmed(1.5), "1.5");
        assert_eq!(trimmed(0.0246730), "0.0247");
        assert_eq!(trimmed(300.15), "300.15");
        assert_eq!(trimmed(-0.00001), "0");
    }

    #[test]
    fn test_formulas() {
        assert_eq!(unicode_formula("C3H8"), "C₃H₈");
        assert_eq!(unicode_formula("CO2"), "CO₂");
        assert_eq!(latex_formula("C3H8"), "C_3H_8");
        assert_eq!(latex_formula("C10H22"), "C_{10}H_{22}");
        assert_eq!(latex_formula("CH4"), "CH_4");
    }
}
