//! Conversions between ordinary integers and superscript / subscript digit runs.

use std::fmt;

const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
const SUBSCRIPT_DIGITS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

/// Decodes a run of superscript digits into an unsigned integer. Returns [`None`] if the run
/// contains a superscript sign or any other character.
pub(crate) fn superscript_to_u32(s: &str) -> Option<u32> {
    let mut value: u32 = 0;
    let mut any = false;
    for c in s.chars() {
        let digit = SUPERSCRIPT_DIGITS.iter().position(|&d| d == c)?;
        value = value.checked_mul(10)?.checked_add(digit as u32)?;
        any = true;
    }
    if any { Some(value) } else { None }
}

/// Decodes a run of superscript digits, optionally led by a superscript sign, into a signed
/// integer.
pub(crate) fn superscript_to_i32(s: &str) -> Option<i32> {
    let (negative, digits) = match s.strip_prefix('⁻') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('⁺').unwrap_or(s)),
    };
    let value = superscript_to_u32(digits)?;
    let value = i32::try_from(value).ok()?;
    Some(if negative { -value } else { value })
}

/// Decodes a run of subscript digits into an unsigned integer.
pub(crate) fn subscript_to_u32(s: &str) -> Option<u32> {
    let mut value: u32 = 0;
    let mut any = false;
    for c in s.chars() {
        let digit = SUBSCRIPT_DIGITS.iter().position(|&d| d == c)?;
        value = value.checked_mul(10)?.checked_add(digit as u32)?;
        any = true;
    }
    if any { Some(value) } else { None }
}

/// Writes the given integer as a run of superscript digits, with a leading superscript sign if
/// negative.
pub(crate) fn write_superscript(f: &mut fmt::Formatter<'_>, value: i64) -> fmt::Result {
    if value < 0 {
        write!(f, "⁻")?;
    }
    for c in value.unsigned_abs().to_string().chars() {
        let digit = c.to_digit(10).unwrap() as usize;
        write!(f, "{}", SUPERSCRIPT_DIGITS[digit])?;
    }
    Ok(())
}

/// Writes the given integer as a run of subscript digits.
pub(crate) fn write_subscript(f: &mut fmt::Formatter<'_>, value: u32) -> fmt::Result {
    for c in value.to_string().chars() {
        let digit = c.to_digit(10).unwrap() as usize;
        write!(f, "{}", SUBSCRIPT_DIGITS[digit])?;
    }
    Ok(())
}

/// Returns true if the character is a superscript digit.
pub(crate) fn is_superscript_digit(c: char) -> bool {
    SUPERSCRIPT_DIGITS.contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_superscript() {
        assert_eq!(superscript_to_u32("²"), Some(2));
        assert_eq!(superscript_to_u32("¹⁰"), Some(10));
        assert_eq!(superscript_to_u32("⁻²"), None);
        assert_eq!(superscript_to_u32(""), None);
    }

    #[test]
    fn decode_signed_superscript() {
        assert_eq!(superscript_to_i32("⁻⁴"), Some(-4));
        assert_eq!(superscript_to_i32("⁺⁴"), Some(4));
        assert_eq!(superscript_to_i32("⁴"), Some(4));
    }

    #[test]
    fn decode_subscript() {
        assert_eq!(subscript_to_u32("₃"), Some(3));
        assert_eq!(subscript_to_u32("₁₂"), Some(12));
        assert_eq!(subscript_to_u32("x"), None);
    }
}
