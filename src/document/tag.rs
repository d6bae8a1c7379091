//! Tag resolution for YAML nodes.
//!
//! Tags are stored in their short form (`!!str`, `!!map`, ...) whenever they
//! belong to the core schema, so predicates can compare them directly.

/// Tag carried by the `<<` merge key.
pub const MERGE: &str = "!!merge";
/// Long form of the merge tag, as written with a verbatim tag.
pub const MERGE_LONG: &str = "tag:yaml.org,2002:merge";

pub const STR: &str = "!!str";
pub const INT: &str = "!!int";
pub const FLOAT: &str = "!!float";
pub const BOOL: &str = "!!bool";
pub const NULL: &str = "!!null";
pub const SEQ: &str = "!!seq";
pub const MAP: &str = "!!map";

const CORE_PREFIX: &str = "tag:yaml.org,2002:";

/// Returns true if `tag` marks a merge key.
pub fn is_merge(tag: &str) -> bool {
    tag == MERGE || tag == MERGE_LONG
}

/// Resolves the implicit tag of an untagged plain scalar.
///
/// # Example
///
/// ```
/// use yit::document::tag::{resolve_plain, BOOL, INT, MERGE, NULL, STR};
///
/// assert_eq!(resolve_plain("42"), INT);
/// assert_eq!(resolve_plain("~"), NULL);
/// assert_eq!(resolve_plain("true"), BOOL);
/// assert_eq!(resolve_plain("<<"), MERGE);
/// assert_eq!(resolve_plain("hello"), STR);
/// ```
pub fn resolve_plain(value: &str) -> &'static str {
    match value {
        "" | "~" | "null" | "Null" | "NULL" => NULL,
        "true" | "True" | "TRUE" | "false" | "False" | "FALSE" => BOOL,
        "<<" => MERGE,
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" | "-.inf" | "-.Inf" | "-.INF"
        | ".nan" | ".NaN" | ".NAN" => FLOAT,
        _ if parse_int(value).is_some() || is_decimal_digits(value) => INT,
        _ if is_float(value) => FLOAT,
        _ => STR,
    }
}

/// Normalizes an explicit tag given as handle and suffix.
///
/// Core schema tags collapse to their `!!` short form.
pub fn normalize(handle: &str, suffix: &str) -> String {
    if handle == "!!" {
        return format!("!!{}", suffix);
    }
    let full = format!("{}{}", handle, suffix);
    match full.strip_prefix(CORE_PREFIX) {
        Some(name) => format!("!!{}", name),
        None => full,
    }
}

/// Parses an `!!int` payload, accepting `0x` and `0o` prefixes.
///
/// The sign may only appear in front of the prefix: `-0x10` is an int, `0x-10` is not.
pub fn parse_int(value: &str) -> Option<i64> {
    let (negative, digits) = match value.as_bytes().first()? {
        b'-' => (true, &value[1..]),
        b'+' => (false, &value[1..]),
        _ => (false, value),
    };

    let (radix, digits) = if let Some(hex) = digits.strip_prefix("0x") {
        (16, hex)
    } else if let Some(oct) = digits.strip_prefix("0o") {
        (8, oct)
    } else {
        (10, digits)
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    // Parsed wide so that i64::MIN keeps its sign without overflowing.
    let magnitude = i128::from_str_radix(digits, radix).ok()?;
    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

/// Parses a `!!float` payload, including the `.inf` and `.nan` spellings.
pub fn parse_float(value: &str) -> Option<f64> {
    match value {
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => Some(f64::INFINITY),
        "-.inf" | "-.Inf" | "-.INF" => Some(f64::NEG_INFINITY),
        ".nan" | ".NaN" | ".NAN" => Some(f64::NAN),
        _ if is_float(value) => value.parse::<f64>().ok(),
        _ => None,
    }
}

// Integers too large for i64 are still ints.
fn is_decimal_digits(value: &str) -> bool {
    let digits = value.strip_prefix(['-', '+']).unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_float(value: &str) -> bool {
    value.bytes().any(|b| b.is_ascii_digit())
        && value
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
        && value.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_numbers() {
        assert_eq!(resolve_plain("-17"), INT);
        assert_eq!(resolve_plain("0x1F"), INT);
        assert_eq!(resolve_plain("99999999999999999999"), INT);
        assert_eq!(resolve_plain("3.25"), FLOAT);
        assert_eq!(resolve_plain("1e10"), FLOAT);
        assert_eq!(resolve_plain("-.inf"), FLOAT);
        assert_eq!(resolve_plain("1.2.3"), STR);
        assert_eq!(resolve_plain("inf"), STR);
        assert_eq!(resolve_plain("NaN"), STR);
    }

    #[test]
    fn test_parse_int_prefixes() {
        assert_eq!(parse_int("0x10"), Some(16));
        assert_eq!(parse_int("0o17"), Some(15));
        assert_eq!(parse_int("-42"), Some(-42));
        assert_eq!(parse_int("+7"), Some(7));
        assert_eq!(parse_int("12a"), None);
        assert_eq!(parse_int(""), None);
    }

    #[test]
    fn test_parse_int_rejects_sign_after_prefix() {
        assert_eq!(parse_int("0x-5"), None);
        assert_eq!(parse_int("0o+7"), None);
        assert_eq!(parse_int("--5"), None);
        assert_eq!(parse_int("-0x-8000000000000000"), None);
        assert_eq!(resolve_plain("0x-5"), STR);
        assert_eq!(resolve_plain("-0x-8000000000000000"), STR);
    }

    #[test]
    fn test_parse_int_bounds() {
        assert_eq!(parse_int("-0x8000000000000000"), Some(i64::MIN));
        assert_eq!(parse_int("-9223372036854775808"), Some(i64::MIN));
        assert_eq!(parse_int("0x7fffffffffffffff"), Some(i64::MAX));
        assert_eq!(parse_int("0x8000000000000000"), None);
    }

    #[test]
    fn test_parse_float_specials() {
        assert_eq!(parse_float(".inf"), Some(f64::INFINITY));
        assert_eq!(parse_float("-.INF"), Some(f64::NEG_INFINITY));
        assert!(parse_float(".nan").unwrap().is_nan());
        assert_eq!(parse_float("2.5"), Some(2.5));
        assert_eq!(parse_float("abc"), None);
    }

    #[test]
    fn test_normalize_core_tags() {
        assert_eq!(normalize("!!", "merge"), MERGE);
        assert_eq!(normalize("tag:yaml.org,2002:", "str"), STR);
        assert_eq!(normalize("!", "custom"), "!custom");
    }

    #[test]
    fn test_is_merge_accepts_both_forms() {
        assert!(is_merge(MERGE));
        assert!(is_merge(MERGE_LONG));
        assert!(!is_merge(STR));
    }
}
