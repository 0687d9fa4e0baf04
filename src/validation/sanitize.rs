//! Input clean-up applied to row edits before the value is stored.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::ClientField;

/// Decimal digits of any script. Fractions, superscripts and roman
/// numerals are not digits.
static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{Nd}").expect("digit pattern compiles"));

/// Remove every digit. Applied to name-like fields.
pub fn strip_digits(raw: &str) -> String {
    DIGIT.replace_all(raw, "").into_owned()
}

/// Keep ASCII digits only. Applied to `telefono`.
pub fn keep_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Clean `raw` the way the given field expects.
///
/// `direccion` and `sexo` are stored as typed; validation decides whether
/// they are acceptable.
pub fn sanitize(field: ClientField, raw: &str) -> String {
    match field {
        ClientField::Telefono => keep_digits(raw),
        f if f.is_name_like() => strip_digits(raw),
        _ => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_telefono_keeps_digits() {
        assert_eq!(sanitize(ClientField::Telefono, "60-11 22a33"), "60112233");
        assert_eq!(sanitize(ClientField::Telefono, "+34 600 112 233"), "34600112233");
    }

    #[test]
    fn test_names_lose_digits() {
        assert_eq!(sanitize(ClientField::Nombre, "An4a"), "Ana");
        assert_eq!(sanitize(ClientField::Apellido2, "Gil 3"), "Gil ");
        assert_eq!(strip_digits("Ana٣"), "Ana");
    }

    #[test]
    fn test_non_digit_numerals_survive() {
        assert_eq!(strip_digits("Luis½ Ⅻ²"), "Luis½ Ⅻ²");
    }

    #[test]
    fn test_direccion_untouched() {
        assert_eq!(sanitize(ClientField::Direccion, "Calle 1, 2º"), "Calle 1, 2º");
    }

    proptest! {
        #[test]
        fn strip_digits_is_idempotent(raw in any::<String>()) {
            let once = strip_digits(&raw);
            prop_assert_eq!(strip_digits(&once), once.clone());
            prop_assert!(!once.chars().any(|c| c.is_ascii_digit()));
        }

        #[test]
        fn keep_digits_is_idempotent(raw in any::<String>()) {
            let once = keep_digits(&raw);
            prop_assert_eq!(keep_digits(&once), once.clone());
            prop_assert!(once.bytes().all(|b| b.is_ascii_digit()));
        }
    }
}
