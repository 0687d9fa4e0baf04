//! Validation rules for each client field.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::{ClientField, ClientFields, Sexo};

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const PATTERN_MESSAGE: &str = "Invalid format";
pub const TELEFONO_LENGTH_MESSAGE: &str = "must be exactly 9 digits";

/// Letters of any script with combining marks, plus spaces, apostrophes and
/// hyphens. At least one letter is required.
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\p{M} '\-]*\p{L}[\p{L}\p{M} '\-]*$").expect("name pattern compiles")
});

static DIRECCION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\p{M}0-9 .,#\-ºª'/]+$").expect("direccion pattern compiles")
});

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Empty after trimming.
    Required,
    /// Present but not in the accepted shape.
    Pattern,
}

/// A failed rule, with the message shown next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    pub kind: ErrorKind,
    pub message: &'static str,
}

impl FieldError {
    const fn required() -> Self {
        Self { kind: ErrorKind::Required, message: REQUIRED_MESSAGE }
    }

    const fn pattern(message: &'static str) -> Self {
        Self { kind: ErrorKind::Pattern, message }
    }
}

pub type Verdict = Result<(), FieldError>;

fn required(value: &str) -> Verdict {
    if value.trim().is_empty() {
        Err(FieldError::required())
    } else {
        Ok(())
    }
}

/// `nombre`, `apellido1` and `apellido2`.
pub fn validate_name(value: &str) -> Verdict {
    required(value)?;
    if NAME_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(FieldError::pattern(PATTERN_MESSAGE))
    }
}

pub fn validate_direccion(value: &str) -> Verdict {
    required(value)?;
    if DIRECCION_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(FieldError::pattern(PATTERN_MESSAGE))
    }
}

/// Exactly nine ASCII digits.
///
/// An all-digit value of the wrong length gets the dedicated length message;
/// anything carrying other characters gets the generic one.
pub fn validate_telefono(value: &str) -> Verdict {
    required(value)?;
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::pattern(PATTERN_MESSAGE));
    }
    if value.len() != 9 {
        return Err(FieldError::pattern(TELEFONO_LENGTH_MESSAGE));
    }
    Ok(())
}

pub fn validate_sexo(value: &str) -> Verdict {
    required(value)?;
    value
        .parse::<Sexo>()
        .map(|_| ())
        .map_err(|_| FieldError::pattern(PATTERN_MESSAGE))
}

/// Validate one field's raw value.
pub fn validate(field: ClientField, value: &str) -> Verdict {
    match field {
        ClientField::Nombre | ClientField::Apellido1 | ClientField::Apellido2 => {
            validate_name(value)
        }
        ClientField::Direccion => validate_direccion(value),
        ClientField::Telefono => validate_telefono(value),
        ClientField::Sexo => validate_sexo(value),
    }
}

/// Every failing field of a complete record.
pub fn validate_fields(fields: &ClientFields) -> Vec<(ClientField, FieldError)> {
    ClientField::ALL
        .into_iter()
        .filter_map(|field| validate(field, fields.get(field)).err().map(|e| (field, e)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_names_accept_any_script() {
        for name in ["Ana", "María José", "O'Neill", "Pérez-Reverte", "Ørsted", "李", "Ελένη"] {
            assert_eq!(validate_name(name), Ok(()), "{name} should be accepted");
        }
    }

    #[test]
    fn test_names_reject_digits_and_symbols() {
        assert_eq!(validate_name("Ana2").unwrap_err().kind, ErrorKind::Pattern);
        assert_eq!(validate_name("Ana!").unwrap_err().kind, ErrorKind::Pattern);
    }

    #[test]
    fn test_names_need_a_letter() {
        for value in ["-", "'", "' -", "--'"] {
            assert_eq!(validate_name(value).unwrap_err().kind, ErrorKind::Pattern, "{value:?}");
        }
        assert_eq!(validate_name("-Ana-"), Ok(()));
    }

    #[test]
    fn test_blank_is_required_not_pattern() {
        for field in ClientField::ALL {
            assert_eq!(validate(field, "").unwrap_err().kind, ErrorKind::Required);
            assert_eq!(validate(field, "   ").unwrap_err().kind, ErrorKind::Required);
        }
    }

    #[test]
    fn test_direccion_punctuation() {
        assert_eq!(validate_direccion("Calle 1"), Ok(()));
        assert_eq!(validate_direccion("Av. de la Constitución, 12 - 3º B"), Ok(()));
        assert_eq!(validate_direccion("C/ Mayor #4, 2ª"), Ok(()));
        assert_eq!(validate_direccion("Calle 1; DROP").unwrap_err().kind, ErrorKind::Pattern);
    }

    #[test]
    fn test_telefono_cases() {
        assert_eq!(validate_telefono("612345678"), Ok(()));

        let short = validate_telefono("61234567").unwrap_err();
        assert_eq!(short.kind, ErrorKind::Pattern);
        assert_eq!(short.message, TELEFONO_LENGTH_MESSAGE);

        let long = validate_telefono("6123456789").unwrap_err();
        assert_eq!(long.message, TELEFONO_LENGTH_MESSAGE);

        let letters = validate_telefono("61234567a").unwrap_err();
        assert_eq!(letters.kind, ErrorKind::Pattern);
        assert_eq!(letters.message, PATTERN_MESSAGE);

        // Full-width digits are not ASCII.
        assert!(validate_telefono("６１２３４５６７８").is_err());
    }

    #[test]
    fn test_sexo_literals_only() {
        assert_eq!(validate_sexo("hombre"), Ok(()));
        assert_eq!(validate_sexo("mujer"), Ok(()));
        assert_eq!(validate_sexo("Mujer").unwrap_err().kind, ErrorKind::Pattern);
        assert_eq!(validate_sexo("").unwrap_err().kind, ErrorKind::Required);
    }

    #[test]
    fn test_validate_fields_reports_each_failure() {
        let fields = ClientFields {
            nombre: "Ana".into(),
            apellido1: "R2".into(),
            apellido2: "Gil".into(),
            direccion: "".into(),
            telefono: "123".into(),
            sexo: Sexo::Mujer,
        };
        let failing: Vec<_> = validate_fields(&fields).into_iter().map(|(f, _)| f).collect();
        assert_eq!(
            failing,
            vec![ClientField::Apellido1, ClientField::Direccion, ClientField::Telefono]
        );
    }

    proptest! {
        #[test]
        fn name_with_digit_is_rejected(prefix in "[a-zA-Z ]{0,8}", digit in "[0-9]", suffix in "[a-zA-Z]{0,8}") {
            let value = format!("{prefix}{digit}{suffix}");
            prop_assert!(validate_name(&value).is_err());
        }

        #[test]
        fn digit_free_name_is_accepted(head in "\\p{L}", tail in "[\\p{L} '\\-]{0,20}") {
            let value = format!("{head}{tail}");
            prop_assert_eq!(validate_name(&value), Ok(()));
        }

        #[test]
        fn telefono_accepts_only_nine_digits(value in "[0-9a-z]{0,12}") {
            let expected = value.len() == 9 && value.bytes().all(|b| b.is_ascii_digit());
            prop_assert_eq!(validate_telefono(&value).is_ok(), expected);
        }
    }
}
