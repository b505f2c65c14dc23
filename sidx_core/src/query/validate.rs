//! Rules every index query has to satisfy before it can be built.
//!
//! Each rule is a pure function over the collected options and the
//! [`IndexKind`] tag. `build()` runs them in a fixed order and stops at the
//! first failure.

use crate::error::{Error, Result};
use crate::index::{IndexKeyValue, IndexKind};
use crate::location::Location;

use super::builder::{KeyCriteria, KeyShape};

/// Location and index name must be present.
pub(crate) fn check_required(location: &Location, index_name: &str) -> Result<()> {
    if !location.is_present() {
        return Err(Error::missing("location"));
    }
    if index_name.is_empty() {
        return Err(Error::missing("index name"));
    }
    Ok(())
}

/// Exactly one of match value and range may be set, and a range needs both
/// bounds.
pub(crate) fn check_criteria(
    match_value: Option<IndexKeyValue>,
    range_start: Option<IndexKeyValue>,
    range_end: Option<IndexKeyValue>,
) -> Result<KeyCriteria> {
    match (match_value, range_start, range_end) {
        (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(Error::illegal(
            "match value and range are mutually exclusive",
        )),
        (Some(key), None, None) => Ok(KeyCriteria::Match(key)),
        (None, Some(start), Some(end)) => Ok(KeyCriteria::Range { start, end }),
        (None, Some(_), None) => Err(Error::missing("range end")),
        (None, None, Some(_)) => Err(Error::missing("range start")),
        (None, None, None) => Err(Error::missing("match value or range")),
    }
}

/// A key given to a kind-specific constructor must be of that kind.
pub(crate) fn check_key_kind(expected: IndexKind, key: &IndexKeyValue) -> Result<()> {
    let actual = key.kind();
    if actual != expected {
        return Err(Error::TypeMismatch { expected, actual });
    }
    Ok(())
}

/// Keys must agree with the index kind.
///
/// Raw keys are byte strings whatever the kind, so the check only looks at
/// their shape, and only when strict integer keys were asked for.
pub(crate) fn check_key_kinds(
    kind: IndexKind,
    criteria: &KeyCriteria,
    shape: KeyShape,
) -> Result<()> {
    let keys: [Option<&IndexKeyValue>; 2] = match criteria {
        KeyCriteria::Match(key) => [Some(key), None],
        KeyCriteria::Range { start, end } => [Some(start), Some(end)],
    };
    for key in keys.into_iter().flatten() {
        match shape {
            KeyShape::Typed => check_key_kind(kind, key)?,
            KeyShape::Raw { strict } => {
                if strict && kind == IndexKind::Integer {
                    check_integer_shape(key)?;
                }
            }
        }
    }
    Ok(())
}

/// Integer keys travel as `-?[0-9]+`. `str::parse` also takes a leading `+`,
/// which the server does not.
fn check_integer_shape(key: &IndexKeyValue) -> Result<()> {
    let text = key.to_binary_value();
    let decimal = text
        .as_str()
        .filter(|s| !s.starts_with('+'))
        .is_some_and(|s| s.parse::<i64>().is_ok());
    if !decimal {
        return Err(Error::illegal(format!(
            "raw integer index key '{text}' is not a decimal 64-bit integer"
        )));
    }
    Ok(())
}

/// Term filters are only accepted by binary indexes.
pub(crate) fn check_term_filter(kind: IndexKind, term_filter: Option<&str>) -> Result<()> {
    if term_filter.is_some() && !kind.supports_term_filter() {
        return Err(Error::illegal(format!(
            "regex term filter cannot be used with an {kind} index query"
        )));
    }
    Ok(())
}

/// Max results must be positive.
pub(crate) fn check_max_results(max_results: Option<i32>) -> Result<Option<u32>> {
    match max_results {
        None => Ok(None),
        Some(n) if n > 0 => Ok(Some(n as u32)),
        Some(n) => Err(Error::illegal(format!(
            "max results must be a positive integer, got {n}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BinaryValue;

    #[test]
    fn test_criteria_exclusivity() {
        let err = check_criteria(
            Some(IndexKeyValue::Int(1)),
            Some(IndexKeyValue::Int(1)),
            Some(IndexKeyValue::Int(2)),
        )
        .unwrap_err();
        assert!(matches!(err, Error::IllegalConfiguration(_)));

        let err = check_criteria(
            Some(IndexKeyValue::Int(1)),
            None,
            Some(IndexKeyValue::Int(2)),
        )
        .unwrap_err();
        assert!(matches!(err, Error::IllegalConfiguration(_)));

        let err = check_criteria(None, None, None).unwrap_err();
        assert_eq!(
            err,
            Error::MissingRequiredField("match value or range".into())
        );
    }

    #[test]
    fn test_criteria_half_range() {
        assert_eq!(
            check_criteria(None, Some(IndexKeyValue::Int(1)), None).unwrap_err(),
            Error::MissingRequiredField("range end".into())
        );
        assert_eq!(
            check_criteria(None, None, Some(IndexKeyValue::Int(1))).unwrap_err(),
            Error::MissingRequiredField("range start".into())
        );
    }

    #[test]
    fn test_key_kind() {
        assert!(check_key_kind(IndexKind::Integer, &IndexKeyValue::Int(3)).is_ok());
        assert_eq!(
            check_key_kind(IndexKind::Integer, &IndexKeyValue::from("3")).unwrap_err(),
            Error::TypeMismatch {
                expected: IndexKind::Integer,
                actual: IndexKind::Binary,
            }
        );
    }

    #[test]
    fn test_raw_shape() {
        let lenient = KeyShape::Raw { strict: false };
        let strict = KeyShape::Raw { strict: true };

        let criteria = KeyCriteria::Match(IndexKeyValue::Bin(BinaryValue::from("match")));
        assert!(check_key_kinds(IndexKind::Integer, &criteria, lenient).is_ok());
        assert!(check_key_kinds(IndexKind::Integer, &criteria, strict).is_err());
        assert!(check_key_kinds(IndexKind::Binary, &criteria, strict).is_ok());

        let criteria = KeyCriteria::Range {
            start: IndexKeyValue::from("-12"),
            end: IndexKeyValue::from("9223372036854775807"),
        };
        assert!(check_key_kinds(IndexKind::Integer, &criteria, strict).is_ok());
    }

    #[test]
    fn test_strict_integer_shape() {
        for text in ["0", "-1", "42", "-9223372036854775808"] {
            let key = IndexKeyValue::from(text);
            assert!(check_integer_shape(&key).is_ok(), "{text}");
        }
        for text in ["+5", "", "-", "1.5", " 7", "0x10", "9223372036854775808"] {
            let key = IndexKeyValue::from(text);
            assert!(check_integer_shape(&key).is_err(), "{text}");
        }
        let invalid_utf8 = IndexKeyValue::Bin(BinaryValue::from(vec![0xff, 0x31]));
        assert!(check_integer_shape(&invalid_utf8).is_err());
    }

    #[test]
    fn test_term_filter() {
        assert!(check_term_filter(IndexKind::Binary, Some("filter")).is_ok());
        assert!(check_term_filter(IndexKind::Integer, None).is_ok());
        assert!(matches!(
            check_term_filter(IndexKind::Integer, Some("filter")),
            Err(Error::IllegalConfiguration(_))
        ));
    }

    #[test]
    fn test_max_results() {
        assert_eq!(check_max_results(None).unwrap(), None);
        assert_eq!(
            check_max_results(Some(i32::MAX)).unwrap(),
            Some(i32::MAX as u32)
        );
        assert!(check_max_results(Some(0)).is_err());
        assert!(check_max_results(Some(-5)).is_err());
    }
}
