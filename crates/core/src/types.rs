/// Field values are loosely-typed JSON handed over by the form host.
pub type Value = serde_json::Value;

/// A field is addressed by its declared name.
pub type FieldPath = String;

/// Returns `true` if the host-supplied value counts as absent.
///
/// Absent means missing (`None`), JSON `null`, or the empty string. Every
/// rule except `required` passes on an absent value.
pub fn is_absent(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_is_absent() {
        assert!(is_absent(None));
    }

    #[test]
    fn test_null_is_absent() {
        assert!(is_absent(Some(&Value::Null)));
    }

    #[test]
    fn test_empty_string_is_absent() {
        assert!(is_absent(Some(&json!(""))));
    }

    #[test]
    fn test_zero_and_false_are_present() {
        assert!(!is_absent(Some(&json!(0))));
        assert!(!is_absent(Some(&json!(false))));
    }
}
