// Canonical JSON layer. Hash preimages and printed views both go through
// serde_json; struct fields serialize in declaration order, which keeps the
// canonical form stable for equal values.
use crate::error::Result;
use serde::Serialize;

/// Serialize data to its canonical JSON form (the form that gets hashed)
pub fn to_canonical_json<T: Serialize>(data: &T) -> Result<String> {
    Ok(serde_json::to_string(data)?)
}

/// Serialize data to human-readable JSON for display surfaces
pub fn to_pretty_json<T: Serialize>(data: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use serde::Serialize;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct TestData {
        id: u64,
        name: String,
        values: Vec<i32>,
    }

    #[test]
    fn test_canonical_form_is_deterministic() {
        let data = TestData {
            id: 42,
            name: "test".to_string(),
            values: vec![1, 2, 3],
        };

        let first = to_canonical_json(&data).expect("Serialization should work");
        let second = to_canonical_json(&data.clone()).expect("Serialization should work");

        assert_eq!(first, second);
    }

    #[test]
    fn test_canonical_form_reflects_content() {
        let a = TestData {
            id: 1,
            name: "a".to_string(),
            values: vec![],
        };
        let b = TestData {
            id: 2,
            name: "a".to_string(),
            values: vec![],
        };

        let json_a = to_canonical_json(&a).expect("Serialization should work");
        let json_b = to_canonical_json(&b).expect("Serialization should work");

        assert_ne!(json_a, json_b);
    }

    #[test]
    fn test_pretty_form_parses_back() {
        let data = TestData {
            id: 7,
            name: "pretty".to_string(),
            values: vec![9],
        };

        let pretty = to_pretty_json(&data).expect("Serialization should work");
        let parsed: serde_json::Value =
            serde_json::from_str(&pretty).expect("Pretty output should be valid JSON");
        assert_eq!(parsed["id"], 7);
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(
            &self,
            _serializer: S,
        ) -> std::result::Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("refused to serialize"))
        }
    }

    #[test]
    fn test_failed_serialization_surfaces_as_hashing_error() {
        match to_canonical_json(&Unserializable) {
            Err(LedgerError::Hashing(message)) => {
                assert!(message.contains("refused to serialize"));
            }
            other => panic!("expected a hashing error, got {other:?}"),
        }
    }
}
