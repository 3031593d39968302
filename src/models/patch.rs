// Tri-state field wrapper for partial-update payloads.
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Distinguishes "field omitted" from "field set to null" from "field set to
/// a value" in update requests.
///
/// Fields must be declared with
/// `#[serde(default, skip_serializing_if = "Patch::is_absent")]` so that
/// `Absent` never reaches the wire: serializing an update payload yields
/// exactly the fields the caller set, and nothing else is touched in the
/// stored row.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    /// Field not present in the request; leaves the stored value unchanged.
    Absent,
    /// Field explicitly set to null; clears the stored value.
    Null,
    /// Field set to a value.
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    pub fn as_ref(&self) -> Patch<&T> {
        match self {
            Patch::Absent => Patch::Absent,
            Patch::Null => Patch::Null,
            Patch::Value(v) => Patch::Value(v),
        }
    }
}

impl<T> From<T> for Patch<T> {
    fn from(value: T) -> Self {
        Patch::Value(value)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Absent is filtered out by skip_serializing_if; treat a stray
            // one the same as an explicit null.
            Patch::Absent | Patch::Null => serializer.serialize_none(),
            Patch::Value(v) => v.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A present key deserializes here: null becomes Null, anything else
        // a Value. A missing key never reaches this point (serde default).
        Ok(match Option::<T>::deserialize(deserializer)? {
            None => Patch::Null,
            Some(v) => Patch::Value(v),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize, Default)]
    struct Sample {
        #[serde(default, skip_serializing_if = "Patch::is_absent")]
        name: Patch<String>,
        #[serde(default, skip_serializing_if = "Patch::is_absent")]
        note: Patch<String>,
    }

    #[test]
    fn missing_null_and_value_are_distinct() {
        let s: Sample = serde_json::from_value(json!({ "name": "x", "note": null })).unwrap();
        assert_eq!(s.name, Patch::Value("x".to_string()));
        assert_eq!(s.note, Patch::Null);

        let s: Sample = serde_json::from_value(json!({})).unwrap();
        assert!(s.name.is_absent());
        assert!(s.note.is_absent());
    }

    #[test]
    fn absent_fields_never_serialize() {
        let s: Sample = serde_json::from_value(json!({ "name": "x" })).unwrap();
        let out = serde_json::to_value(&s).unwrap();
        assert_eq!(out, json!({ "name": "x" }));
    }

    #[test]
    fn explicit_null_serializes_as_null() {
        let s: Sample = serde_json::from_value(json!({ "note": null })).unwrap();
        let out = serde_json::to_value(&s).unwrap();
        assert_eq!(out, json!({ "note": null }));
    }
}
