//! Bidirectional property conversions between model types and stored
//! primitives.

use crate::core::{Result, StoreError, StoredValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A registered pair of pure mapping functions for one property: encode
/// turns the in-memory value into a stored primitive at write time, decode
/// reconstructs it at read time.
///
/// The contract is round-trip fidelity: `decode(encode(x))` yields a value
/// equal to `x` under the model type's equality. Decode must cover the
/// persisted domain; anything else is a [`StoreError`].
pub struct Conversion<M> {
    encode: Box<dyn Fn(&M) -> Result<StoredValue>>,
    decode: Box<dyn Fn(&StoredValue) -> Result<M>>,
}

impl<M> Conversion<M> {
    pub fn new(
        encode: impl Fn(&M) -> Result<StoredValue> + 'static,
        decode: impl Fn(&StoredValue) -> Result<M> + 'static,
    ) -> Self {
        Self {
            encode: Box::new(encode),
            decode: Box::new(decode),
        }
    }

    /// Maps a wrapper scalar to an INTEGER column through two infallible
    /// functions, one in each direction.
    pub fn integer(
        to: impl Fn(&M) -> i64 + 'static,
        from: impl Fn(i64) -> M + 'static,
    ) -> Self {
        Self::new(
            move |model| Ok(StoredValue::Integer(to(model))),
            move |value| {
                let i = value.as_i64().ok_or_else(|| {
                    StoreError::TypeMismatch(format!(
                        "expected INTEGER payload, got {}",
                        value.type_name()
                    ))
                })?;
                Ok(from(i))
            },
        )
    }

    /// Serializes the value as JSON into a TEXT column and deserializes it
    /// back on load. Round-trip preserves element order and values exactly;
    /// a malformed stored payload fails decode with
    /// [`StoreError::Conversion`].
    pub fn json_text() -> Self
    where
        M: Serialize + DeserializeOwned + 'static,
    {
        Self::new(
            |model| {
                let text = serde_json::to_string(model)
                    .map_err(|e| StoreError::Conversion(format!("JSON encode failed: {}", e)))?;
                Ok(StoredValue::Text(text))
            },
            |value| {
                let text = value.as_str().ok_or_else(|| {
                    StoreError::TypeMismatch(format!(
                        "expected TEXT payload, got {}",
                        value.type_name()
                    ))
                })?;
                serde_json::from_str(text)
                    .map_err(|e| StoreError::Conversion(format!("malformed JSON payload: {}", e)))
            },
        )
    }

    pub fn encode(&self, model: &M) -> Result<StoredValue> {
        (self.encode)(model)
    }

    pub fn decode(&self, value: &StoredValue) -> Result<M> {
        (self.decode)(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Code(i64);

    #[test]
    fn test_integer_round_trip() {
        let conv = Conversion::integer(|c: &Code| c.0, Code);
        let stored = conv.encode(&Code(7)).unwrap();
        assert_eq!(stored, StoredValue::Integer(7));
        assert_eq!(conv.decode(&stored).unwrap(), Code(7));
    }

    #[test]
    fn test_integer_decode_rejects_text() {
        let conv = Conversion::integer(|c: &Code| c.0, Code);
        let err = conv.decode(&StoredValue::Text("7".into())).unwrap_err();
        assert!(matches!(err, StoreError::TypeMismatch(_)));
    }

    #[test]
    fn test_json_round_trip_preserves_order() {
        let conv = Conversion::<Vec<i64>>::json_text();
        let stored = conv.encode(&vec![3, 1, 2]).unwrap();
        assert_eq!(stored, StoredValue::Text("[3,1,2]".into()));
        assert_eq!(conv.decode(&stored).unwrap(), vec![3, 1, 2]);
    }

    #[test]
    fn test_json_decode_rejects_malformed_payload() {
        let conv = Conversion::<Vec<i64>>::json_text();
        let err = conv.decode(&StoredValue::Text("[1,2,".into())).unwrap_err();
        assert!(matches!(err, StoreError::Conversion(_)));
    }

    #[test]
    fn test_json_decode_rejects_null() {
        let conv = Conversion::<Vec<i64>>::json_text();
        let err = conv.decode(&StoredValue::Null).unwrap_err();
        assert!(matches!(err, StoreError::TypeMismatch(_)));
    }
}
