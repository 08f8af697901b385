use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};
use serde_json::{Number, Value};

use super::{CodecError, exact_digits};

/// An exact decimal identifier (user id, order id, ...).
///
/// Serializes as a bare JSON integer with every digit intact and deserializes
/// from either a JSON number or a digit string, so it survives both codec
/// modes and values far beyond `u64`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BigId(String);

impl BigId {
    pub fn new(digits: impl Into<String>) -> Result<Self, CodecError> {
        let digits = digits.into();
        let valid = !digits.is_empty() &&
            digits.bytes().all(|b| b.is_ascii_digit()) &&
            (digits.len() == 1 || !digits.starts_with('0'));
        if valid {
            Ok(Self(digits))
        } else {
            Err(CodecError::InvalidIdentifier(digits))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The value as `u64`, when it fits.
    pub fn as_u64(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl Display for BigId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BigId {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim())
    }
}

impl From<u64> for BigId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for BigId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let number = Number::from_str(&self.0).map_err(ser::Error::custom)?;
        number.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BigId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let digits =
            exact_digits(&value).ok_or_else(|| de::Error::custom(format!("expected an integer identifier, got {value}")))?;
        BigId::new(digits).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Order {
        order_id: BigId,
        amount: i64,
    }

    #[test]
    fn serializes_as_bare_integer() {
        let order = Order {
            order_id: "79228162514264337593".parse().unwrap(),
            amount: 5,
        };
        assert_eq!(
            serde_json::to_string(&order).unwrap(),
            r#"{"orderId":79228162514264337593,"amount":5}"#
        );
    }

    #[test]
    fn deserializes_from_number_or_string() {
        let from_number: Order = serde_json::from_str(r#"{"orderId":1996080936390758400,"amount":1}"#).unwrap();
        let from_string: Order = serde_json::from_value(json!({"orderId": "1996080936390758400", "amount": 1})).unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number.order_id.as_str(), "1996080936390758400");
        assert_eq!(from_number.order_id.as_u64(), Some(1_996_080_936_390_758_400));
    }

    #[test]
    fn rejects_non_identifiers() {
        assert!(BigId::new("").is_err());
        assert!(BigId::new("12a").is_err());
        assert!(BigId::new("-5").is_err());
        assert!(BigId::new("007").is_err());
        assert!(serde_json::from_str::<BigId>("1.5").is_err());
        assert!(serde_json::from_str::<BigId>("true").is_err());
    }
}
