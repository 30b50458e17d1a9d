use crate::error::{PortalError, Result};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// A value written to a widget channel.
///
/// Host attributes always arrive as [`ChannelValue::Text`]; programmatic
/// writes may hand over an already-structured [`ChannelValue::Json`].
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelValue {
    /// Serialised text (JSON for structured channels, verbatim for scalar ones).
    Text(String),
    /// A value already in structured form.
    Json(Value),
}

impl ChannelValue {
    /// Convert any serialisable value into a structured value for `channel`.
    pub fn from_value<T: Serialize>(channel: &str, value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .map(Self::Json)
            .map_err(|e| PortalError::Decode {
                channel: channel.to_string(),
                reason: e.to_string(),
            })
    }
}

impl From<&str> for ChannelValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for ChannelValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for ChannelValue {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

/// Decode a structured channel into its declared shape.
pub fn decode<T: DeserializeOwned>(channel: &str, value: ChannelValue) -> Result<T> {
    let decoded = match value {
        ChannelValue::Text(text) => serde_json::from_str(&text),
        ChannelValue::Json(json) => serde_json::from_value(json),
    };
    decoded.map_err(|e| PortalError::Decode {
        channel: channel.to_string(),
        reason: e.to_string(),
    })
}

/// Read a scalar channel.  Text passes through untouched; a JSON value must
/// be a string.
pub fn raw_text(channel: &str, value: ChannelValue) -> Result<String> {
    match value {
        ChannelValue::Text(text) | ChannelValue::Json(Value::String(text)) => Ok(text),
        ChannelValue::Json(other) => Err(PortalError::Decode {
            channel: channel.to_string(),
            reason: format!("expected a string, found {other}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_text_and_values_alike() {
        let from_text: Vec<String> = decode("pages", r#"["a","b"]"#.into()).unwrap();
        let from_json: Vec<String> = decode("pages", json!(["a", "b"]).into()).unwrap();
        assert_eq!(from_text, from_json);
    }

    #[test]
    fn malformed_text_names_the_channel() {
        let err = decode::<Vec<String>>("pages", "[not json".into()).unwrap_err();
        match err {
            PortalError::Decode { channel, .. } => assert_eq!(channel, "pages"),
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn wrong_shape_is_a_decode_error() {
        let err = decode::<Vec<String>>("routes", json!({"a": 1}).into()).unwrap_err();
        assert!(matches!(err, PortalError::Decode { .. }));
    }

    #[test]
    fn raw_text_passes_through_verbatim() {
        assert_eq!(raw_text("title", "<b>x</b>".into()).unwrap(), "<b>x</b>");
        assert_eq!(raw_text("title", json!("t").into()).unwrap(), "t");
        assert!(raw_text("title", json!(3).into()).is_err());
    }

    #[test]
    fn unserialisable_values_name_the_channel() {
        use std::collections::BTreeMap;

        let mut keyed = BTreeMap::new();
        keyed.insert((1, 2), "pair keys are not valid JSON object keys");
        match ChannelValue::from_value("data", &keyed).unwrap_err() {
            PortalError::Decode { channel, .. } => assert_eq!(channel, "data"),
            other => panic!("wrong variant: {other:?}"),
        }
        assert_eq!(
            ChannelValue::from_value("pages", &["a"]).unwrap(),
            ChannelValue::Json(json!(["a"]))
        );
    }
}
