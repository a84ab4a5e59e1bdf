/*
[INPUT]:  Raw response body text from the transport
[OUTPUT]: Unwrapped payload (object, array or string) or a classified error
[POS]:    HTTP layer - response envelope validation shared by every endpoint
[UPDATE]: When the exchange envelope format changes
*/

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use crate::http::{BitsoError, Result};

/// Error object inside a failed envelope
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, deserialize_with = "deserialize_error_code")]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

/// Successful `{success, payload}` envelope
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub success: Option<bool>,
    pub payload: Option<Value>,
}

impl Envelope {
    /// Parse the body and classify it.
    ///
    /// Non-JSON or a non-object body → `Parse`, `error` key → `Api`. The
    /// payload is not checked here so accessors can report `MissingPayload`
    /// themselves.
    pub fn parse(body: &str) -> Result<Self> {
        let mut object = parse_object(body)?;
        Self::from_object(&mut object)
    }

    fn from_object(object: &mut Map<String, Value>) -> Result<Self> {
        if let Some(error) = object.remove("error") {
            let error = ApiErrorBody::from_value(error);
            warn!(code = error.code, message = %error.message, "Error response from server");
            return Err(BitsoError::Api {
                code: error.code,
                message: error.message,
            });
        }

        Ok(Self {
            success: object.get("success").and_then(Value::as_bool),
            payload: object.remove("payload"),
        })
    }

    /// Take the payload or fail with `MissingPayload`; an explicit `null`
    /// counts as absent
    pub fn into_payload(self) -> Result<Value> {
        match self.payload {
            Some(payload) if !payload.is_null() => Ok(payload),
            _ => {
                warn!("Server response does not contain payload");
                Err(BitsoError::MissingPayload)
            }
        }
    }
}

impl ApiErrorBody {
    /// Read an `error` value of any shape.
    ///
    /// A `{code, message}` object is taken as is. Anything else keeps code 0
    /// and carries the raw text as the message.
    fn from_value(error: Value) -> Self {
        if error.is_object() {
            if let Ok(parsed) = serde_json::from_value::<Self>(error.clone()) {
                return parsed;
            }
        }

        let message = match error {
            Value::String(raw) => raw,
            other => other.to_string(),
        };
        Self { code: 0, message }
    }
}

fn parse_object(body: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(body)? {
        Value::Object(object) => Ok(object),
        other => Err(BitsoError::Parse(serde::de::Error::custom(format!(
            "expected a JSON object, found {}",
            value_kind(&other)
        )))),
    }
}

/// Unwrap a single-resource payload
pub fn object_payload(body: &str) -> Result<Map<String, Value>> {
    match Envelope::parse(body)?.into_payload()? {
        Value::Object(object) => Ok(object),
        other => Err(unexpected_shape("object", &other)),
    }
}

/// Unwrap a collection payload
pub fn array_payload(body: &str) -> Result<Vec<Value>> {
    match Envelope::parse(body)?.into_payload()? {
        Value::Array(items) => Ok(items),
        other => Err(unexpected_shape("array", &other)),
    }
}

/// Unwrap a string payload.
///
/// Legacy endpoints may answer with a bare JSON string instead of an
/// envelope; that string is taken as the payload.
pub fn string_payload(body: &str) -> Result<String> {
    let value: Value = serde_json::from_str(body)?;
    let payload = match value {
        Value::String(raw) => return Ok(raw),
        Value::Object(mut object) => Envelope::from_object(&mut object)?.into_payload()?,
        other => {
            return Err(BitsoError::Parse(serde::de::Error::custom(format!(
                "expected a JSON object or string, found {}",
                value_kind(&other)
            ))));
        }
    };

    match payload {
        Value::String(raw) => Ok(raw),
        other => Err(unexpected_shape("string", &other)),
    }
}

/// Unwrap an object payload, accepting a legacy bare object.
///
/// Error envelopes still classify as `Api`; an object with neither
/// `payload` nor `error` is taken as the resource itself.
pub fn legacy_object_payload(body: &str) -> Result<Map<String, Value>> {
    let mut object = parse_object(body)?;

    if !object.contains_key("payload") && !object.contains_key("error") {
        return Ok(object);
    }

    match Envelope::from_object(&mut object)?.into_payload()? {
        Value::Object(payload) => Ok(payload),
        other => Err(unexpected_shape("object", &other)),
    }
}

/// Map an object payload into a typed result
pub fn decode_object<T: DeserializeOwned>(object: Map<String, Value>) -> Result<T> {
    decode(Value::Object(object))
}

/// Map each element of an array payload into a typed result
pub fn decode_array<T: DeserializeOwned>(items: Vec<Value>) -> Result<Vec<T>> {
    items.into_iter().map(decode).collect()
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        BitsoError::InvalidResponse(format!(
            "payload does not match {}: {e}",
            std::any::type_name::<T>()
        ))
    })
}

fn unexpected_shape(expected: &str, found: &Value) -> BitsoError {
    BitsoError::InvalidResponse(format!(
        "expected {expected} payload, found {}",
        value_kind(found)
    ))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Error codes arrive as numbers or zero-padded strings ("0201")
fn deserialize_error_code<'de, D>(deserializer: D) -> std::result::Result<i32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(0),
        Value::Number(number) => number
            .as_i64()
            .and_then(|code| i32::try_from(code).ok())
            .ok_or_else(|| serde::de::Error::custom(format!("error code out of range: {number}"))),
        Value::String(raw) => raw
            .trim()
            .parse::<i32>()
            .map_err(|_| serde::de::Error::custom(format!("non-numeric error code: {raw}"))),
        other => Err(serde::de::Error::custom(format!("invalid error code: {other}"))),
    }
}
