//! Item Calls
//!
//! `GET /items`, `POST /items/new` and `GET /items/{id}`.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS, NON_ALPHANUMERIC};
use serde_json::Value;

use super::{ApiError, Transport};
use crate::models::{Item, NewItem};

/// Characters escaped in an `x-www-form-urlencoded` value
const FORM_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'*');

/// Characters escaped in a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Item endpoints over any [`Transport`]
pub struct ItemsApi<T> {
    transport: T,
}

impl<T: Transport> ItemsApi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> Result<Vec<Item>, ApiError> {
        let body = self.transport.get("/items").await?;
        decode_items(&body)
    }

    /// Response body is ignored.
    pub async fn create(&self, item: &NewItem) -> Result<(), ApiError> {
        let body = encode_create_form(item)?;
        self.transport.post_form("/items/new", body).await?;
        Ok(())
    }

    /// Response body is ignored.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/items/{}", utf8_percent_encode(id, PATH_SEGMENT));
        self.transport.get(&path).await?;
        Ok(())
    }
}

/// Decode a `/items` body.
///
/// Accepts a plain JSON array, or a JSON string whose contents are the array.
/// `null` decodes to an empty list.
pub fn decode_items(body: &str) -> Result<Vec<Item>, ApiError> {
    let value: Value = serde_json::from_str(body)?;
    let value = match value {
        Value::String(inner) => serde_json::from_str(&inner)?,
        other => other,
    };
    match value {
        Value::Null => Ok(Vec::new()),
        other => Ok(serde_json::from_value(other)?),
    }
}

/// Form body `data=<json payload>`
pub fn encode_create_form(item: &NewItem) -> Result<String, ApiError> {
    let json = serde_json::to_string(&item.to_payload())?;
    Ok(format!("data={}", utf8_percent_encode(&json, FORM_VALUE)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;

    #[test]
    fn test_decode_plain_array() {
        let items = decode_items(r#"[{"ID":"1","Text":"buy milk","Priority":0}]"#).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "1");
        assert_eq!(items[0].text, "buy milk");
    }

    #[test]
    fn test_decode_double_encoded_array() {
        let inner = r#"[{"ID":"a","Text":"x","Priority":1},{"ID":"b","Text":"y","Priority":0}]"#;
        let body = serde_json::to_string(inner).unwrap();
        let items = decode_items(&body).unwrap();
        assert_eq!(items.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(), ["a", "b"]);
        assert!(items[0].is_high_priority());
    }

    #[test]
    fn test_decode_null_is_empty() {
        assert!(decode_items("null").unwrap().is_empty());
        assert!(decode_items("[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode_items("<html>"), Err(ApiError::Decode(_))));
        assert!(matches!(decode_items(r#"{"ID":"1"}"#), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_create_form_carries_payload() {
        let body = encode_create_form(&NewItem::new("call mom & dad", 1)).unwrap();
        let value = body.strip_prefix("data=").unwrap();
        assert!(!value.contains('&'));
        assert!(!value.contains(' '));

        let json = percent_decode_str(value).decode_utf8().unwrap();
        assert_eq!(json, r#"{"ID":"newitem","Text":"call mom & dad","Priority":1}"#);
    }
}
