//! Validation of fetched documents

use super::ResponseFormatError;
use crate::client::FetchedBody;
use serde_json::Value;

/// Turn a fetched body into a list of records
///
/// Text is parsed first, then the value must be an array. Bodies that a
/// transport already decoded skip the parsing stage. A JSON string holding
/// a document (double-encoded bodies) is parsed once more.
///
/// # Errors
/// [`ResponseFormatError::Unparseable`] for malformed text and
/// [`ResponseFormatError::NotAnArray`] for any other JSON value.
pub fn parse_records(body: FetchedBody) -> Result<Vec<Value>, ResponseFormatError> {
    let value = match body {
        FetchedBody::Text(text) => parse_text(&text)?,
        FetchedBody::Json(value) => value,
    };
    let value = match value {
        Value::String(text) => parse_text(&text)?,
        other => other,
    };

    match value {
        Value::Array(records) => Ok(records),
        other => Err(ResponseFormatError::NotAnArray(kind(&other))),
    }
}

fn parse_text(text: &str) -> Result<Value, ResponseFormatError> {
    serde_json::from_str(text).map_err(ResponseFormatError::Unparseable)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_array() {
        let records = parse_records(FetchedBody::from(r#"[{"a": 1}, 2]"#)).unwrap();
        assert_eq!(records, vec![json!({"a": 1}), json!(2)]);
    }

    #[test]
    fn test_json_array() {
        let records = parse_records(FetchedBody::from(json!([]))).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_malformed_text() {
        let err = parse_records(FetchedBody::from("foo")).unwrap_err();
        assert!(matches!(err, ResponseFormatError::Unparseable(_)));
        assert!(err.to_string().contains("Data must parse to a JSON array"));
    }

    #[test]
    fn test_text_object_is_not_an_array() {
        let err = parse_records(FetchedBody::from("{}")).unwrap_err();
        assert!(matches!(err, ResponseFormatError::NotAnArray("object")));
        assert!(err.to_string().contains("Data must be a JSON array"));
    }

    #[test]
    fn test_json_scalars_are_not_arrays() {
        for (value, name) in [
            (json!(null), "null"),
            (json!(true), "boolean"),
            (json!(1.5), "number"),
            (json!("{}"), "object"),
        ] {
            let err = parse_records(FetchedBody::Json(value)).unwrap_err();
            assert!(matches!(err, ResponseFormatError::NotAnArray(got) if got == name));
        }
    }

    #[test]
    fn test_json_string_is_parsed() {
        let body = FetchedBody::Json(json!(r#"[{"id": "a"}]"#));
        assert_eq!(parse_records(body).unwrap(), vec![json!({"id": "a"})]);

        let err = parse_records(FetchedBody::Json(json!("foo"))).unwrap_err();
        assert!(matches!(err, ResponseFormatError::Unparseable(_)));
    }

    #[test]
    fn test_quoted_string_text_is_parsed() {
        let records = parse_records(FetchedBody::from(r#""[1, 2]""#)).unwrap();
        assert_eq!(records, vec![json!(1), json!(2)]);
    }

    #[test]
    fn test_only_one_level_of_encoding_is_undone() {
        let twice = json!(json!("[]").to_string());
        let err = parse_records(FetchedBody::Json(twice)).unwrap_err();
        assert!(matches!(err, ResponseFormatError::NotAnArray("string")));
    }
}
