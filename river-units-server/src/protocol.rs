//! JSON-RPC message types and structured errors

use std::io::{self, BufRead, Read};

use river_units::{ConvertError, ParseError};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Machine-readable error codes
pub mod codes {
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const INVALID_PARAMS: &str = "INVALID_PARAMS";
    pub const METHOD_NOT_FOUND: &str = "METHOD_NOT_FOUND";
    pub const INVALID_UNIT: &str = "INVALID_UNIT";
    pub const INCOMPATIBLE_UNITS: &str = "INCOMPATIBLE_UNITS";
    pub const BATCH_TOO_LARGE: &str = "BATCH_TOO_LARGE";
    pub const REQUEST_TOO_LARGE: &str = "REQUEST_TOO_LARGE";
    pub const NON_FINITE: &str = "NON_FINITE";
    pub const INTERNAL: &str = "INTERNAL";
}

#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Option<JsonValue>,
    pub method: String,
    #[serde(default)]
    pub params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    pub fn new(id: Option<JsonValue>, result: Result<JsonValue, RpcError>) -> Self {
        match result {
            Ok(r) => RpcResponse { jsonrpc: "2.0".to_string(), id, result: Some(r), error: None },
            Err(e) => RpcResponse { jsonrpc: "2.0".to_string(), id, result: None, error: Some(e) },
        }
    }
}

/// Detail carried in `error.data`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorData {
    /// Machine-readable code from [`codes`]
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ErrorData>,
}

impl RpcError {
    fn new(code: i32, tag: &str, message: impl Into<String>) -> Self {
        RpcError {
            code,
            message: message.into(),
            data: Some(ErrorData { code: tag.to_string(), suggestion: None }),
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        if let Some(data) = self.data.as_mut() {
            data.suggestion = Some(suggestion.into());
        }
        self
    }

    /// Tag from `error.data.code`
    pub fn tag(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.code.as_str())
    }

    pub fn parse_error(details: impl std::fmt::Display) -> Self {
        Self::new(-32700, codes::PARSE_ERROR, format!("Parse error: {}", details))
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(-32601, codes::METHOD_NOT_FOUND, format!("Method not found: {}", method))
            .with_suggestion("Call initialize to list supported methods")
    }

    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::new(-32602, codes::INVALID_PARAMS, details)
    }

    pub fn batch_too_large(got: usize, max: usize) -> Self {
        Self::new(
            -32602,
            codes::BATCH_TOO_LARGE,
            format!("{} values exceed the batch limit of {}", got, max),
        )
        .with_suggestion("Split the values across several requests")
    }

    pub fn request_too_large(got: usize, max: usize) -> Self {
        Self::new(
            -32600,
            codes::REQUEST_TOO_LARGE,
            format!("request of {} bytes exceeds the line limit of {}", got, max),
        )
        .with_suggestion("Split the values across several requests")
    }

    /// A converted value overflowed or was not a number
    pub fn non_finite(index: Option<usize>) -> Self {
        let message = match index {
            Some(i) => format!("converted value at index {} is not finite", i),
            None => "converted value is not finite".to_string(),
        };
        Self::new(-32003, codes::NON_FINITE, message)
            .with_suggestion("Convert to a larger unit or send a smaller value")
    }
}

/// One newline-terminated message read from the wire
#[derive(Debug, PartialEq, Eq)]
pub enum Frame {
    Eof,
    Line,
    /// Longer than the limit; the whole line was consumed and discarded
    TooLong(usize),
}

/// Read the next line into `buf`, holding at most `max + 1` bytes of it.
pub fn read_frame<R: BufRead>(reader: &mut R, max: usize, buf: &mut Vec<u8>) -> io::Result<Frame> {
    buf.clear();
    let limit = u64::try_from(max).unwrap_or(u64::MAX).saturating_add(1);
    let read = reader.by_ref().take(limit).read_until(b'\n', buf)?;
    if read == 0 {
        return Ok(Frame::Eof);
    }
    if read <= max || buf.last() == Some(&b'\n') {
        return Ok(Frame::Line);
    }

    let mut skipped = read;
    buf.clear();
    loop {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            break;
        }
        match available.iter().position(|&b| b == b'\n') {
            Some(i) => {
                reader.consume(i + 1);
                skipped += i + 1;
                break;
            }
            None => {
                let n = available.len();
                reader.consume(n);
                skipped += n;
            }
        }
    }
    Ok(Frame::TooLong(skipped))
}

impl From<ParseError> for RpcError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::UnknownPrimitive { .. } => Self::new(-32603, codes::INTERNAL, err.to_string())
                .with_suggestion("This is a bug, please report it"),
            _ => Self::new(-32001, codes::INVALID_UNIT, err.to_string())
                .with_suggestion("Use units/list for the registered symbols"),
        }
    }
}

impl From<ConvertError> for RpcError {
    fn from(err: ConvertError) -> Self {
        match err {
            ConvertError::Parse(e) => e.into(),
            ConvertError::IncompatibleUnits { .. } => {
                Self::new(-32002, codes::INCOMPATIBLE_UNITS, err.to_string())
                    .with_suggestion("Both units need the same operators and matching families")
            }
            ConvertError::DanglingExponent { .. } => Self::new(-32603, codes::INTERNAL, err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use river_units::Unit;

    #[test]
    fn test_parse_error_maps_to_invalid_unit() {
        let err: RpcError = Unit::from_string("NM**").unwrap_err().into();
        assert_eq!(err.code, -32001);
        assert_eq!(err.tag(), Some(codes::INVALID_UNIT));
    }

    #[test]
    fn test_incompatible_maps() {
        let kg = Unit::from_string("kg").unwrap();
        let s = Unit::from_string("s").unwrap();
        let err: RpcError = kg.convert_to(&s).unwrap_err().into();
        assert_eq!(err.tag(), Some(codes::INCOMPATIBLE_UNITS));
    }

    #[test]
    fn test_read_frame_discards_oversized_line() {
        let input = format!("short\n{}\nok\n", "x".repeat(20));
        let mut reader = io::Cursor::new(input.into_bytes());
        let mut buf = Vec::new();

        assert_eq!(read_frame(&mut reader, 10, &mut buf).unwrap(), Frame::Line);
        assert_eq!(buf, b"short\n");
        assert_eq!(read_frame(&mut reader, 10, &mut buf).unwrap(), Frame::TooLong(21));
        assert!(buf.is_empty());
        assert_eq!(read_frame(&mut reader, 10, &mut buf).unwrap(), Frame::Line);
        assert_eq!(buf, b"ok\n");
        assert_eq!(read_frame(&mut reader, 10, &mut buf).unwrap(), Frame::Eof);
    }

    #[test]
    fn test_read_frame_at_limit() {
        // exactly `max` bytes plus the newline still fits
        let mut reader = io::Cursor::new(b"0123456789\n0123456789".to_vec());
        let mut buf = Vec::new();
        assert_eq!(read_frame(&mut reader, 10, &mut buf).unwrap(), Frame::Line);
        assert_eq!(buf, b"0123456789\n");
        // last line without a trailing newline
        assert_eq!(read_frame(&mut reader, 10, &mut buf).unwrap(), Frame::Line);
        assert_eq!(buf, b"0123456789");
    }

    #[test]
    fn test_request_too_large() {
        let err = RpcError::request_too_large(21, 10);
        assert_eq!(err.code, -32600);
        assert_eq!(err.tag(), Some(codes::REQUEST_TOO_LARGE));
    }

    #[test]
    fn test_response_serialization_skips_empty_fields() {
        let response = RpcResponse::new(Some(serde_json::json!(1)), Ok(serde_json::json!({})));
        let text = serde_json::to_string(&response).unwrap();
        assert_eq!(text, r#"{"jsonrpc":"2.0","id":1,"result":{}}"#);
    }
}
