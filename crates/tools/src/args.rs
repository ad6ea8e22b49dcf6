//! Argument extraction and coercion for tool calls.

use codegen_fs::{AccessError, WriteMode};
use serde_json::Value;

use crate::ToolArgs;

/// Non-empty string argument, or `MissingArgument`.
pub fn required_str<'a>(args: &'a ToolArgs, name: &str) -> Result<&'a str, AccessError> {
    match args.get(name) {
        None | Some(Value::Null) => Err(AccessError::missing(name)),
        Some(Value::String(s)) if s.is_empty() => Err(AccessError::missing(name)),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(AccessError::invalid(
            name,
            format!("expected a string, got {}", other),
        )),
    }
}

/// Content argument. Non-string values are rendered as JSON text.
pub fn content(args: &ToolArgs, name: &str) -> Option<String> {
    match args.get(name) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

/// Line number argument. Accepts integers and integer strings.
pub fn line_number(args: &ToolArgs, name: &str) -> Result<Option<usize>, AccessError> {
    let parsed = match args.get(name) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };

    let Some(value) = parsed else {
        return Err(AccessError::InvalidRange(format!(
            "Invalid line number format for '{}'",
            name
        )));
    };

    if value < 0 {
        return Err(AccessError::InvalidRange(format!(
            "{} must be 1 or greater",
            name
        )));
    }

    Ok(Some(value as usize))
}

/// Optional boolean argument.
pub fn flag(args: &ToolArgs, name: &str) -> Result<Option<bool>, AccessError> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(AccessError::invalid(
            name,
            format!("expected a boolean, got {}", other),
        )),
    }
}

/// Optional write mode argument.
pub fn write_mode(args: &ToolArgs, name: &str) -> Result<Option<WriteMode>, AccessError> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => s.parse().map(Some),
        Some(other) => Err(AccessError::invalid(
            name,
            format!("expected a string, got {}", other),
        )),
    }
}

/// Reject encodings other than UTF-8.
pub fn check_encoding(args: &ToolArgs, name: &str) -> Result<(), AccessError> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(()),
        Some(Value::String(s)) if matches!(s.to_ascii_lowercase().as_str(), "utf-8" | "utf8") => {
            Ok(())
        }
        Some(other) => Err(AccessError::invalid(
            name,
            format!("only utf-8 is supported, got {}", other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegen_fs::ErrorKind;
    use serde_json::json;

    fn args(value: Value) -> ToolArgs {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_required_str() {
        let a = args(json!({"file_path": "a.txt", "empty": "", "num": 3}));
        assert_eq!(required_str(&a, "file_path").unwrap(), "a.txt");
        assert_eq!(required_str(&a, "empty").unwrap_err().kind(), ErrorKind::MissingArgument);
        assert_eq!(required_str(&a, "absent").unwrap_err().kind(), ErrorKind::MissingArgument);
        assert_eq!(required_str(&a, "num").unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_content_coercion() {
        let a = args(json!({"s": "", "n": 42, "b": true, "null": null}));
        assert_eq!(content(&a, "s").as_deref(), Some(""));
        assert_eq!(content(&a, "n").as_deref(), Some("42"));
        assert_eq!(content(&a, "b").as_deref(), Some("true"));
        assert_eq!(content(&a, "null"), None);
        assert_eq!(content(&a, "absent"), None);
    }

    #[test]
    fn test_line_number_formats() {
        let a = args(json!({"int": 2, "str": " 3 ", "float": 4.0, "frac": 1.5, "bad": "abc", "neg": -1, "bool": true}));
        assert_eq!(line_number(&a, "int").unwrap(), Some(2));
        assert_eq!(line_number(&a, "str").unwrap(), Some(3));
        assert_eq!(line_number(&a, "float").unwrap(), Some(4));
        assert_eq!(line_number(&a, "absent").unwrap(), None);
        assert_eq!(line_number(&a, "frac").unwrap_err().kind(), ErrorKind::InvalidRange);
        assert_eq!(line_number(&a, "bad").unwrap_err().kind(), ErrorKind::InvalidRange);
        assert_eq!(line_number(&a, "neg").unwrap_err().kind(), ErrorKind::InvalidRange);
        assert_eq!(line_number(&a, "bool").unwrap_err().kind(), ErrorKind::InvalidRange);
    }

    #[test]
    fn test_write_mode_and_encoding() {
        let a = args(json!({"w": "w", "a": "append", "x": "rw", "enc": "UTF-8", "latin": "latin-1"}));
        assert_eq!(write_mode(&a, "w").unwrap(), Some(WriteMode::Overwrite));
        assert_eq!(write_mode(&a, "a").unwrap(), Some(WriteMode::Append));
        assert_eq!(write_mode(&a, "x").unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert!(check_encoding(&a, "enc").is_ok());
        assert!(check_encoding(&a, "absent").is_ok());
        assert_eq!(check_encoding(&a, "latin").unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_flag() {
        let a = args(json!({"yes": true, "str": "true"}));
        assert_eq!(flag(&a, "yes").unwrap(), Some(true));
        assert_eq!(flag(&a, "absent").unwrap(), None);
        assert_eq!(flag(&a, "str").unwrap_err().kind(), ErrorKind::InvalidArgument);
    }
}
