//! JSON output for the CLI
//!
//! - Output: single JSON object via stdout
//! - Logs go to stderr and never mix with it

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });
    write_value(&mut io::stdout(), &response)
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });
    write_value(&mut io::stdout(), &response)
}

fn write_value<W: Write>(writer: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_line_per_response() {
        let mut buffer = Vec::new();
        write_value(&mut buffer, &serde_json::json!({"status": "ok"})).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "{\"status\":\"ok\"}\n");
    }
}
