//! Schema inference from a delimited header line
//!
//! Each token of the header is a field name. A trailing index marker (by
//! default `*`) flags the field as indexed and is stripped from the name:
//!
//! ```text
//! LastName*,Age*,FirstName
//! ```

use super::errors::{SchemaError, SchemaResult};
use super::types::{FieldDescriptor, Schema};

/// Default column delimiter
pub const DEFAULT_DELIMITER: char = ',';

/// Default index marker suffix
pub const DEFAULT_INDEX_MARKER: char = '*';

/// Builds schemas from header lines
#[derive(Debug, Clone, Copy)]
pub struct SchemaLoader {
    delimiter: char,
    index_marker: char,
}

impl Default for SchemaLoader {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER, DEFAULT_INDEX_MARKER)
    }
}

impl SchemaLoader {
    /// Creates a loader with the given delimiter and index marker
    pub fn new(delimiter: char, index_marker: char) -> Self {
        Self {
            delimiter,
            index_marker,
        }
    }

    /// Infers a schema from a header line.
    pub fn from_header(&self, line: &str) -> SchemaResult<Schema> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return Err(SchemaError::malformed_header("header line is empty"));
        }

        let mut fields = Vec::new();
        for token in line.split(self.delimiter) {
            let field = match token.strip_suffix(self.index_marker) {
                Some("") => {
                    return Err(SchemaError::malformed_header(format!(
                        "field {} is only the index marker",
                        fields.len()
                    )))
                }
                Some(name) => FieldDescriptor::indexed(name),
                None => FieldDescriptor::plain(token),
            };
            fields.push(field);
        }

        Schema::new(fields)
    }

    /// Renders a schema back into header form
    pub fn to_header(&self, schema: &Schema) -> String {
        let mut header = String::new();
        for (i, field) in schema.fields().iter().enumerate() {
            if i > 0 {
                header.push(self.delimiter);
            }
            header.push_str(&field.name);
            if field.is_indexed() {
                header.push(self.index_marker);
            }
        }
        header
    }
}
