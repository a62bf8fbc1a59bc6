//! Schema type definitions
//!
//! A schema is an ordered list of field descriptors. Every value is a string;
//! a field is either indexed or not. The schema is fixed for the lifetime of
//! the table it describes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::errors::{SchemaError, SchemaResult};

/// A row of field values, one per schema field, in schema order
pub type Row = Vec<String>;

/// Whether a column carries an ordered index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexType {
    /// Not indexed; searches on this column scan rows
    None,
    /// Indexed with an `OrderedMultiMap`
    Indexed,
}

/// Field descriptor: name plus index flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name, unique within the schema
    pub name: String,
    /// Index flag
    pub index: IndexType,
}

impl FieldDescriptor {
    /// Create an indexed field
    pub fn indexed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: IndexType::Indexed,
        }
    }

    /// Create a non-indexed field
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: IndexType::None,
        }
    }

    /// Returns true if the field is indexed
    pub fn is_indexed(&self) -> bool {
        self.index == IndexType::Indexed
    }
}

/// Validated table schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Builds a schema, rejecting one with no indexed field, an empty field
    /// name or a repeated field name.
    pub fn new(fields: Vec<FieldDescriptor>) -> SchemaResult<Self> {
        if !fields.iter().any(FieldDescriptor::is_indexed) {
            return Err(SchemaError::no_indexed_field());
        }

        let mut seen = HashSet::with_capacity(fields.len());
        for (position, field) in fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(SchemaError::empty_field_name(position));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::duplicate_field(&field.name));
            }
        }

        Ok(Self { fields })
    }

    /// Number of fields every row must carry
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    /// All field descriptors in schema order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Descriptor at column `column`
    pub fn field(&self, column: usize) -> Option<&FieldDescriptor> {
        self.fields.get(column)
    }

    /// Column position of the field called `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Returns true if column `column` exists and is indexed
    pub fn is_indexed(&self, column: usize) -> bool {
        self.fields.get(column).is_some_and(FieldDescriptor::is_indexed)
    }

    /// Positions of all indexed columns, ascending
    pub fn indexed_columns(&self) -> Vec<usize> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_indexed())
            .map(|(i, _)| i)
            .collect()
    }

    /// Field names in schema order
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaErrorCode;

    fn people() -> Schema {
        Schema::new(vec![
            FieldDescriptor::indexed("LastName"),
            FieldDescriptor::indexed("Age"),
            FieldDescriptor::plain("FirstName"),
        ])
        .unwrap()
    }

    #[test]
    fn test_schema_lookup() {
        let schema = people();
        assert_eq!(schema.arity(), 3);
        assert_eq!(schema.position("Age"), Some(1));
        assert_eq!(schema.position("Missing"), None);
        assert!(schema.is_indexed(0));
        assert!(!schema.is_indexed(2));
        assert!(!schema.is_indexed(7));
        assert_eq!(schema.indexed_columns(), vec![0, 1]);
        assert_eq!(schema.names(), vec!["LastName", "Age", "FirstName"]);
    }

    #[test]
    fn test_no_indexed_field_rejected() {
        let err = Schema::new(vec![FieldDescriptor::plain("a"), FieldDescriptor::plain("b")])
            .unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::TdbSchemaInvalid);
    }

    #[test]
    fn test_empty_schema_rejected() {
        assert!(Schema::new(Vec::new()).is_err());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let err = Schema::new(vec![FieldDescriptor::indexed("a"), FieldDescriptor::plain("a")])
            .unwrap_err();
        assert_eq!(err.field(), Some("a"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = Schema::new(vec![FieldDescriptor::indexed("a"), FieldDescriptor::plain("")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_descriptor_serde_shape() {
        let json = serde_json::to_value(FieldDescriptor::indexed("Age")).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Age", "index": "indexed"}));

        let parsed: FieldDescriptor =
            serde_json::from_value(serde_json::json!({"name": "x", "index": "none"})).unwrap();
        assert!(!parsed.is_indexed());
    }
}
