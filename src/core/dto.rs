//! Data transfer object hydration
//!
//! Types opt in by implementing [`Dto`]: a fixed schema of field names plus
//! per-field assignment from a JSON-style field map. [`hydrate`] checks the
//! map against the schema before any assignment happens.

use std::path::PathBuf;

use serde_json::Value;

use crate::core::tree::{FileInfoNode, NodeId};
use crate::error::DtoError;

/// Field name to value mapping
pub type FieldMap = serde_json::Map<String, Value>;

/// Declared shape of a DTO
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DtoSchema {
    pub type_name: &'static str,
    pub fields: &'static [&'static str],
}

/// A type that can be built from and flattened to a [`FieldMap`]
pub trait Dto: Sized {
    const SCHEMA: DtoSchema;

    /// Assign every declared field from `fields`
    ///
    /// Called only after the map was checked to hold every declared field.
    fn from_fields(fields: &FieldMap) -> Result<Self, DtoError>;

    /// Flatten to a map holding exactly the declared fields
    fn to_fields(&self) -> FieldMap;
}

/// Build a `T`, rejecting missing and undeclared fields
pub fn hydrate<T: Dto>(fields: &FieldMap) -> Result<T, DtoError> {
    hydrate_with(fields, false)
}

/// Build a `T`, ignoring undeclared fields
pub fn hydrate_permitting_extras<T: Dto>(fields: &FieldMap) -> Result<T, DtoError> {
    hydrate_with(fields, true)
}

fn hydrate_with<T: Dto>(fields: &FieldMap, permit_extras: bool) -> Result<T, DtoError> {
    let schema = T::SCHEMA;

    let missing: Vec<String> = schema
        .fields
        .iter()
        .filter(|name| !fields.contains_key(**name))
        .map(|name| (*name).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DtoError::MissingField {
            type_name: schema.type_name,
            fields: missing,
        });
    }

    if !permit_extras {
        let extra: Vec<String> = fields
            .keys()
            .filter(|key| !schema.fields.contains(&key.as_str()))
            .cloned()
            .collect();
        if !extra.is_empty() {
            return Err(DtoError::ExtraField {
                type_name: schema.type_name,
                fields: extra,
            });
        }
    }

    T::from_fields(fields)
}

fn field<'a, T: Dto>(fields: &'a FieldMap, name: &str) -> Result<&'a Value, DtoError> {
    fields.get(name).ok_or_else(|| DtoError::MissingField {
        type_name: T::SCHEMA.type_name,
        fields: vec![name.to_string()],
    })
}

fn invalid<T: Dto>(name: &str, value: &Value, expected: &'static str) -> DtoError {
    DtoError::InvalidValue {
        type_name: T::SCHEMA.type_name,
        field: name.to_string(),
        value: value.to_string(),
        expected,
    }
}

/// Non-negative integer field
pub fn usize_field<T: Dto>(fields: &FieldMap, name: &str) -> Result<usize, DtoError> {
    let value = field::<T>(fields, name)?;
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| invalid::<T>(name, value, "non-negative integer"))
}

/// Non-negative integer field that may be `null`
pub fn optional_usize_field<T: Dto>(fields: &FieldMap, name: &str) -> Result<Option<usize>, DtoError> {
    match field::<T>(fields, name)? {
        Value::Null => Ok(None),
        _ => usize_field::<T>(fields, name).map(Some),
    }
}

/// String field
pub fn string_field<T: Dto>(fields: &FieldMap, name: &str) -> Result<String, DtoError> {
    let value = field::<T>(fields, name)?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid::<T>(name, value, "string"))
}

impl Dto for FileInfoNode {
    const SCHEMA: DtoSchema = DtoSchema {
        type_name: "FileInfoNode",
        fields: &["node_id", "parent_id", "path"],
    };

    fn from_fields(fields: &FieldMap) -> Result<Self, DtoError> {
        let node_id: NodeId = usize_field::<Self>(fields, "node_id")?;
        let parent_id = optional_usize_field::<Self>(fields, "parent_id")?;
        let path = PathBuf::from(string_field::<Self>(fields, "path")?);
        Ok(Self::new(node_id, parent_id, path))
    }

    fn to_fields(&self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert("node_id".to_string(), Value::from(self.node_id()));
        fields.insert(
            "parent_id".to_string(),
            self.parent_id().map_or(Value::Null, Value::from),
        );
        fields.insert(
            "path".to_string(),
            Value::from(self.path().to_string_lossy().into_owned()),
        );
        fields
    }
}
