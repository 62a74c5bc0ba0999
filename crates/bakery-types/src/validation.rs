//! Configuration validation types.
//!
//! Storage backends describe their expected configuration as a small
//! schema of typed fields, validated against the raw TOML table before
//! the backend is constructed.

use thiserror::Error;

/// Errors produced when a configuration table fails schema validation.
#[derive(Debug, Error)]
pub enum ValidationError {
	#[error("Expected a table")]
	NotATable,
	#[error("Missing required field: {0}")]
	MissingField(String),
	#[error("Field '{field}' has wrong type, expected {expected}")]
	WrongType { field: String, expected: String },
	#[error("Field '{field}' is invalid: {reason}")]
	InvalidValue { field: String, reason: String },
}

/// Expected type of a configuration field.
#[derive(Debug, Clone)]
pub enum FieldType {
	String,
	Boolean,
	Integer { min: Option<i64>, max: Option<i64> },
	Table,
}

impl FieldType {
	fn name(&self) -> &'static str {
		match self {
			FieldType::String => "string",
			FieldType::Boolean => "boolean",
			FieldType::Integer { .. } => "integer",
			FieldType::Table => "table",
		}
	}
}

/// A named configuration field with its expected type.
#[derive(Debug, Clone)]
pub struct Field {
	pub name: String,
	pub field_type: FieldType,
}

impl Field {
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		Self {
			name: name.into(),
			field_type,
		}
	}

	fn check(&self, value: &toml::Value) -> Result<(), ValidationError> {
		let ok = match &self.field_type {
			FieldType::String => value.is_str(),
			FieldType::Boolean => value.is_bool(),
			FieldType::Integer { min, max } => match value.as_integer() {
				Some(v) => {
					if min.is_some_and(|m| v < m) || max.is_some_and(|m| v > m) {
						return Err(ValidationError::InvalidValue {
							field: self.name.clone(),
							reason: format!("{} out of range", v),
						});
					}
					true
				},
				None => false,
			},
			FieldType::Table => value.is_table(),
		};

		if ok {
			Ok(())
		} else {
			Err(ValidationError::WrongType {
				field: self.name.clone(),
				expected: self.field_type.name().to_string(),
			})
		}
	}
}

/// A configuration schema of required and optional fields.
#[derive(Debug, Clone)]
pub struct Schema {
	required: Vec<Field>,
	optional: Vec<Field>,
}

impl Schema {
	pub fn new(required: Vec<Field>, optional: Vec<Field>) -> Self {
		Self { required, optional }
	}

	/// Validates a raw TOML value against this schema.
	pub fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let table = config.as_table().ok_or(ValidationError::NotATable)?;

		for field in &self.required {
			match table.get(&field.name) {
				Some(value) => field.check(value)?,
				None => return Err(ValidationError::MissingField(field.name.clone())),
			}
		}

		for field in &self.optional {
			if let Some(value) = table.get(&field.name) {
				field.check(value)?;
			}
		}

		Ok(())
	}
}

/// Trait implemented by components that validate their own configuration.
pub trait ConfigSchema: Send + Sync {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn required_field_is_enforced() {
		let schema = Schema::new(vec![Field::new("path", FieldType::String)], vec![]);

		let missing: toml::Value = toml::from_str("other = 1").unwrap();
		assert!(matches!(
			schema.validate(&missing),
			Err(ValidationError::MissingField(_))
		));

		let present: toml::Value = toml::from_str("path = \"./data\"").unwrap();
		assert!(schema.validate(&present).is_ok());
	}

	#[test]
	fn integer_bounds_are_enforced() {
		let schema = Schema::new(
			vec![],
			vec![Field::new(
				"interval",
				FieldType::Integer {
					min: Some(1),
					max: Some(3600),
				},
			)],
		);

		let too_small: toml::Value = toml::from_str("interval = 0").unwrap();
		assert!(schema.validate(&too_small).is_err());

		let in_range: toml::Value = toml::from_str("interval = 60").unwrap();
		assert!(schema.validate(&in_range).is_ok());
	}
}
