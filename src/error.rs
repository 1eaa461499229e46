//! Error types for the admin layer

use thiserror::Error;

/// Admin layer error type
///
/// Configuration errors (`AlreadyRegistered`, `UnknownField`,
/// `InvalidConfig`) are raised while registering a model and are fatal:
/// they indicate a misconfiguration that must halt startup. The remaining
/// variants are raised by the change-list and change-form operations.
#[derive(Debug, Error)]
pub enum AdminError {
	/// Model not registered with admin
	#[error("Model '{0}' is not registered with admin")]
	ModelNotRegistered(String),

	/// Model registered twice with the same site
	#[error("Model '{0}' is already registered with admin")]
	AlreadyRegistered(String),

	/// Configured field does not exist on the model
	#[error("Unknown field '{field}' on model '{model}'")]
	UnknownField { model: String, field: String },

	/// Configuration is structurally invalid
	#[error("Invalid admin config for model '{model}': {reason}")]
	InvalidConfig { model: String, reason: String },

	/// Filter request names a field outside `list_filter`
	#[error("Unknown filter field '{field}' on model '{model}'")]
	UnknownFilterField { model: String, field: String },

	/// Inline edit targets a field outside `list_editable`
	#[error("Field '{field}' on model '{model}' is not list-editable")]
	FieldNotEditable { model: String, field: String },

	/// Submitted form value could not be coerced to the field type
	#[error("Validation error: {0}")]
	ValidationError(String),
}

/// Result type for admin operations
pub type AdminResult<T> = Result<T, AdminError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_display() {
		let err = AdminError::ModelNotRegistered("BlogPost".to_string());
		assert_eq!(err.to_string(), "Model 'BlogPost' is not registered with admin");

		let err = AdminError::UnknownField {
			model: "BlogPost".to_string(),
			field: "tilte".to_string(),
		};
		assert_eq!(err.to_string(), "Unknown field 'tilte' on model 'BlogPost'");

		let err = AdminError::FieldNotEditable {
			model: "BlogPost".to_string(),
			field: "title".to_string(),
		};
		assert_eq!(
			err.to_string(),
			"Field 'title' on model 'BlogPost' is not list-editable"
		);
	}
}
