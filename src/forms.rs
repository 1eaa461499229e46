//! Change form generation for admin views
//!
//! An [`AdminForm`] is built from a registered model's metadata and admin
//! configuration: fields are grouped into the configured fieldsets (or a
//! single implicit group), each with a widget inferred from its storage
//! kind. Read-only fields are rendered but never written back:
//! [`AdminForm::bind`] skips them regardless of what was submitted.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::changelist::AdminRecord;
use crate::error::{AdminError, AdminResult};
use crate::metadata::FieldKind;
use crate::model_admin::ModelAdmin;
use crate::site::ModelEntry;

/// Form field widget types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldType {
	/// Text input
	Text,
	/// Textarea for long text
	TextArea,
	/// Number input
	Number,
	/// Boolean checkbox
	Boolean,
	/// Email input
	Email,
	/// URL input
	Url,
	/// Date input
	Date,
	/// DateTime input
	DateTime,
	/// File upload
	File,
	/// Hidden field
	Hidden,
	/// Select dropdown
	Select { choices: Vec<(String, String)> },
	/// Multiple select
	MultiSelect { choices: Vec<(String, String)> },
	/// Dual-list selector for to-many relations: available values on one
	/// side, chosen values on the other
	DualList { choices: Vec<(String, String)> },
}

/// Infer the form widget from a field's storage kind
pub fn infer_field_type(kind: &FieldKind) -> FieldType {
	match kind {
		FieldKind::Auto | FieldKind::Integer | FieldKind::Float => FieldType::Number,
		FieldKind::Char { .. } => FieldType::Text,
		FieldKind::Text => FieldType::TextArea,
		FieldKind::Email => FieldType::Email,
		FieldKind::Url => FieldType::Url,
		FieldKind::File => FieldType::File,
		FieldKind::Boolean => FieldType::Boolean,
		FieldKind::Date => FieldType::Date,
		FieldKind::DateTime => FieldType::DateTime,
		FieldKind::ForeignKey { .. } => FieldType::Select { choices: vec![] },
		FieldKind::ManyToMany { .. } => FieldType::MultiSelect { choices: vec![] },
	}
}

/// Form field definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormField {
	/// Field name
	pub name: String,
	/// Field label
	pub label: String,
	/// Widget
	pub field_type: FieldType,
	/// Whether a value is required
	pub required: bool,
	/// Whether the field is rendered read-only
	pub readonly: bool,
	/// Help text
	pub help_text: Option<String>,
	/// Initial/current value
	pub value: Option<Value>,
	/// Validation errors
	pub errors: Vec<String>,
}

impl FormField {
	/// Create a new form field
	///
	/// # Examples
	///
	/// ```
	/// use blog_admin::{FieldType, FormField};
	///
	/// let field = FormField::new("website", "Website", FieldType::Url);
	/// assert_eq!(field.name, "website");
	/// assert!(!field.readonly);
	/// ```
	pub fn new(name: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
		Self {
			name: name.into(),
			label: label.into(),
			field_type,
			required: false,
			readonly: false,
			help_text: None,
			value: None,
			errors: Vec::new(),
		}
	}

	/// Mark field as required
	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	/// Mark field as readonly
	pub fn readonly(mut self) -> Self {
		self.readonly = true;
		self
	}

	/// Set help text
	pub fn with_help_text(mut self, text: impl Into<String>) -> Self {
		self.help_text = Some(text.into());
		self
	}

	/// Set field value
	pub fn with_value(mut self, value: Value) -> Self {
		self.value = Some(value);
		self
	}

	/// Add validation error
	pub fn add_error(&mut self, error: impl Into<String>) {
		self.errors.push(error.into());
	}

	/// Check if field has errors
	pub fn has_errors(&self) -> bool {
		!self.errors.is_empty()
	}
}

/// A rendered group of form fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormFieldset {
	/// Group heading; None renders the unlabeled primary group
	pub label: Option<String>,
	/// Fields in display order
	pub fields: Vec<FormField>,
}

/// Admin change form for one model
///
/// # Examples
///
/// ```
/// use blog_admin::{
///     AdminForm, AdminSite, FieldKind, FieldMeta, ModelAdminConfig, ModelMeta,
/// };
///
/// let site = AdminSite::new("Test");
/// let meta = ModelMeta::new("blog", "Author")
///     .with_field(FieldMeta::auto("id"))
///     .with_field(FieldMeta::new("name", FieldKind::Char { max_length: 100 }).required());
/// site.register(meta, ModelAdminConfig::new("Author")).unwrap();
///
/// let form = AdminForm::for_model(&site.get_model_admin("Author").unwrap());
/// assert!(form.field("name").is_some());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminForm {
	model_name: String,
	fieldsets: Vec<FormFieldset>,
}

impl AdminForm {
	/// Build the form for a registered model
	///
	/// Layout follows the admin configuration: declared fieldsets win;
	/// otherwise the flat `fields` list, if set; otherwise every model
	/// field except the auto primary key, in declaration order.
	pub fn for_model(entry: &ModelEntry) -> Self {
		let meta = &entry.meta;
		let admin = &entry.admin;
		let readonly: Vec<String> = admin
			.readonly_fields()
			.iter()
			.map(|s| s.to_string())
			.collect();
		let horizontal: Vec<String> = admin
			.filter_horizontal()
			.iter()
			.map(|s| s.to_string())
			.collect();

		let build_field = |name: &str| -> Option<FormField> {
			let field_meta = meta.field(name)?;
			let field_type = match infer_field_type(&field_meta.kind) {
				FieldType::MultiSelect { choices } if horizontal.iter().any(|f| f == name) => {
					FieldType::DualList { choices }
				}
				other => other,
			};
			let is_readonly = readonly.iter().any(|f| f == name);
			let mut field = FormField::new(name, field_meta.verbose_name(), field_type);
			if field_meta.required && !is_readonly {
				field = field.required();
			}
			if is_readonly {
				field = field.readonly();
			}
			Some(field)
		};

		let configured = admin.fieldsets();
		let fieldsets: Vec<FormFieldset> = if configured.is_empty() {
			let names: Vec<String> = match admin.fields() {
				Some(fields) => fields.iter().map(|s| s.to_string()).collect(),
				None => meta
					.fields
					.iter()
					.filter(|f| f.kind != FieldKind::Auto)
					.map(|f| f.name.clone())
					.collect(),
			};
			vec![FormFieldset {
				label: None,
				fields: names.iter().filter_map(|n| build_field(n)).collect(),
			}]
		} else {
			configured
				.into_iter()
				.map(|fieldset| FormFieldset {
					label: fieldset.label,
					fields: fieldset
						.fields
						.iter()
						.filter_map(|n| build_field(n))
						.collect(),
				})
				.collect()
		};

		Self {
			model_name: meta.model_name.clone(),
			fieldsets,
		}
	}

	/// Model name
	pub fn model_name(&self) -> &str {
		&self.model_name
	}

	/// Fieldsets in display order
	pub fn fieldsets(&self) -> &[FormFieldset] {
		&self.fieldsets
	}

	/// Total number of fields across all fieldsets
	pub fn field_count(&self) -> usize {
		self.fieldsets.iter().map(|fs| fs.fields.len()).sum()
	}

	/// Look up a field by name
	pub fn field(&self, name: &str) -> Option<&FormField> {
		self.fieldsets
			.iter()
			.flat_map(|fs| fs.fields.iter())
			.find(|f| f.name == name)
	}

	/// Populate choice widgets for a relation field
	pub fn set_choices(&mut self, name: &str, new_choices: Vec<(String, String)>) {
		let field = self
			.fieldsets
			.iter_mut()
			.flat_map(|fs| fs.fields.iter_mut())
			.find(|f| f.name == name);
		if let Some(field) = field {
			match &mut field.field_type {
				FieldType::Select { choices }
				| FieldType::MultiSelect { choices }
				| FieldType::DualList { choices } => *choices = new_choices,
				_ => {}
			}
		}
	}

	/// Fill field values from a record
	pub fn populate(&mut self, record: &AdminRecord) {
		for fieldset in &mut self.fieldsets {
			for field in &mut fieldset.fields {
				field.value = record.get(&field.name).cloned();
			}
		}
	}

	/// Merge submitted data into a record
	///
	/// Submitted values are coerced against each field's widget type.
	/// Read-only fields are skipped entirely, so a submission cannot
	/// change them; keys that do not correspond to a form field are
	/// ignored.
	pub fn bind(
		&self,
		record: &AdminRecord,
		data: &HashMap<String, Value>,
	) -> AdminResult<AdminRecord> {
		let mut updated = record.clone();
		for fieldset in &self.fieldsets {
			for field in &fieldset.fields {
				if field.readonly {
					continue;
				}
				let Some(value) = data.get(&field.name) else {
					continue;
				};
				let coerced = coerce_value(field, value)?;
				updated.set(field.name.clone(), coerced);
			}
		}
		Ok(updated)
	}
}

/// Coerce a submitted value to the field's widget type
fn coerce_value(field: &FormField, value: &Value) -> AdminResult<Value> {
	let invalid = |expected: &str| {
		AdminError::ValidationError(format!(
			"field '{}' expects {expected}, got {value}",
			field.name
		))
	};

	if value.is_null() {
		if field.required {
			return Err(AdminError::ValidationError(format!(
				"field '{}' is required",
				field.name
			)));
		}
		return Ok(Value::Null);
	}

	match &field.field_type {
		FieldType::Text | FieldType::TextArea | FieldType::Email | FieldType::File => {
			let s = value.as_str().ok_or_else(|| invalid("a string"))?;
			if field.required && s.trim().is_empty() {
				return Err(AdminError::ValidationError(format!(
					"field '{}' is required",
					field.name
				)));
			}
			Ok(Value::String(s.to_string()))
		}
		FieldType::Url => {
			let s = value.as_str().ok_or_else(|| invalid("a URL string"))?;
			if !s.is_empty() && !s.starts_with("http://") && !s.starts_with("https://") {
				return Err(invalid("an http(s) URL"));
			}
			Ok(Value::String(s.to_string()))
		}
		FieldType::Number => match value {
			Value::Number(_) => Ok(value.clone()),
			Value::String(s) => {
				let parsed: f64 = s.parse().map_err(|_| invalid("a number"))?;
				serde_json::Number::from_f64(parsed)
					.map(Value::Number)
					.ok_or_else(|| invalid("a finite number"))
			}
			_ => Err(invalid("a number")),
		},
		FieldType::Boolean => match value {
			Value::Bool(_) => Ok(value.clone()),
			Value::String(s) => match s.as_str() {
				"true" | "on" | "1" => Ok(Value::Bool(true)),
				"false" | "off" | "0" | "" => Ok(Value::Bool(false)),
				_ => Err(invalid("a boolean")),
			},
			_ => Err(invalid("a boolean")),
		},
		FieldType::Date => {
			let s = value.as_str().ok_or_else(|| invalid("a date string"))?;
			s.parse::<chrono::NaiveDate>()
				.map_err(|_| invalid("an ISO date"))?;
			Ok(Value::String(s.to_string()))
		}
		FieldType::DateTime => {
			let s = value.as_str().ok_or_else(|| invalid("a datetime string"))?;
			chrono::DateTime::parse_from_rfc3339(s)
				.map_err(|_| invalid("an RFC 3339 datetime"))?;
			Ok(Value::String(s.to_string()))
		}
		FieldType::Hidden | FieldType::Select { .. } => Ok(value.clone()),
		FieldType::MultiSelect { .. } | FieldType::DualList { .. } => {
			if value.is_array() {
				Ok(value.clone())
			} else {
				Err(invalid("an array of selected values"))
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::metadata::{FieldMeta, ModelMeta};
	use crate::model_admin::{Fieldset, ModelAdminConfig};
	use crate::site::AdminSite;
	use serde_json::json;

	fn entry() -> std::sync::Arc<ModelEntry> {
		let site = AdminSite::new("Test");
		let meta = ModelMeta::new("blog", "Post")
			.with_field(FieldMeta::auto("id"))
			.with_field(FieldMeta::new("title", FieldKind::Char { max_length: 200 }).required())
			.with_field(FieldMeta::new("body", FieldKind::Text))
			.with_field(FieldMeta::new(
				"tags",
				FieldKind::ManyToMany {
					to: "Tag".to_string(),
				},
			))
			.with_field(FieldMeta::new("published_on", FieldKind::DateTime));
		let admin = ModelAdminConfig::builder()
			.model_name("Post")
			.filter_horizontal(vec!["tags"])
			.readonly_fields(vec!["published_on"])
			.fieldsets(vec![
				Fieldset::unlabeled(vec!["title", "body", "tags"]),
				Fieldset::new("Publication", vec!["published_on"]),
			])
			.build();
		site.register(meta, admin).unwrap();
		site.get_model_admin("Post").unwrap()
	}

	#[test]
	fn test_fieldset_layout() {
		let form = AdminForm::for_model(&entry());

		assert_eq!(form.fieldsets().len(), 2);
		assert_eq!(form.fieldsets()[0].label, None);
		assert_eq!(form.fieldsets()[1].label.as_deref(), Some("Publication"));
		assert_eq!(form.field_count(), 4);

		let names: Vec<&str> = form.fieldsets()[0]
			.fields
			.iter()
			.map(|f| f.name.as_str())
			.collect();
		assert_eq!(names, vec!["title", "body", "tags"]);
	}

	#[test]
	fn test_widget_inference_and_dual_list() {
		let form = AdminForm::for_model(&entry());

		assert_eq!(form.field("title").unwrap().field_type, FieldType::Text);
		assert_eq!(form.field("body").unwrap().field_type, FieldType::TextArea);
		assert!(matches!(
			form.field("tags").unwrap().field_type,
			FieldType::DualList { .. }
		));
	}

	#[test]
	fn test_readonly_field_is_marked() {
		let form = AdminForm::for_model(&entry());
		let field = form.field("published_on").unwrap();
		assert!(field.readonly);
		assert!(!field.required);
	}

	#[test]
	fn test_default_layout_without_fieldsets() {
		let site = AdminSite::new("Test");
		let meta = ModelMeta::new("blog", "Author")
			.with_field(FieldMeta::auto("id"))
			.with_field(FieldMeta::new("name", FieldKind::Char { max_length: 100 }).required());
		site.register(meta, ModelAdminConfig::new("Author")).unwrap();
		let form = AdminForm::for_model(&site.get_model_admin("Author").unwrap());

		// One implicit group, pk excluded
		assert_eq!(form.fieldsets().len(), 1);
		assert_eq!(form.field_count(), 1);
		assert!(form.field("id").is_none());
	}

	#[test]
	fn test_bind_skips_readonly_fields() {
		let form = AdminForm::for_model(&entry());
		let record = AdminRecord::from_value(json!({
			"title": "Original",
			"published_on": "2026-01-01T00:00:00Z",
		}))
		.unwrap();

		let mut data = HashMap::new();
		data.insert("title".to_string(), json!("Updated"));
		data.insert("published_on".to_string(), json!("2030-12-31T23:59:59Z"));

		let updated = form.bind(&record, &data).unwrap();
		assert_eq!(updated.get("title"), Some(&json!("Updated")));
		// Submitted value for the readonly field had no effect
		assert_eq!(
			updated.get("published_on"),
			Some(&json!("2026-01-01T00:00:00Z"))
		);
	}

	#[test]
	fn test_bind_ignores_unknown_keys() {
		let form = AdminForm::for_model(&entry());
		let record = AdminRecord::from_value(json!({"title": "Original"})).unwrap();

		let mut data = HashMap::new();
		data.insert("no_such_field".to_string(), json!("x"));

		let updated = form.bind(&record, &data).unwrap();
		assert_eq!(updated.get("no_such_field"), None);
	}

	#[test]
	fn test_bind_coerces_and_validates() {
		let form = AdminForm::for_model(&entry());
		let record = AdminRecord::new();

		let mut data = HashMap::new();
		data.insert("title".to_string(), json!(""));
		let err = form.bind(&record, &data).unwrap_err();
		assert!(matches!(err, AdminError::ValidationError(msg) if msg.contains("required")));

		let mut data = HashMap::new();
		data.insert("tags".to_string(), json!("not-an-array"));
		let err = form.bind(&record, &data).unwrap_err();
		assert!(matches!(err, AdminError::ValidationError(_)));

		let mut data = HashMap::new();
		data.insert("tags".to_string(), json!([1, 2]));
		let updated = form.bind(&record, &data).unwrap();
		assert_eq!(updated.get("tags"), Some(&json!([1, 2])));
	}

	#[test]
	fn test_populate_and_choices() {
		let mut form = AdminForm::for_model(&entry());
		let record = AdminRecord::from_value(json!({"title": "Hello"})).unwrap();
		form.populate(&record);
		assert_eq!(form.field("title").unwrap().value, Some(json!("Hello")));

		form.set_choices(
			"tags",
			vec![("1".to_string(), "rust".to_string())],
		);
		match &form.field("tags").unwrap().field_type {
			FieldType::DualList { choices } => assert_eq!(choices.len(), 1),
			other => panic!("expected dual list, got {other:?}"),
		}
	}

	#[test]
	fn test_datetime_validation() {
		let field = FormField::new("published_on", "Published on", FieldType::DateTime);
		assert!(coerce_value(&field, &json!("2026-06-01T10:00:00Z")).is_ok());
		assert!(coerce_value(&field, &json!("tomorrow")).is_err());

		let field = FormField::new("day", "Day", FieldType::Date);
		assert!(coerce_value(&field, &json!("2026-06-01")).is_ok());
		assert!(coerce_value(&field, &json!("06/01/2026")).is_err());
	}
}
