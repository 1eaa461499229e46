//! Model metadata consumed by the admin layer
//!
//! The admin layer does not own any model definitions. It only needs a
//! schema surface to validate configuration against and to pick form
//! widgets from, so models are described by [`ModelMeta`]: the model and
//! app names plus a flat list of [`FieldMeta`] entries.

use serde::{Deserialize, Serialize};

/// Storage-level kind of a model field
///
/// The admin layer maps these to UI treatments: form widget, filter
/// style, and sortability. Relation kinds carry the name of the target
/// model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
	/// Auto-incrementing primary key
	Auto,
	/// Short string with a length bound
	Char { max_length: usize },
	/// Unbounded text
	Text,
	/// Email address
	Email,
	/// URL
	Url,
	/// Uploaded file path
	File,
	Integer,
	Float,
	Boolean,
	Date,
	DateTime,
	/// To-one relation to another model
	ForeignKey { to: String },
	/// To-many relation to another model
	ManyToMany { to: String },
}

impl FieldKind {
	/// Whether this field points at another model
	pub fn is_relation(&self) -> bool {
		matches!(self, FieldKind::ForeignKey { .. } | FieldKind::ManyToMany { .. })
	}

	/// Whether this field is a to-many relation
	pub fn is_many_to_many(&self) -> bool {
		matches!(self, FieldKind::ManyToMany { .. })
	}

	/// Target model name for relation kinds
	pub fn related_model(&self) -> Option<&str> {
		match self {
			FieldKind::ForeignKey { to } | FieldKind::ManyToMany { to } => Some(to),
			_ => None,
		}
	}
}

/// Metadata for a single model field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMeta {
	/// Field name as it appears in records and configuration
	pub name: String,
	/// Storage-level kind
	pub kind: FieldKind,
	/// Whether a value is required when editing
	pub required: bool,
}

impl FieldMeta {
	/// Create a new optional field
	///
	/// # Examples
	///
	/// ```
	/// use blog_admin::{FieldKind, FieldMeta};
	///
	/// let field = FieldMeta::new("title", FieldKind::Char { max_length: 200 });
	/// assert_eq!(field.name, "title");
	/// assert!(!field.required);
	/// ```
	pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
		Self {
			name: name.into(),
			kind,
			required: false,
		}
	}

	/// Create an auto primary key field
	pub fn auto(name: impl Into<String>) -> Self {
		Self::new(name, FieldKind::Auto)
	}

	/// Mark the field as required
	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	/// Human-readable label for the field
	///
	/// # Examples
	///
	/// ```
	/// use blog_admin::{FieldKind, FieldMeta};
	///
	/// let field = FieldMeta::new("create_date", FieldKind::DateTime);
	/// assert_eq!(field.verbose_name(), "Create date");
	/// ```
	pub fn verbose_name(&self) -> String {
		humanize_field_name(&self.name)
	}
}

/// Metadata for a registered model
///
/// # Examples
///
/// ```
/// use blog_admin::{FieldKind, FieldMeta, ModelMeta};
///
/// let meta = ModelMeta::new("blog", "Author")
///     .with_field(FieldMeta::auto("id"))
///     .with_field(FieldMeta::new("name", FieldKind::Char { max_length: 100 }).required());
///
/// assert_eq!(meta.qualified_name(), "blog.Author");
/// assert!(meta.has_field("name"));
/// assert_eq!(meta.pk_field(), "id");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMeta {
	/// Label of the application this model belongs to
	pub app_label: String,
	/// Model name (e.g. "BlogPost")
	pub model_name: String,
	/// Fields in declaration order
	pub fields: Vec<FieldMeta>,
}

impl ModelMeta {
	/// Create metadata with no fields
	pub fn new(app_label: impl Into<String>, model_name: impl Into<String>) -> Self {
		Self {
			app_label: app_label.into(),
			model_name: model_name.into(),
			fields: Vec::new(),
		}
	}

	/// Append a field
	pub fn with_field(mut self, field: FieldMeta) -> Self {
		self.fields.push(field);
		self
	}

	/// Fully qualified model name (app_label.model_name)
	pub fn qualified_name(&self) -> String {
		format!("{}.{}", self.app_label, self.model_name)
	}

	/// Look up a field by name
	pub fn field(&self, name: &str) -> Option<&FieldMeta> {
		self.fields.iter().find(|f| f.name == name)
	}

	/// Whether a field with this name exists
	pub fn has_field(&self, name: &str) -> bool {
		self.field(name).is_some()
	}

	/// Name of the primary key field
	///
	/// The first `Auto` field wins; models without one fall back to "id".
	pub fn pk_field(&self) -> &str {
		self.fields
			.iter()
			.find(|f| f.kind == FieldKind::Auto)
			.map(|f| f.name.as_str())
			.unwrap_or("id")
	}

	/// Names of all fields in declaration order
	pub fn field_names(&self) -> Vec<&str> {
		self.fields.iter().map(|f| f.name.as_str()).collect()
	}
}

/// Convert a field name to a display label
///
/// Underscores become spaces and the first letter is uppercased, so
/// "update_date" renders as "Update date".
pub fn humanize_field_name(name: &str) -> String {
	let spaced = name.replace('_', " ");
	let mut chars = spaced.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
		None => spaced,
	}
}
