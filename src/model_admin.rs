//! Model admin configuration and trait
//!
//! This module defines how models are displayed and managed in the admin
//! interface: the [`ModelAdmin`] trait with defaulted presentation hooks,
//! and [`ModelAdminConfig`], a configuration-based implementation built
//! either directly or through [`ModelAdminConfigBuilder`].

use serde::{Deserialize, Serialize};

/// A named group of fields within the change form
///
/// A fieldset with `label: None` renders as the unlabeled primary group
/// at the top of the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fieldset {
	/// Heading displayed above the group, if any
	pub label: Option<String>,
	/// Field names in display order
	pub fields: Vec<String>,
}

impl Fieldset {
	/// Create a labeled fieldset
	///
	/// # Examples
	///
	/// ```
	/// use blog_admin::Fieldset;
	///
	/// let fieldset = Fieldset::new("Status", vec!["active", "deleted"]);
	/// assert_eq!(fieldset.label.as_deref(), Some("Status"));
	/// assert_eq!(fieldset.fields, vec!["active", "deleted"]);
	/// ```
	pub fn new(label: impl Into<String>, fields: Vec<impl Into<String>>) -> Self {
		Self {
			label: Some(label.into()),
			fields: fields.into_iter().map(Into::into).collect(),
		}
	}

	/// Create the unlabeled primary fieldset
	pub fn unlabeled(fields: Vec<impl Into<String>>) -> Self {
		Self {
			label: None,
			fields: fields.into_iter().map(Into::into).collect(),
		}
	}
}

/// Trait for configuring model administration
///
/// Implement this trait to customize how a model is displayed and edited
/// in the admin. Every method has a default, so an empty implementation
/// yields the default presentation: a primary-key column, no filters, no
/// search, and newest-first ordering.
pub trait ModelAdmin: Send + Sync {
	/// Get the model name
	fn model_name(&self) -> &str;

	/// Fields to display as columns in the list view
	fn list_display(&self) -> Vec<&str> {
		vec!["id"]
	}

	/// Fields editable inline from the list view
	///
	/// Must be a subset of `list_display`, excluding the first column
	/// (which links to the change form).
	fn list_editable(&self) -> Vec<&str> {
		vec![]
	}

	/// Fields that can be used for filtering
	fn list_filter(&self) -> Vec<&str> {
		vec![]
	}

	/// Fields covered by free-text search
	fn search_fields(&self) -> Vec<&str> {
		vec![]
	}

	/// Fields to display in forms (None = all fields)
	fn fields(&self) -> Option<Vec<&str>> {
		None
	}

	/// Read-only fields: displayed in the form but never editable
	fn readonly_fields(&self) -> Vec<&str> {
		vec![]
	}

	/// To-many relation fields rendered with the dual-list selector
	/// instead of the default multi-select
	fn filter_horizontal(&self) -> Vec<&str> {
		vec![]
	}

	/// Ordering for list view (prefix with "-" for descending)
	fn ordering(&self) -> Vec<&str> {
		vec!["-id"]
	}

	/// Number of items per page (None = use site default)
	fn list_per_page(&self) -> Option<usize> {
		None
	}

	/// Grouped form layout (empty = single implicit group of all fields)
	fn fieldsets(&self) -> Vec<Fieldset> {
		vec![]
	}
}

/// Configuration-based model admin implementation
///
/// Provides a simple way to configure model admin without implementing
/// the trait.
///
/// # Examples
///
/// ```
/// use blog_admin::{ModelAdmin, ModelAdminConfig};
///
/// let admin = ModelAdminConfig::builder()
///     .model_name("Author")
///     .list_display(vec!["id", "name", "email"])
///     .search_fields(vec!["name", "email"])
///     .build();
///
/// assert_eq!(admin.model_name(), "Author");
/// assert_eq!(admin.search_fields(), vec!["name", "email"]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelAdminConfig {
	model_name: String,
	list_display: Vec<String>,
	list_editable: Vec<String>,
	list_filter: Vec<String>,
	search_fields: Vec<String>,
	fields: Option<Vec<String>>,
	readonly_fields: Vec<String>,
	filter_horizontal: Vec<String>,
	ordering: Vec<String>,
	list_per_page: Option<usize>,
	fieldsets: Vec<Fieldset>,
}

impl ModelAdminConfig {
	/// Create a new model admin configuration with default presentation
	///
	/// # Examples
	///
	/// ```
	/// use blog_admin::{ModelAdmin, ModelAdminConfig};
	///
	/// let admin = ModelAdminConfig::new("BannerImage");
	/// assert_eq!(admin.model_name(), "BannerImage");
	/// assert_eq!(admin.list_display(), vec!["id"]);
	/// ```
	pub fn new(model_name: impl Into<String>) -> Self {
		Self {
			model_name: model_name.into(),
			list_display: vec!["id".into()],
			list_editable: vec![],
			list_filter: vec![],
			search_fields: vec![],
			fields: None,
			readonly_fields: vec![],
			filter_horizontal: vec![],
			ordering: vec!["-id".into()],
			list_per_page: None,
			fieldsets: vec![],
		}
	}

	/// Start building a model admin configuration
	pub fn builder() -> ModelAdminConfigBuilder {
		ModelAdminConfigBuilder::default()
	}

	/// Set list display fields
	pub fn with_list_display(mut self, fields: Vec<impl Into<String>>) -> Self {
		self.list_display = fields.into_iter().map(Into::into).collect();
		self
	}

	/// Set list filter fields
	pub fn with_list_filter(mut self, fields: Vec<impl Into<String>>) -> Self {
		self.list_filter = fields.into_iter().map(Into::into).collect();
		self
	}

	/// Set search fields
	pub fn with_search_fields(mut self, fields: Vec<impl Into<String>>) -> Self {
		self.search_fields = fields.into_iter().map(Into::into).collect();
		self
	}
}

impl ModelAdmin for ModelAdminConfig {
	fn model_name(&self) -> &str {
		&self.model_name
	}

	fn list_display(&self) -> Vec<&str> {
		self.list_display.iter().map(|s| s.as_str()).collect()
	}

	fn list_editable(&self) -> Vec<&str> {
		self.list_editable.iter().map(|s| s.as_str()).collect()
	}

	fn list_filter(&self) -> Vec<&str> {
		self.list_filter.iter().map(|s| s.as_str()).collect()
	}

	fn search_fields(&self) -> Vec<&str> {
		self.search_fields.iter().map(|s| s.as_str()).collect()
	}

	fn fields(&self) -> Option<Vec<&str>> {
		self.fields
			.as_ref()
			.map(|f| f.iter().map(|s| s.as_str()).collect())
	}

	fn readonly_fields(&self) -> Vec<&str> {
		self.readonly_fields.iter().map(|s| s.as_str()).collect()
	}

	fn filter_horizontal(&self) -> Vec<&str> {
		self.filter_horizontal.iter().map(|s| s.as_str()).collect()
	}

	fn ordering(&self) -> Vec<&str> {
		self.ordering.iter().map(|s| s.as_str()).collect()
	}

	fn list_per_page(&self) -> Option<usize> {
		self.list_per_page
	}

	fn fieldsets(&self) -> Vec<Fieldset> {
		self.fieldsets.clone()
	}
}

/// Builder for ModelAdminConfig
#[derive(Debug, Default)]
pub struct ModelAdminConfigBuilder {
	model_name: Option<String>,
	list_display: Option<Vec<String>>,
	list_editable: Option<Vec<String>>,
	list_filter: Option<Vec<String>>,
	search_fields: Option<Vec<String>>,
	fields: Option<Vec<String>>,
	readonly_fields: Option<Vec<String>>,
	filter_horizontal: Option<Vec<String>>,
	ordering: Option<Vec<String>>,
	list_per_page: Option<usize>,
	fieldsets: Option<Vec<Fieldset>>,
}

impl ModelAdminConfigBuilder {
	/// Set the model name
	pub fn model_name(mut self, name: impl Into<String>) -> Self {
		self.model_name = Some(name.into());
		self
	}

	/// Set list display fields
	pub fn list_display(mut self, fields: Vec<impl Into<String>>) -> Self {
		self.list_display = Some(fields.into_iter().map(Into::into).collect());
		self
	}

	/// Set fields editable inline from the list view
	pub fn list_editable(mut self, fields: Vec<impl Into<String>>) -> Self {
		self.list_editable = Some(fields.into_iter().map(Into::into).collect());
		self
	}

	/// Set list filter fields
	pub fn list_filter(mut self, fields: Vec<impl Into<String>>) -> Self {
		self.list_filter = Some(fields.into_iter().map(Into::into).collect());
		self
	}

	/// Set search fields
	pub fn search_fields(mut self, fields: Vec<impl Into<String>>) -> Self {
		self.search_fields = Some(fields.into_iter().map(Into::into).collect());
		self
	}

	/// Set form fields
	pub fn fields(mut self, fields: Vec<impl Into<String>>) -> Self {
		self.fields = Some(fields.into_iter().map(Into::into).collect());
		self
	}

	/// Set readonly fields
	pub fn readonly_fields(mut self, fields: Vec<impl Into<String>>) -> Self {
		self.readonly_fields = Some(fields.into_iter().map(Into::into).collect());
		self
	}

	/// Set relation fields that use the dual-list selector
	pub fn filter_horizontal(mut self, fields: Vec<impl Into<String>>) -> Self {
		self.filter_horizontal = Some(fields.into_iter().map(Into::into).collect());
		self
	}

	/// Set ordering
	pub fn ordering(mut self, fields: Vec<impl Into<String>>) -> Self {
		self.ordering = Some(fields.into_iter().map(Into::into).collect());
		self
	}

	/// Set items per page
	pub fn list_per_page(mut self, count: usize) -> Self {
		self.list_per_page = Some(count);
		self
	}

	/// Set the grouped form layout
	pub fn fieldsets(mut self, fieldsets: Vec<Fieldset>) -> Self {
		self.fieldsets = Some(fieldsets);
		self
	}

	/// Build the configuration
	///
	/// # Panics
	///
	/// Panics if model_name is not set
	pub fn build(self) -> ModelAdminConfig {
		ModelAdminConfig {
			model_name: self.model_name.expect("model_name is required"),
			list_display: self.list_display.unwrap_or_else(|| vec!["id".into()]),
			list_editable: self.list_editable.unwrap_or_default(),
			list_filter: self.list_filter.unwrap_or_default(),
			search_fields: self.search_fields.unwrap_or_default(),
			fields: self.fields,
			readonly_fields: self.readonly_fields.unwrap_or_default(),
			filter_horizontal: self.filter_horizontal.unwrap_or_default(),
			ordering: self.ordering.unwrap_or_else(|| vec!["-id".into()]),
			list_per_page: self.list_per_page,
			fieldsets: self.fieldsets.unwrap_or_default(),
		}
	}
}
