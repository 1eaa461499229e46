//! Admin site registry
//!
//! An [`AdminSite`] maps model names to their metadata and presentation
//! configuration. Registration is a one-time, process-startup concern:
//! every field name a configuration references is validated against the
//! model's metadata at `register` time, and any mismatch is returned as a
//! fatal configuration error rather than surfacing later per request.
//!
//! A process-wide default site is available through [`site()`], mirroring
//! the singleton registry the generated admin UI is built from.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::changelist::DEFAULT_PAGE_SIZE;
use crate::error::{AdminError, AdminResult};
use crate::metadata::ModelMeta;
use crate::model_admin::{ModelAdmin, ModelAdminConfig};

/// Site-level presentation settings
///
/// Deserializable so deployments can keep the admin banner and paging
/// defaults in their settings file.
///
/// # Examples
///
/// ```
/// use blog_admin::SiteSettings;
///
/// let settings: SiteSettings = toml::from_str(
///     r#"
///     title = "Blog administration"
///     list_per_page = 50
///     "#,
/// )
/// .unwrap();
/// assert_eq!(settings.title, "Blog administration");
/// assert_eq!(settings.list_per_page, 50);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
	/// Title shown in the browser tab and page heading
	pub title: String,
	/// Optional banner text above the index page
	pub header: Option<String>,
	/// Default page size for change lists that do not set their own
	pub list_per_page: usize,
}

impl Default for SiteSettings {
	fn default() -> Self {
		Self {
			title: "Administration".to_string(),
			header: None,
			list_per_page: DEFAULT_PAGE_SIZE as usize,
		}
	}
}

/// A model registered with a site: its metadata plus admin configuration
pub struct ModelEntry {
	/// Schema surface of the model
	pub meta: ModelMeta,
	/// Presentation configuration
	pub admin: Arc<dyn ModelAdmin>,
}

/// Registry of models manageable through the admin
///
/// # Examples
///
/// ```
/// use blog_admin::{AdminSite, FieldKind, FieldMeta, ModelAdminConfig, ModelMeta};
///
/// let site = AdminSite::new("Blog administration");
/// let meta = ModelMeta::new("blog", "Author")
///     .with_field(FieldMeta::auto("id"))
///     .with_field(FieldMeta::new("name", FieldKind::Char { max_length: 100 }));
///
/// site.register(meta, ModelAdminConfig::new("Author")).unwrap();
/// assert!(site.is_registered("Author"));
/// ```
pub struct AdminSite {
	settings: SiteSettings,
	models: RwLock<HashMap<String, Arc<ModelEntry>>>,
}

impl AdminSite {
	/// Create a site with the given title and default settings
	pub fn new(title: impl Into<String>) -> Self {
		Self {
			settings: SiteSettings {
				title: title.into(),
				..SiteSettings::default()
			},
			models: RwLock::new(HashMap::new()),
		}
	}

	/// Create a site from deserialized settings
	pub fn with_settings(settings: SiteSettings) -> Self {
		Self {
			settings,
			models: RwLock::new(HashMap::new()),
		}
	}

	/// Site title
	pub fn title(&self) -> &str {
		&self.settings.title
	}

	/// Optional site banner
	pub fn header(&self) -> Option<&str> {
		self.settings.header.as_deref()
	}

	/// Default page size for change lists
	pub fn list_per_page(&self) -> usize {
		self.settings.list_per_page
	}

	/// Register a model with a custom admin configuration
	///
	/// Every field the configuration references is checked against
	/// `meta`; the first mismatch aborts registration. Registering the
	/// same model name twice is an error.
	pub fn register(
		&self,
		meta: ModelMeta,
		admin: impl ModelAdmin + 'static,
	) -> AdminResult<()> {
		validate_config(&meta, &admin)?;

		let name = meta.model_name.clone();
		let mut models = self.models.write();
		if models.contains_key(&name) {
			return Err(AdminError::AlreadyRegistered(name));
		}
		debug!(model = %name, app = %meta.app_label, "registered model with admin site");
		models.insert(
			name,
			Arc::new(ModelEntry {
				meta,
				admin: Arc::new(admin),
			}),
		);
		Ok(())
	}

	/// Register a model with the default presentation
	///
	/// The list view shows the primary key column only, with no filters,
	/// search, or custom form layout.
	pub fn register_default(&self, meta: ModelMeta) -> AdminResult<()> {
		let pk = meta.pk_field().to_string();
		let admin = ModelAdminConfig::builder()
			.model_name(meta.model_name.clone())
			.list_display(vec![pk.clone()])
			.ordering(vec![format!("-{pk}")])
			.build();
		self.register(meta, admin)
	}

	/// Remove a model from the site
	pub fn unregister(&self, model_name: &str) -> AdminResult<()> {
		let mut models = self.models.write();
		if models.remove(model_name).is_none() {
			warn!(model = %model_name, "attempted to unregister unknown model");
			return Err(AdminError::ModelNotRegistered(model_name.to_string()));
		}
		debug!(model = %model_name, "unregistered model from admin site");
		Ok(())
	}

	/// Whether a model is registered
	pub fn is_registered(&self, model_name: &str) -> bool {
		self.models.read().contains_key(model_name)
	}

	/// Registered model names, sorted
	pub fn model_names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.models.read().keys().cloned().collect();
		names.sort();
		names
	}

	/// Number of registered models
	pub fn len(&self) -> usize {
		self.models.read().len()
	}

	/// Whether no models are registered
	pub fn is_empty(&self) -> bool {
		self.models.read().is_empty()
	}

	/// Look up a registered model
	pub fn get_model_admin(&self, model_name: &str) -> AdminResult<Arc<ModelEntry>> {
		self.models
			.read()
			.get(model_name)
			.cloned()
			.ok_or_else(|| AdminError::ModelNotRegistered(model_name.to_string()))
	}
}

impl Default for AdminSite {
	fn default() -> Self {
		Self::with_settings(SiteSettings::default())
	}
}

static DEFAULT_SITE: Lazy<AdminSite> = Lazy::new(AdminSite::default);

/// The process-wide default admin site
pub fn site() -> &'static AdminSite {
	&DEFAULT_SITE
}

/// Check a configuration against the model's metadata
///
/// All checks are structural; nothing here touches data. Failures are
/// configuration errors that should halt startup.
fn validate_config(meta: &ModelMeta, admin: &dyn ModelAdmin) -> AdminResult<()> {
	let model = &meta.model_name;

	if admin.model_name() != model {
		return Err(AdminError::InvalidConfig {
			model: model.clone(),
			reason: format!(
				"config is for model '{}', registered as '{}'",
				admin.model_name(),
				model
			),
		});
	}

	let unknown_field = |field: &str| AdminError::UnknownField {
		model: model.clone(),
		field: field.to_string(),
	};

	let list_display = admin.list_display();
	for field in &list_display {
		let field_meta = meta.field(field).ok_or_else(|| unknown_field(field))?;
		if field_meta.kind.is_many_to_many() {
			return Err(AdminError::InvalidConfig {
				model: model.clone(),
				reason: format!("list_display field '{field}' is a to-many relation"),
			});
		}
	}

	for field in admin.list_editable() {
		if !list_display.contains(&field) {
			return Err(AdminError::InvalidConfig {
				model: model.clone(),
				reason: format!("list_editable field '{field}' is not in list_display"),
			});
		}
		if list_display.first() == Some(&field) {
			return Err(AdminError::InvalidConfig {
				model: model.clone(),
				reason: format!(
					"list_editable field '{field}' is the first list_display column, which links to the change form"
				),
			});
		}
	}

	for field in admin.list_filter() {
		if !meta.has_field(field) {
			return Err(unknown_field(field));
		}
	}

	for field in admin.search_fields() {
		if !meta.has_field(field) {
			return Err(unknown_field(field));
		}
	}

	for field in admin.readonly_fields() {
		if !meta.has_field(field) {
			return Err(unknown_field(field));
		}
	}

	for field in admin.filter_horizontal() {
		let field_meta = meta.field(field).ok_or_else(|| unknown_field(field))?;
		if !field_meta.kind.is_many_to_many() {
			return Err(AdminError::InvalidConfig {
				model: model.clone(),
				reason: format!("filter_horizontal field '{field}' is not a to-many relation"),
			});
		}
	}

	for field in admin.ordering() {
		let name = field.strip_prefix('-').unwrap_or(field);
		if !meta.has_field(name) {
			return Err(unknown_field(name));
		}
	}

	if let Some(fields) = admin.fields() {
		for field in fields {
			if !meta.has_field(field) {
				return Err(unknown_field(field));
			}
		}
	}

	let mut seen = Vec::new();
	for fieldset in admin.fieldsets() {
		for field in &fieldset.fields {
			if !meta.has_field(field) {
				return Err(unknown_field(field));
			}
			if seen.contains(field) {
				return Err(AdminError::InvalidConfig {
					model: model.clone(),
					reason: format!("field '{field}' appears in more than one fieldset"),
				});
			}
			seen.push(field.clone());
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::metadata::{FieldKind, FieldMeta};
	use crate::model_admin::Fieldset;

	fn post_meta() -> ModelMeta {
		ModelMeta::new("blog", "Post")
			.with_field(FieldMeta::auto("id"))
			.with_field(FieldMeta::new("title", FieldKind::Char { max_length: 200 }).required())
			.with_field(FieldMeta::new("active", FieldKind::Boolean))
			.with_field(FieldMeta::new(
				"tags",
				FieldKind::ManyToMany {
					to: "Tag".to_string(),
				},
			))
	}

	#[test]
	fn test_register_and_lookup() {
		let site = AdminSite::new("Test");
		site.register(post_meta(), ModelAdminConfig::new("Post")).unwrap();

		assert!(site.is_registered("Post"));
		assert_eq!(site.len(), 1);
		let entry = site.get_model_admin("Post").unwrap();
		assert_eq!(entry.meta.qualified_name(), "blog.Post");
	}

	#[test]
	fn test_double_registration_fails() {
		let site = AdminSite::new("Test");
		site.register(post_meta(), ModelAdminConfig::new("Post")).unwrap();

		let err = site
			.register(post_meta(), ModelAdminConfig::new("Post"))
			.unwrap_err();
		assert!(matches!(err, AdminError::AlreadyRegistered(name) if name == "Post"));
	}

	#[test]
	fn test_unregister() {
		let site = AdminSite::new("Test");
		site.register(post_meta(), ModelAdminConfig::new("Post")).unwrap();
		site.unregister("Post").unwrap();

		assert!(!site.is_registered("Post"));
		assert!(matches!(
			site.unregister("Post"),
			Err(AdminError::ModelNotRegistered(_))
		));
	}

	#[test]
	fn test_unknown_list_display_field_rejected() {
		let site = AdminSite::new("Test");
		let admin = ModelAdminConfig::new("Post").with_list_display(vec!["id", "tilte"]);

		let err = site.register(post_meta(), admin).unwrap_err();
		assert!(matches!(err, AdminError::UnknownField { field, .. } if field == "tilte"));
	}

	#[test]
	fn test_many_to_many_column_rejected() {
		let site = AdminSite::new("Test");
		let admin = ModelAdminConfig::new("Post").with_list_display(vec!["id", "tags"]);

		let err = site.register(post_meta(), admin).unwrap_err();
		assert!(matches!(err, AdminError::InvalidConfig { .. }));
	}

	#[test]
	fn test_list_editable_must_be_displayed() {
		let site = AdminSite::new("Test");
		let admin = ModelAdminConfig::builder()
			.model_name("Post")
			.list_display(vec!["id", "title"])
			.list_editable(vec!["active"])
			.build();

		let err = site.register(post_meta(), admin).unwrap_err();
		assert!(matches!(err, AdminError::InvalidConfig { reason, .. }
			if reason.contains("not in list_display")));
	}

	#[test]
	fn test_list_editable_link_column_rejected() {
		let site = AdminSite::new("Test");
		let admin = ModelAdminConfig::builder()
			.model_name("Post")
			.list_display(vec!["title", "active"])
			.list_editable(vec!["title"])
			.build();

		let err = site.register(post_meta(), admin).unwrap_err();
		assert!(matches!(err, AdminError::InvalidConfig { reason, .. }
			if reason.contains("first list_display column")));
	}

	#[test]
	fn test_filter_horizontal_requires_many_to_many() {
		let site = AdminSite::new("Test");
		let admin = ModelAdminConfig::builder()
			.model_name("Post")
			.filter_horizontal(vec!["title"])
			.build();

		let err = site.register(post_meta(), admin).unwrap_err();
		assert!(matches!(err, AdminError::InvalidConfig { reason, .. }
			if reason.contains("not a to-many relation")));

		let admin = ModelAdminConfig::builder()
			.model_name("Post")
			.filter_horizontal(vec!["tags"])
			.build();
		site.register(post_meta(), admin).unwrap();
	}

	#[test]
	fn test_duplicate_fieldset_field_rejected() {
		let site = AdminSite::new("Test");
		let admin = ModelAdminConfig::builder()
			.model_name("Post")
			.fieldsets(vec![
				Fieldset::unlabeled(vec!["title"]),
				Fieldset::new("Status", vec!["active", "title"]),
			])
			.build();

		let err = site.register(post_meta(), admin).unwrap_err();
		assert!(matches!(err, AdminError::InvalidConfig { reason, .. }
			if reason.contains("more than one fieldset")));
	}

	#[test]
	fn test_config_model_name_mismatch_rejected() {
		let site = AdminSite::new("Test");
		let err = site
			.register(post_meta(), ModelAdminConfig::new("Article"))
			.unwrap_err();
		assert!(matches!(err, AdminError::InvalidConfig { .. }));
	}

	#[test]
	fn test_register_default_uses_pk_column() {
		let site = AdminSite::new("Test");
		site.register_default(post_meta()).unwrap();

		let entry = site.get_model_admin("Post").unwrap();
		assert_eq!(entry.admin.list_display(), vec!["id"]);
		assert_eq!(entry.admin.ordering(), vec!["-id"]);
	}

	#[test]
	fn test_default_site_is_shared() {
		// Use a name no other test registers on the global site.
		let meta = ModelMeta::new("site_tests", "GlobalProbe").with_field(FieldMeta::auto("id"));
		site().register_default(meta).unwrap();
		assert!(site().is_registered("GlobalProbe"));
		site().unregister("GlobalProbe").unwrap();
	}

	#[test]
	fn test_settings_defaults() {
		let settings = SiteSettings::default();
		assert_eq!(settings.title, "Administration");
		assert_eq!(settings.list_per_page, 25);

		let site = AdminSite::with_settings(SiteSettings {
			header: Some("Blog back office".to_string()),
			..SiteSettings::default()
		});
		assert_eq!(site.header(), Some("Blog back office"));
	}
}
