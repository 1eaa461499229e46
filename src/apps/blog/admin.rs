//! Admin configurations for the blog app
//!
//! `BlogPost` gets the full presentation: a five-column list with inline
//! editing of the deleted flag, filters, search over title and text, a
//! dual-list author selector, and a three-group form layout. The other
//! three models are registered with the default presentation.

use crate::error::AdminResult;
use crate::model_admin::{Fieldset, ModelAdminConfig};
use crate::site::AdminSite;

use super::models;

/// Admin configuration for the BlogPost model
pub fn blog_post_admin() -> ModelAdminConfig {
	ModelAdminConfig::builder()
		.model_name("BlogPost")
		.list_display(vec![
			"title",
			"create_date",
			"update_date",
			"active",
			"deleted",
		])
		.list_editable(vec!["deleted"])
		.list_filter(vec![
			"active",
			"deleted",
			"create_date",
			"update_date",
			"category",
		])
		.search_fields(vec!["title", "text"])
		.filter_horizontal(vec!["authors"])
		.readonly_fields(vec!["create_date", "update_date"])
		.ordering(vec!["title"])
		.fieldsets(vec![
			Fieldset::unlabeled(vec![
				"title", "text", "authors", "category", "website", "document",
			]),
			Fieldset::new("Status", vec!["active", "deleted"]),
			Fieldset::new("Timestamps", vec!["create_date", "update_date"]),
		])
		.build()
}

/// Register all blog models with a site
///
/// Any error is a misconfiguration and should halt startup.
pub fn register_admins(site: &AdminSite) -> AdminResult<()> {
	site.register_default(models::blog_post_image_meta())?;
	site.register_default(models::author_meta())?;
	site.register_default(models::banner_image_meta())?;
	site.register(models::blog_post_meta(), blog_post_admin())?;
	Ok(())
}
