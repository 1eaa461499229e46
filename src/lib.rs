//! # blog-admin
//!
//! Django-style declarative admin registration for blog content.
//!
//! Models are registered with an [`AdminSite`] together with a
//! [`ModelAdminConfig`] describing their presentation: list columns,
//! inline-editable columns, filters, search fields, form layout, and
//! widgets. The configuration is validated against the model's metadata
//! at registration time, so a typo in a field name is a startup failure
//! rather than a broken page later.
//!
//! The generic core — [`ChangeList`] for the tabular list view and
//! [`AdminForm`] for the change form — applies a registered
//! configuration to records, which the admin layer sees as JSON objects
//! ([`AdminRecord`]). Storage, routing, authentication, and rendering
//! stay with the surrounding application.
//!
//! ## Quick Start
//!
//! ```
//! use blog_admin::apps::blog;
//! use blog_admin::{AdminRecord, AdminSite, ChangeList, ListQuery};
//! use serde_json::json;
//!
//! let site = AdminSite::new("Blog administration");
//! blog::register_admins(&site).unwrap();
//!
//! let records = vec![
//!     AdminRecord::from_value(json!({
//!         "id": 1,
//!         "title": "Spring garden notes",
//!         "text": "Perennials worth planting early.",
//!         "active": true,
//!         "deleted": false,
//!     }))
//!     .unwrap(),
//! ];
//!
//! let changelist = ChangeList::new(&site, "BlogPost").unwrap();
//! let query = ListQuery::default().with_search("garden");
//! let page = changelist.rows(&records, &query).unwrap();
//! assert_eq!(page.count, 1);
//! ```
//!
//! ## Registration
//!
//! Custom presentation is configured through the builder:
//!
//! ```
//! use blog_admin::{Fieldset, ModelAdminConfig};
//!
//! let admin = ModelAdminConfig::builder()
//!     .model_name("BlogPost")
//!     .list_display(vec!["title", "create_date", "active"])
//!     .search_fields(vec!["title", "text"])
//!     .ordering(vec!["title"])
//!     .fieldsets(vec![
//!         Fieldset::unlabeled(vec!["title", "text"]),
//!         Fieldset::new("Status", vec!["active"]),
//!     ])
//!     .build();
//! # let _ = admin;
//! ```

pub mod apps;
pub mod changelist;
pub mod error;
pub mod filters;
pub mod forms;
pub mod metadata;
pub mod model_admin;
pub mod site;

pub use changelist::{
	AdminRecord, ChangeList, ColumnInfo, DEFAULT_PAGE_SIZE, ListQuery, MAX_PAGE_SIZE, Page,
};
pub use error::{AdminError, AdminResult};
pub use filters::{BooleanFilter, ChoiceFilter, DateRangeFilter, FilterSpec, ListFilter};
pub use forms::{AdminForm, FieldType, FormField, FormFieldset};
pub use metadata::{FieldKind, FieldMeta, ModelMeta, humanize_field_name};
pub use model_admin::{Fieldset, ModelAdmin, ModelAdminConfig, ModelAdminConfigBuilder};
pub use site::{AdminSite, ModelEntry, SiteSettings, site};
