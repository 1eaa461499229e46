//! Change list: the admin's tabular list view
//!
//! A [`ChangeList`] resolves a registered model and applies its admin
//! configuration to a set of records: which columns appear (and which of
//! them are inline-editable), free-text search, field filters, ordering,
//! and pagination. Records are JSON objects ([`AdminRecord`]), the shape
//! they have after leaving whatever storage owns them.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{AdminError, AdminResult};
use crate::filters::{FilterSpec, ListFilter, filter_for_field};
use crate::metadata::humanize_field_name;
use crate::model_admin::ModelAdmin;
use crate::site::{AdminSite, ModelEntry};

/// Maximum page size for list views
///
/// Caps what a request can ask for, keeping one page from materializing
/// an unbounded number of records.
pub const MAX_PAGE_SIZE: u64 = 500;

/// Default page size when neither the query nor the model admin sets one
pub const DEFAULT_PAGE_SIZE: u64 = 25;

/// A record as the admin layer sees it: a JSON object
///
/// # Examples
///
/// ```
/// use blog_admin::AdminRecord;
/// use serde_json::json;
///
/// let record = AdminRecord::from_value(json!({"id": 1, "title": "Hello"})).unwrap();
/// assert_eq!(record.get("title").and_then(|v| v.as_str()), Some("Hello"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdminRecord(Map<String, Value>);

impl AdminRecord {
	/// Create an empty record
	pub fn new() -> Self {
		Self(Map::new())
	}

	/// Build a record from a JSON value, which must be an object
	pub fn from_value(value: Value) -> AdminResult<Self> {
		match value {
			Value::Object(map) => Ok(Self(map)),
			other => Err(AdminError::ValidationError(format!(
				"expected a JSON object for a record, got {other}"
			))),
		}
	}

	/// Get a field value
	pub fn get(&self, field: &str) -> Option<&Value> {
		self.0.get(field)
	}

	/// Set a field value
	pub fn set(&mut self, field: impl Into<String>, value: Value) {
		self.0.insert(field.into(), value);
	}

	/// Field names present on the record
	pub fn field_names(&self) -> Vec<&str> {
		self.0.keys().map(|k| k.as_str()).collect()
	}
}

/// A column in the list view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
	/// Field name backing the column
	pub field: String,
	/// Display label
	pub label: String,
	/// Whether the list can be sorted by this column
	pub sortable: bool,
	/// Whether the column is editable inline from the list
	pub editable: bool,
}

/// Query parameters for a change list request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
	/// Free-text search term
	pub search: Option<String>,
	/// Field filters, as field name to value
	pub filters: HashMap<String, String>,
	/// Sort field override (prefix with "-" for descending)
	pub sort_by: Option<String>,
	/// 1-based page number
	pub page: Option<u64>,
	/// Page size request, clamped to [`MAX_PAGE_SIZE`]
	pub page_size: Option<u64>,
}

impl ListQuery {
	/// Set the search term
	pub fn with_search(mut self, term: impl Into<String>) -> Self {
		self.search = Some(term.into());
		self
	}

	/// Add a field filter
	pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
		self.filters.insert(field.into(), value.into());
		self
	}

	/// Override the sort field
	pub fn with_sort(mut self, field: impl Into<String>) -> Self {
		self.sort_by = Some(field.into());
		self
	}

	/// Request a page
	pub fn with_page(mut self, page: u64) -> Self {
		self.page = Some(page);
		self
	}

	/// Request a page size
	pub fn with_page_size(mut self, size: u64) -> Self {
		self.page_size = Some(size);
		self
	}
}

/// One page of change list results
#[derive(Debug, Clone, Serialize)]
pub struct Page {
	/// Records on this page, in display order
	pub records: Vec<AdminRecord>,
	/// Total matching records across all pages
	pub count: u64,
	/// 1-based page number
	pub page: u64,
	/// Effective page size
	pub page_size: u64,
	/// Total number of pages (at least 1)
	pub total_pages: u64,
}

/// The list view of one registered model
pub struct ChangeList {
	entry: Arc<ModelEntry>,
	default_page_size: u64,
}

impl ChangeList {
	/// Resolve the change list for a registered model
	pub fn new(site: &AdminSite, model_name: &str) -> AdminResult<Self> {
		let entry = site.get_model_admin(model_name)?;
		Ok(Self {
			entry,
			default_page_size: site.list_per_page() as u64,
		})
	}

	/// Model name this change list serves
	pub fn model_name(&self) -> &str {
		&self.entry.meta.model_name
	}

	/// The registered model behind this change list
	pub fn entry(&self) -> &ModelEntry {
		&self.entry
	}

	/// Columns in declared order
	///
	/// Exactly the fields named by `list_display`; a column is editable
	/// when its field appears in `list_editable`.
	pub fn columns(&self) -> Vec<ColumnInfo> {
		let editable = self.entry.admin.list_editable();
		self.entry
			.admin
			.list_display()
			.iter()
			.map(|field| ColumnInfo {
				field: field.to_string(),
				label: humanize_field_name(field),
				sortable: true,
				editable: editable.contains(field),
			})
			.collect()
	}

	/// Filters available in the sidebar, one per `list_filter` field
	pub fn available_filters(&self) -> Vec<Box<dyn ListFilter>> {
		self.entry
			.admin
			.list_filter()
			.iter()
			.filter_map(|field| self.entry.meta.field(field))
			.map(filter_for_field)
			.collect()
	}

	/// Apply search, filters, ordering, and pagination to records
	///
	/// Filter fields outside `list_filter` are rejected; everything else
	/// narrows or rearranges. Search is a case-insensitive substring
	/// match OR-ed across `search_fields`.
	pub fn rows(&self, records: &[AdminRecord], query: &ListQuery) -> AdminResult<Page> {
		let admin = &self.entry.admin;
		let mut matched: Vec<AdminRecord> = records.to_vec();

		if let Some(search) = query.search.as_deref() {
			let search_fields = admin.search_fields();
			if !search.is_empty() && !search_fields.is_empty() {
				let needle = search.to_lowercase();
				matched.retain(|record| {
					search_fields.iter().any(|field| {
						record
							.get(field)
							.and_then(|v| v.as_str())
							.map(|s| s.to_lowercase().contains(&needle))
							.unwrap_or(false)
					})
				});
			}
		}

		// Only fields declared in list_filter may be filtered on.
		let allowed = admin.list_filter();
		for (field, value) in &query.filters {
			if !allowed.contains(&field.as_str()) {
				return Err(AdminError::UnknownFilterField {
					model: self.model_name().to_string(),
					field: field.clone(),
				});
			}
			let spec = FilterSpec::new(field.clone(), "exact", value.clone(), "");
			matched.retain(|record| spec.matches(record));
		}

		let ordering = admin.ordering();
		let sort_by = query
			.sort_by
			.as_deref()
			.or_else(|| ordering.first().copied());
		if let Some(sort_by) = sort_by {
			let (field, descending) = match sort_by.strip_prefix('-') {
				Some(field) => (field, true),
				None => (sort_by, false),
			};
			matched.sort_by(|a, b| {
				let ord = compare_values(a.get(field), b.get(field));
				if descending { ord.reverse() } else { ord }
			});
		}

		let count = matched.len() as u64;
		let page = query.page.unwrap_or(1).max(1);
		let page_size = query
			.page_size
			.unwrap_or_else(|| {
				admin
					.list_per_page()
					.map(|n| n as u64)
					.unwrap_or(self.default_page_size)
			})
			.clamp(1, MAX_PAGE_SIZE);
		let total_pages = count.div_ceil(page_size).max(1);
		let offset = (page - 1) * page_size;

		let records: Vec<AdminRecord> = matched
			.into_iter()
			.skip(offset as usize)
			.take(page_size as usize)
			.collect();

		debug!(
			model = %self.model_name(),
			count,
			page,
			"change list computed"
		);

		Ok(Page {
			records,
			count,
			page,
			page_size,
			total_pages,
		})
	}

	/// Apply an inline edit from the list view
	///
	/// Only fields declared `list_editable` can be changed this way;
	/// every other field requires the change form.
	pub fn apply_list_edit(
		&self,
		record: &mut AdminRecord,
		field: &str,
		value: Value,
	) -> AdminResult<()> {
		if !self.entry.admin.list_editable().contains(&field) {
			return Err(AdminError::FieldNotEditable {
				model: self.model_name().to_string(),
				field: field.to_string(),
			});
		}
		record.set(field, value);
		Ok(())
	}
}

/// Order two optional JSON values
///
/// Missing values sort first; strings compare case-insensitively so
/// alphabetical ordering is not split by case.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> std::cmp::Ordering {
	use std::cmp::Ordering;

	match (a, b) {
		(None, None) => Ordering::Equal,
		(None, Some(_)) => Ordering::Less,
		(Some(_), None) => Ordering::Greater,
		(Some(a), Some(b)) => match (a, b) {
			(Value::String(x), Value::String(y)) => x
				.to_lowercase()
				.cmp(&y.to_lowercase())
				.then_with(|| x.cmp(y)),
			(Value::Number(x), Value::Number(y)) => x
				.as_f64()
				.partial_cmp(&y.as_f64())
				.unwrap_or(Ordering::Equal),
			(Value::Bool(x), Value::Bool(y)) => x.cmp(y),
			_ => a.to_string().cmp(&b.to_string()),
		},
	}
}
