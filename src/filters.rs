//! List filtering for admin change lists
//!
//! Filters narrow a change list to records matching a field condition.
//! Each registered filter field contributes a [`ListFilter`] whose
//! choices are [`FilterSpec`] values; a spec can be rendered as a query
//! parameter for the UI and applied directly to in-memory records.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::changelist::AdminRecord;
use crate::metadata::{FieldKind, FieldMeta};

/// Specification for a single filter option
///
/// # Examples
///
/// ```
/// use blog_admin::FilterSpec;
///
/// let filter = FilterSpec::new("active", "exact", "true", "Active");
/// assert_eq!(filter.field, "active");
/// assert_eq!(filter.to_query_param(), "active__exact=true");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterSpec {
	/// Field name to filter on
	pub field: String,
	/// Lookup type (exact, contains, gte, lte)
	pub lookup: String,
	/// Filter value
	pub value: String,
	/// Display text for the filter option
	pub display: String,
}

impl FilterSpec {
	/// Create a new filter specification
	pub fn new(
		field: impl Into<String>,
		lookup: impl Into<String>,
		value: impl Into<String>,
		display: impl Into<String>,
	) -> Self {
		Self {
			field: field.into(),
			lookup: lookup.into(),
			value: value.into(),
			display: display.into(),
		}
	}

	/// Convert to query parameter format
	pub fn to_query_param(&self) -> String {
		format!("{}__{}={}", self.field, self.lookup, self.value)
	}

	/// Whether a record satisfies this filter
	///
	/// Values are compared against the record's JSON representation:
	/// strings, booleans, and numbers compare against the spec value's
	/// textual form. Missing fields never match.
	///
	/// # Examples
	///
	/// ```
	/// use blog_admin::{AdminRecord, FilterSpec};
	/// use serde_json::json;
	///
	/// let record = AdminRecord::from_value(json!({"active": true})).unwrap();
	/// assert!(FilterSpec::new("active", "exact", "true", "Yes").matches(&record));
	/// assert!(!FilterSpec::new("active", "exact", "false", "No").matches(&record));
	/// ```
	pub fn matches(&self, record: &AdminRecord) -> bool {
		let Some(value) = record.get(&self.field) else {
			return false;
		};
		match self.lookup.as_str() {
			"exact" => value_eq(value, &self.value),
			"contains" => value
				.as_str()
				.map(|s| s.to_lowercase().contains(&self.value.to_lowercase()))
				.unwrap_or(false),
			"gte" => value_cmp(value, &self.value).map(|o| o.is_ge()).unwrap_or(false),
			"lte" => value_cmp(value, &self.value).map(|o| o.is_le()).unwrap_or(false),
			_ => false,
		}
	}
}

/// Compare a JSON value against a textual filter value for equality
fn value_eq(value: &Value, filter_value: &str) -> bool {
	match value {
		Value::String(s) => s == filter_value,
		Value::Bool(b) => filter_value.to_lowercase() == b.to_string(),
		Value::Number(n) => n.to_string() == filter_value,
		_ => value.to_string() == filter_value,
	}
}

/// Order a JSON value against a textual filter value, when comparable
fn value_cmp(value: &Value, filter_value: &str) -> Option<std::cmp::Ordering> {
	match value {
		Value::String(s) => Some(s.as_str().cmp(filter_value)),
		Value::Number(n) => {
			let lhs = n.as_f64()?;
			let rhs: f64 = filter_value.parse().ok()?;
			lhs.partial_cmp(&rhs)
		}
		_ => None,
	}
}

/// Trait for list filters
///
/// Implement this trait to create custom filters for admin list views.
pub trait ListFilter: Send + Sync {
	/// Get the field name this filter applies to
	fn field_name(&self) -> &str;

	/// Get the filter title displayed in UI
	fn title(&self) -> &str;

	/// Get available filter choices
	fn choices(&self) -> Vec<FilterSpec>;

	/// Get the lookup type (default: "exact")
	fn lookup_type(&self) -> &str {
		"exact"
	}

	/// Check if a value is selected
	fn is_selected(&self, value: &str, current_filters: &HashMap<String, String>) -> bool {
		current_filters
			.get(self.field_name())
			.map(|v| v == value)
			.unwrap_or(false)
	}
}

/// Simple boolean filter
///
/// # Examples
///
/// ```
/// use blog_admin::{BooleanFilter, ListFilter};
///
/// let filter = BooleanFilter::new("deleted", "Deleted");
/// assert_eq!(filter.field_name(), "deleted");
/// assert_eq!(filter.choices().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct BooleanFilter {
	field: String,
	title: String,
}

impl BooleanFilter {
	/// Create a new boolean filter
	pub fn new(field: impl Into<String>, title: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			title: title.into(),
		}
	}
}

impl ListFilter for BooleanFilter {
	fn field_name(&self) -> &str {
		&self.field
	}

	fn title(&self) -> &str {
		&self.title
	}

	fn choices(&self) -> Vec<FilterSpec> {
		vec![
			FilterSpec::new(&self.field, "exact", "true", "Yes"),
			FilterSpec::new(&self.field, "exact", "false", "No"),
		]
	}
}

/// Choice filter for fields with freely occurring values
#[derive(Debug, Clone)]
pub struct ChoiceFilter {
	field: String,
	title: String,
	choices: Vec<(String, String)>, // (value, display)
}

impl ChoiceFilter {
	/// Create a new choice filter
	pub fn new(field: impl Into<String>, title: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			title: title.into(),
			choices: Vec::new(),
		}
	}

	/// Add a choice option
	pub fn add_choice(mut self, value: impl Into<String>, display: impl Into<String>) -> Self {
		self.choices.push((value.into(), display.into()));
		self
	}
}

impl ListFilter for ChoiceFilter {
	fn field_name(&self) -> &str {
		&self.field
	}

	fn title(&self) -> &str {
		&self.title
	}

	fn choices(&self) -> Vec<FilterSpec> {
		self.choices
			.iter()
			.map(|(value, display)| FilterSpec::new(&self.field, "exact", value, display))
			.collect()
	}
}

/// Date range filter with rolling boundaries
///
/// Choices cover the common admin ranges: today, this week, this month,
/// this year, and the trailing 7/30-day windows.
#[derive(Debug, Clone)]
pub struct DateRangeFilter {
	field: String,
	title: String,
}

impl DateRangeFilter {
	/// Create a new date range filter
	pub fn new(field: impl Into<String>, title: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			title: title.into(),
		}
	}
}

impl ListFilter for DateRangeFilter {
	fn field_name(&self) -> &str {
		&self.field
	}

	fn title(&self) -> &str {
		&self.title
	}

	fn choices(&self) -> Vec<FilterSpec> {
		use chrono::{Datelike, Duration, Local};

		let today = Local::now().date_naive();
		let week_start = today - Duration::days(today.weekday().num_days_from_monday() as i64);
		// Day 1 exists in every month, and January in every year.
		let month_start = today.with_day(1).unwrap_or(today);
		let year_start = today
			.with_month(1)
			.and_then(|d| d.with_day(1))
			.unwrap_or(today);
		let last_7_days = today - Duration::days(7);
		let last_30_days = today - Duration::days(30);

		vec![
			FilterSpec::new(&self.field, "gte", today.to_string(), "Today"),
			FilterSpec::new(&self.field, "gte", week_start.to_string(), "This week"),
			FilterSpec::new(&self.field, "gte", month_start.to_string(), "This month"),
			FilterSpec::new(&self.field, "gte", year_start.to_string(), "This year"),
			FilterSpec::new(&self.field, "gte", last_7_days.to_string(), "Last 7 days"),
			FilterSpec::new(&self.field, "gte", last_30_days.to_string(), "Last 30 days"),
		]
	}

	fn lookup_type(&self) -> &str {
		"gte"
	}
}

/// Build the filter for a field from its metadata
///
/// Boolean fields get the yes/no filter, date and datetime fields the
/// rolling range filter, everything else an empty choice filter the UI
/// populates from observed values.
pub fn filter_for_field(field: &FieldMeta) -> Box<dyn ListFilter> {
	let title = field.verbose_name();
	match field.kind {
		FieldKind::Boolean => Box::new(BooleanFilter::new(&field.name, title)),
		FieldKind::Date | FieldKind::DateTime => {
			Box::new(DateRangeFilter::new(&field.name, title))
		}
		_ => Box::new(ChoiceFilter::new(&field.name, title)),
	}
}
