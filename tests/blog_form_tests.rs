//! Integration tests for the BlogPost change form
//!
//! Covers the declared form behaviors:
//! - Three fieldsets: an unlabeled primary group, "Status", "Timestamps"
//! - create_date and update_date render read-only and cannot be changed
//!   through a submission
//! - authors renders as the dual-list selector
//! - Submitted values are coerced against widget types

use std::collections::HashMap;

use blog_admin::apps::blog;
use blog_admin::{AdminError, AdminForm, AdminRecord, AdminSite, FieldType};
use rstest::rstest;
use serde_json::json;

fn blog_post_form() -> AdminForm {
	let site = AdminSite::new("Blog administration");
	blog::register_admins(&site).unwrap();
	AdminForm::for_model(&site.get_model_admin("BlogPost").unwrap())
}

fn saved_post() -> AdminRecord {
	AdminRecord::from_value(json!({
		"id": 7,
		"title": "Winter composting",
		"text": "Keeping the pile warm through the cold months.",
		"authors": [1],
		"category": "gardening",
		"website": "https://example.org/compost",
		"document": "uploads/compost-checklist.pdf",
		"active": true,
		"deleted": false,
		"create_date": "2026-01-10T09:00:00Z",
		"update_date": "2026-01-12T08:30:00Z",
	}))
	.unwrap()
}

/// Test: form layout matches the three declared groups
///
/// **Test Category**: Happy path
#[test]
fn test_fieldset_groups_and_order() {
	let form = blog_post_form();
	let fieldsets = form.fieldsets();

	assert_eq!(fieldsets.len(), 3);
	assert_eq!(fieldsets[0].label, None);
	assert_eq!(fieldsets[1].label.as_deref(), Some("Status"));
	assert_eq!(fieldsets[2].label.as_deref(), Some("Timestamps"));

	let primary: Vec<&str> = fieldsets[0].fields.iter().map(|f| f.name.as_str()).collect();
	assert_eq!(
		primary,
		vec!["title", "text", "authors", "category", "website", "document"]
	);
	let status: Vec<&str> = fieldsets[1].fields.iter().map(|f| f.name.as_str()).collect();
	assert_eq!(status, vec!["active", "deleted"]);
	let timestamps: Vec<&str> = fieldsets[2].fields.iter().map(|f| f.name.as_str()).collect();
	assert_eq!(timestamps, vec!["create_date", "update_date"]);
}

/// Test: widgets follow the field kinds and admin configuration
///
/// **Test Category**: Decision table over widget inference
#[test]
fn test_widget_selection() {
	let form = blog_post_form();

	assert_eq!(form.field("title").unwrap().field_type, FieldType::Text);
	assert_eq!(form.field("text").unwrap().field_type, FieldType::TextArea);
	assert_eq!(form.field("website").unwrap().field_type, FieldType::Url);
	assert_eq!(form.field("document").unwrap().field_type, FieldType::File);
	assert_eq!(form.field("active").unwrap().field_type, FieldType::Boolean);
	assert_eq!(
		form.field("create_date").unwrap().field_type,
		FieldType::DateTime
	);
	// authors is in filter_horizontal, so the default multi-select is
	// upgraded to the dual-list selector
	assert!(matches!(
		form.field("authors").unwrap().field_type,
		FieldType::DualList { .. }
	));
}

/// Test: timestamp fields render read-only
///
/// **Test Category**: Happy path
#[rstest]
#[case("create_date")]
#[case("update_date")]
fn test_timestamps_are_readonly(#[case] field: &str) {
	let form = blog_post_form();
	assert!(form.field(field).unwrap().readonly, "{field} should be readonly");
}

/// Test: submitting values for readonly fields has no effect
///
/// **Test Category**: Use case (the admin mutation path bypasses them)
#[test]
fn test_bind_cannot_change_timestamps() {
	let form = blog_post_form();
	let record = saved_post();

	let mut data = HashMap::new();
	data.insert("title".to_string(), json!("Winter composting, revised"));
	data.insert("create_date".to_string(), json!("1999-01-01T00:00:00Z"));
	data.insert("update_date".to_string(), json!("1999-01-01T00:00:00Z"));

	let updated = form.bind(&record, &data).unwrap();
	assert_eq!(
		updated.get("title").and_then(|v| v.as_str()),
		Some("Winter composting, revised")
	);
	assert_eq!(
		updated.get("create_date").and_then(|v| v.as_str()),
		Some("2026-01-10T09:00:00Z")
	);
	assert_eq!(
		updated.get("update_date").and_then(|v| v.as_str()),
		Some("2026-01-12T08:30:00Z")
	);
}

/// Test: checkbox submissions coerce to booleans
///
/// **Test Category**: Equivalence partitioning
#[rstest]
#[case(json!("on"), true)]
#[case(json!("true"), true)]
#[case(json!(true), true)]
#[case(json!("off"), false)]
#[case(json!(""), false)]
#[case(json!(false), false)]
fn test_boolean_coercion(#[case] submitted: serde_json::Value, #[case] expected: bool) {
	let form = blog_post_form();
	let record = saved_post();

	let mut data = HashMap::new();
	data.insert("deleted".to_string(), submitted);

	let updated = form.bind(&record, &data).unwrap();
	assert_eq!(updated.get("deleted"), Some(&json!(expected)));
}

/// Test: invalid submissions are rejected with a validation error
///
/// **Test Category**: Error path
#[rstest]
#[case("website", json!("not a url"))]
#[case("authors", json!(1))]
#[case("active", json!("maybe"))]
#[case("title", json!(""))]
fn test_invalid_submissions_rejected(#[case] field: &str, #[case] value: serde_json::Value) {
	let form = blog_post_form();
	let record = saved_post();

	let mut data = HashMap::new();
	data.insert(field.to_string(), value);

	let err = form.bind(&record, &data).unwrap_err();
	assert!(matches!(err, AdminError::ValidationError(_)), "field {field}");
}

/// Test: author choices can be populated for the dual-list widget
///
/// **Test Category**: Use case
#[test]
fn test_author_choices_populate_dual_list() {
	let mut form = blog_post_form();
	form.set_choices(
		"authors",
		vec![
			("1".to_string(), "Ada Lovelace".to_string()),
			("2".to_string(), "Mary Shelley".to_string()),
		],
	);

	match &form.field("authors").unwrap().field_type {
		FieldType::DualList { choices } => {
			assert_eq!(choices.len(), 2);
			assert_eq!(choices[0].1, "Ada Lovelace");
		}
		other => panic!("expected dual list selector, got {other:?}"),
	}
}

/// Test: populate fills current values from a record
///
/// **Test Category**: Happy path
#[test]
fn test_populate_from_record() {
	let mut form = blog_post_form();
	form.populate(&saved_post());

	assert_eq!(
		form.field("title").unwrap().value,
		Some(json!("Winter composting"))
	);
	assert_eq!(
		form.field("create_date").unwrap().value,
		Some(json!("2026-01-10T09:00:00Z"))
	);
}
