//! Model metadata for the blog app
//!
//! The models themselves live with the rest of the application; the
//! admin layer only needs their schema surface, declared here.

use crate::metadata::{FieldKind, FieldMeta, ModelMeta};

/// Blog post: the main content type
pub fn blog_post_meta() -> ModelMeta {
	ModelMeta::new("blog", "BlogPost")
		.with_field(FieldMeta::auto("id"))
		.with_field(FieldMeta::new("title", FieldKind::Char { max_length: 200 }).required())
		.with_field(FieldMeta::new("text", FieldKind::Text).required())
		.with_field(FieldMeta::new(
			"authors",
			FieldKind::ManyToMany {
				to: "Author".to_string(),
			},
		))
		.with_field(FieldMeta::new("category", FieldKind::Char { max_length: 100 }))
		.with_field(FieldMeta::new("website", FieldKind::Url))
		.with_field(FieldMeta::new("document", FieldKind::File))
		.with_field(FieldMeta::new("active", FieldKind::Boolean))
		.with_field(FieldMeta::new("deleted", FieldKind::Boolean))
		.with_field(FieldMeta::new("create_date", FieldKind::DateTime))
		.with_field(FieldMeta::new("update_date", FieldKind::DateTime))
}

/// Image attached to a blog post
pub fn blog_post_image_meta() -> ModelMeta {
	ModelMeta::new("blog", "BlogPostImage")
		.with_field(FieldMeta::auto("id"))
		.with_field(FieldMeta::new(
			"blog_post",
			FieldKind::ForeignKey {
				to: "BlogPost".to_string(),
			},
		))
		.with_field(FieldMeta::new("image", FieldKind::File).required())
}

/// Post author
pub fn author_meta() -> ModelMeta {
	ModelMeta::new("blog", "Author")
		.with_field(FieldMeta::auto("id"))
		.with_field(FieldMeta::new("name", FieldKind::Char { max_length: 100 }).required())
		.with_field(FieldMeta::new("email", FieldKind::Email))
}

/// Site-wide banner image
pub fn banner_image_meta() -> ModelMeta {
	ModelMeta::new("blog", "BannerImage")
		.with_field(FieldMeta::auto("id"))
		.with_field(FieldMeta::new("image", FieldKind::File).required())
		.with_field(FieldMeta::new("active", FieldKind::Boolean))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_blog_post_schema() {
		let meta = blog_post_meta();
		assert_eq!(meta.qualified_name(), "blog.BlogPost");
		assert_eq!(meta.pk_field(), "id");
		assert!(meta.field("authors").unwrap().kind.is_many_to_many());
		assert_eq!(
			meta.field("authors").unwrap().kind.related_model(),
			Some("Author")
		);
		assert!(meta.has_field("create_date"));
		assert!(meta.has_field("update_date"));
	}

	#[test]
	fn test_related_models_resolve() {
		let meta = blog_post_image_meta();
		assert_eq!(
			meta.field("blog_post").unwrap().kind.related_model(),
			Some("BlogPost")
		);
	}
}
