//! Blog application: model metadata and admin registration

pub mod admin;
pub mod models;

pub use admin::{blog_post_admin, register_admins};
