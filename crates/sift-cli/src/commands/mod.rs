pub mod dispatch;
pub mod document;
pub mod install;
pub mod reports;
pub mod schema;
pub mod show;
pub mod validate;
