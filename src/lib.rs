pub mod config;
pub mod error;
mod frontmatter;
pub mod library;
pub mod logger;
pub mod post;
pub mod query;
pub mod scaffold;
pub mod schema;
pub mod source;
mod test_data;
