#[cfg(feature = "cli")]
pub mod cli;
pub mod form_config;
pub mod schema;

pub use form_config::FormConfig;
pub use schema::FormSchema;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
