pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{
    DarkLightProbe, FixedThemeProbe, JsonFilePreferenceStore, MemoryPreferenceStore, MemoryView,
    TerminalView,
};
pub use crate::config::{FormConfig, FormSchema};
pub use crate::core::{
    controller::FormController, submission::HttpTransport, theme::ThemeManager,
    validator::Validator,
};
pub use crate::domain::model::{
    Attachment, FieldKind, FieldSpec, FormFieldSet, SubmissionOutcome, SubmissionState,
    SubmitAttempt, ThemePreference, ValidationResult,
};
pub use crate::utils::error::{FormError, Result};
