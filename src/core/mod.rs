pub mod controller;
pub mod dates;
pub mod feedback;
pub mod submission;
pub mod theme;
pub mod validator;

pub use crate::domain::model::{
    Attachment, FieldKind, FieldSpec, FormFieldSet, SubmissionOutcome, SubmissionState,
    SubmitAttempt, ThemePreference, ValidationResult,
};
pub use crate::domain::ports::{FormView, PreferenceStore, SubmissionTransport, SystemThemeProbe};
pub use crate::utils::error::Result;
