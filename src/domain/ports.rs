use crate::domain::model::SubmissionOutcome;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Durable key-value storage for user preferences.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Read-only query for the operating system's dark-mode setting.
pub trait SystemThemeProbe: Send + Sync {
    fn prefers_dark(&self) -> bool;
}

/// The presentation surface the controller drives.
pub trait FormView {
    fn set_root_dark(&mut self, is_dark: bool);
    fn set_theme_toggle(&mut self, checked: bool);
    fn set_current_date_text(&mut self, text: &str);
    fn set_min_date(&mut self, field: &str, min: NaiveDate);
    fn set_field_value(&mut self, field: &str, value: &str);
    fn clear_invalid_markers(&mut self);
    fn mark_invalid(&mut self, field: &str);
    fn render_errors(&mut self, errors: &[String]);
    fn hide_errors(&mut self);
    fn show_success_modal(&mut self);
    fn hide_success_modal(&mut self);
}

#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    /// Sends one JSON document. Never fails: every failure is folded into the outcome.
    async fn submit(&self, payload: &serde_json::Map<String, serde_json::Value>) -> SubmissionOutcome;
}
