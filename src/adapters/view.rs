use crate::domain::ports::FormView;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// Keeps everything the page would show, for inspection by tests and embedders.
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    root_dark: bool,
    toggle_checked: bool,
    current_date_text: String,
    min_dates: HashMap<String, NaiveDate>,
    values: HashMap<String, String>,
    invalid: BTreeSet<String>,
    errors: Vec<String>,
    errors_visible: bool,
    modal_visible: bool,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root_dark(&self) -> bool {
        self.root_dark
    }

    pub fn toggle_checked(&self) -> bool {
        self.toggle_checked
    }

    pub fn current_date_text(&self) -> &str {
        &self.current_date_text
    }

    pub fn min_date(&self, field: &str) -> Option<NaiveDate> {
        self.min_dates.get(field).copied()
    }

    pub fn field_value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn is_invalid(&self, field: &str) -> bool {
        self.invalid.contains(field)
    }

    pub fn invalid_fields(&self) -> &BTreeSet<String> {
        &self.invalid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn errors_visible(&self) -> bool {
        self.errors_visible
    }

    pub fn modal_visible(&self) -> bool {
        self.modal_visible
    }
}

impl FormView for MemoryView {
    fn set_root_dark(&mut self, is_dark: bool) {
        self.root_dark = is_dark;
    }

    fn set_theme_toggle(&mut self, checked: bool) {
        self.toggle_checked = checked;
    }

    fn set_current_date_text(&mut self, text: &str) {
        self.current_date_text = text.to_string();
    }

    fn set_min_date(&mut self, field: &str, min: NaiveDate) {
        self.min_dates.insert(field.to_string(), min);
    }

    fn set_field_value(&mut self, field: &str, value: &str) {
        self.values.insert(field.to_string(), value.to_string());
    }

    fn clear_invalid_markers(&mut self) {
        self.invalid.clear();
    }

    fn mark_invalid(&mut self, field: &str) {
        self.invalid.insert(field.to_string());
    }

    fn render_errors(&mut self, errors: &[String]) {
        self.errors = errors.to_vec();
        self.errors_visible = true;
    }

    fn hide_errors(&mut self) {
        self.errors.clear();
        self.errors_visible = false;
    }

    fn show_success_modal(&mut self) {
        self.modal_visible = true;
    }

    fn hide_success_modal(&mut self) {
        self.modal_visible = false;
    }
}

/// Prints feedback to the terminal; everything else goes to the log.
#[derive(Debug, Default)]
pub struct TerminalView {
    modal_visible: bool,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modal_visible(&self) -> bool {
        self.modal_visible
    }
}

impl FormView for TerminalView {
    fn set_root_dark(&mut self, is_dark: bool) {
        tracing::debug!("Root theme class dark={}", is_dark);
    }

    fn set_theme_toggle(&mut self, checked: bool) {
        tracing::debug!("Theme toggle checked={}", checked);
    }

    fn set_current_date_text(&mut self, text: &str) {
        println!("📅 {}", text);
    }

    fn set_min_date(&mut self, field: &str, min: NaiveDate) {
        tracing::debug!("{} min date {}", field, min);
    }

    fn set_field_value(&mut self, field: &str, value: &str) {
        tracing::debug!("{} = {:?}", field, value);
    }

    fn clear_invalid_markers(&mut self) {}

    fn mark_invalid(&mut self, field: &str) {
        tracing::debug!("Field marked invalid: {}", field);
    }

    fn render_errors(&mut self, errors: &[String]) {
        eprintln!("❌ Please fix the following:");
        for error in errors {
            eprintln!("  • {}", error);
        }
    }

    fn hide_errors(&mut self) {}

    fn show_success_modal(&mut self) {
        self.modal_visible = true;
        println!("✅ Your leave request has been submitted successfully!");
    }

    fn hide_success_modal(&mut self) {
        self.modal_visible = false;
    }
}
