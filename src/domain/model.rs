use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// 欄位在表單中扮演的角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    StartDate,
    EndDate,
    TotalDays,
    Attachment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default = "default_kind")]
    pub kind: FieldKind,
}

fn default_kind() -> FieldKind {
    FieldKind::Text
}

impl FieldSpec {
    pub fn new(name: &str, label: &str, required: bool, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            required,
            kind,
        }
    }
}

/// A file the user picked. Only its size matters; the content is never sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub size_bytes: u64,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            size_bytes,
        }
    }
}

/// Current values of every input on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFieldSet {
    values: HashMap<String, String>,
    attachment: Option<Attachment>,
}

impl FormFieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 缺少的欄位視為空字串，與頁面上的空輸入框一致
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn clear_value(&mut self, name: &str) {
        self.values.remove(name);
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    pub fn set_attachment(&mut self, attachment: Option<Attachment>) {
        self.attachment = attachment;
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.attachment = None;
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(|v| v.is_empty()) && self.attachment.is_none()
    }
}

/// Outcome of one validation pass. Empty `messages` means the form can be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub messages: Vec<String>,
    pub invalid_fields: BTreeSet<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.messages.is_empty()
    }

    pub(crate) fn push(&mut self, message: impl Into<String>, field: Option<&str>) {
        self.messages.push(message.into());
        if let Some(name) = field {
            self.invalid_fields.insert(name.to_string());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
}

impl ThemePreference {
    pub fn from_is_dark(is_dark: bool) -> Self {
        if is_dark {
            ThemePreference::Dark
        } else {
            ThemePreference::Light
        }
    }

    /// 只有字面值 "dark" 代表深色，其餘一律視為淺色
    pub fn from_stored(value: &str) -> Self {
        Self::from_is_dark(value == "dark")
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemePreference::Dark
    }
}

/// Result of exactly one request to the endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Success(serde_json::Value),
    HttpError { status: u16, reason: String },
    NetworkError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
    AwaitingModalClose,
}

/// What `handle_form_submit` did with a submit gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAttempt {
    /// Another submission is in flight or the success modal is still open.
    Rejected(SubmissionState),
    Invalid(ValidationResult),
    Completed(SubmissionOutcome),
}
