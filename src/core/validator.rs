use crate::config::form_config::DEFAULT_MAX_ATTACHMENT_BYTES;
use crate::config::schema::FormSchema;
use crate::core::dates::parse_date;
use crate::domain::model::{FieldKind, FormFieldSet, ValidationResult};
use chrono::NaiveDate;

pub const END_BEFORE_START_MESSAGE: &str = "End date cannot be before the start date.";

/// Client-side checks run before anything leaves the machine.
#[derive(Debug, Clone)]
pub struct Validator {
    max_attachment_bytes: u64,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTACHMENT_BYTES)
    }
}

impl Validator {
    pub fn new(max_attachment_bytes: u64) -> Self {
        Self {
            max_attachment_bytes,
        }
    }

    pub fn max_attachment_bytes(&self) -> u64 {
        self.max_attachment_bytes
    }

    pub fn validate(&self, schema: &FormSchema, fields: &FormFieldSet) -> ValidationResult {
        self.validate_from(schema, fields, None)
    }

    /// Same checks, plus rejecting dates earlier than `earliest` when given.
    pub fn validate_from(
        &self,
        schema: &FormSchema,
        fields: &FormFieldSet,
        earliest: Option<NaiveDate>,
    ) -> ValidationResult {
        let mut result = ValidationResult::default();

        // 必填欄位
        for spec in schema.fields().iter().filter(|f| f.required) {
            let missing = match spec.kind {
                FieldKind::Attachment => fields.attachment().is_none(),
                _ => fields.get(&spec.name).trim().is_empty(),
            };
            if missing {
                result.push(format!("{} is required.", spec.label), Some(spec.name.as_str()));
            }
        }

        // 不可早於可選的最早日期
        let start = parse_date(fields.get(&schema.start_date().name));
        let end = parse_date(fields.get(&schema.end_date().name));
        if let Some(earliest) = earliest {
            for (spec, date) in [(schema.start_date(), start), (schema.end_date(), end)] {
                if date.is_some_and(|d| d < earliest) {
                    result.push(past_date_message(&spec.label), Some(spec.name.as_str()));
                }
            }
        }

        // 日期順序
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                result.push(END_BEFORE_START_MESSAGE, Some(schema.end_date().name.as_str()));
            }
        }

        // 附件大小
        if let Some(attachment) = fields.attachment() {
            if attachment.size_bytes > self.max_attachment_bytes {
                result.push(self.file_too_large_message(), None);
            }
        }

        result
    }

    pub fn file_too_large_message(&self) -> String {
        format!(
            "File is too large. Max size is {}.",
            human_size(self.max_attachment_bytes)
        )
    }
}

pub fn past_date_message(label: &str) -> String {
    format!("{} cannot be in the past.", label)
}

fn human_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= KIB && bytes % KIB == 0 {
        format!("{}KB", bytes / KIB)
    } else {
        format!("{} bytes", bytes)
    }
}
