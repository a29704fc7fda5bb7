use crate::domain::model::{FieldKind, FieldSpec};
use crate::utils::error::{FormError, Result};
use crate::utils::validation::{validate_label, Validate};
use std::collections::HashSet;

/// Ordered field definitions of the form; order drives message and payload order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
    roles: DateRoles,
}

/// Positions of the date-range fields inside `fields`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DateRoles {
    start: usize,
    end: usize,
    total: usize,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self> {
        let roles = DateRoles {
            start: position_of(&fields, FieldKind::StartDate).unwrap_or(usize::MAX),
            end: position_of(&fields, FieldKind::EndDate).unwrap_or(usize::MAX),
            total: position_of(&fields, FieldKind::TotalDays).unwrap_or(usize::MAX),
        };
        let schema = Self { fields, roles };
        schema.validate()?;
        Ok(schema)
    }

    /// 請假單預設欄位
    pub fn leave_request() -> Self {
        Self {
            fields: default_fields(),
            roles: DateRoles {
                start: 4,
                end: 5,
                total: 6,
            },
        }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn start_date(&self) -> &FieldSpec {
        &self.fields[self.roles.start]
    }

    pub fn end_date(&self) -> &FieldSpec {
        &self.fields[self.roles.end]
    }

    pub fn total_days(&self) -> &FieldSpec {
        &self.fields[self.roles.total]
    }

    pub fn attachment(&self) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.kind == FieldKind::Attachment)
    }
}

fn position_of(fields: &[FieldSpec], kind: FieldKind) -> Option<usize> {
    fields.iter().position(|f| f.kind == kind)
}

impl Default for FormSchema {
    fn default() -> Self {
        Self::leave_request()
    }
}

impl Validate for FormSchema {
    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            validate_label("fields.name", &field.name)?;
            validate_label("fields.label", &field.label)?;
            if !seen.insert(field.name.as_str()) {
                return Err(FormError::InvalidConfigValueError {
                    field: "fields.name".to_string(),
                    value: field.name.clone(),
                    reason: "Field names must be unique".to_string(),
                });
            }
        }

        let exactly_one = [
            (FieldKind::StartDate, "start_date"),
            (FieldKind::EndDate, "end_date"),
            (FieldKind::TotalDays, "total_days"),
        ];
        for (kind, label) in exactly_one {
            let count = self.fields.iter().filter(|f| f.kind == kind).count();
            if count != 1 {
                return Err(FormError::InvalidConfigValueError {
                    field: "fields.kind".to_string(),
                    value: label.to_string(),
                    reason: format!("Exactly one {} field is required, found {}", label, count),
                });
            }
        }

        let attachments = self
            .fields
            .iter()
            .filter(|f| f.kind == FieldKind::Attachment)
            .count();
        if attachments > 1 {
            return Err(FormError::InvalidConfigValueError {
                field: "fields.kind".to_string(),
                value: "attachment".to_string(),
                reason: format!("At most one attachment field is allowed, found {}", attachments),
            });
        }

        Ok(())
    }
}

fn default_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("full_name", "Full Name", true, FieldKind::Text),
        FieldSpec::new("student_id", "Student ID", true, FieldKind::Text),
        FieldSpec::new("email", "Email", true, FieldKind::Text),
        FieldSpec::new("leave_type", "Leave Type", true, FieldKind::Text),
        FieldSpec::new("start_date", "Start Date", true, FieldKind::StartDate),
        FieldSpec::new("end_date", "End Date", true, FieldKind::EndDate),
        FieldSpec::new("total_days", "Total Days", false, FieldKind::TotalDays),
        FieldSpec::new("reason", "Reason for Leave", true, FieldKind::Text),
        FieldSpec::new("attachment", "Attachment", false, FieldKind::Attachment),
    ]
}
