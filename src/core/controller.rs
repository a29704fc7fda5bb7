use crate::config::schema::FormSchema;
use crate::core::dates::DateCalculator;
use crate::core::feedback::{display_errors, outcome_message};
use crate::core::submission::build_payload;
use crate::core::theme::ThemeManager;
use crate::core::validator::Validator;
use crate::domain::model::{
    Attachment, FieldKind, FormFieldSet, SubmissionOutcome, SubmissionState, SubmitAttempt,
    ThemePreference, ValidationResult,
};
use crate::domain::ports::{FormView, SubmissionTransport};
use crate::utils::error::{FormError, Result};
use chrono::{Local, NaiveDate};
use serde_json::{Map, Value};

/// Drives one leave-request page: theme, dates, validation and submission.
pub struct FormController<V: FormView, T: SubmissionTransport> {
    schema: FormSchema,
    fields: FormFieldSet,
    view: V,
    transport: T,
    theme: ThemeManager,
    dates: DateCalculator,
    validator: Validator,
    state: SubmissionState,
}

impl<V: FormView, T: SubmissionTransport> FormController<V, T> {
    pub fn new(
        schema: FormSchema,
        validator: Validator,
        theme: ThemeManager,
        view: V,
        transport: T,
    ) -> Self {
        Self {
            schema,
            fields: FormFieldSet::new(),
            view,
            transport,
            theme,
            dates: DateCalculator::new(),
            validator,
            state: SubmissionState::Idle,
        }
    }

    /// 頁面載入時執行一次
    pub fn initialize(&mut self) {
        self.initialize_at(Local::now().date_naive());
    }

    pub fn initialize_at(&mut self, today: NaiveDate) {
        self.theme.initialize_theme(&mut self.view);
        self.dates.setup_dates(&mut self.view, &self.schema, today);
        display_errors(&mut self.view, &[]);
        tracing::debug!("Form initialized for {}", today);
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn fields(&self) -> &FormFieldSet {
        &self.fields
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn theme(&self) -> ThemePreference {
        self.theme.current()
    }

    pub fn dates(&self) -> &DateCalculator {
        &self.dates
    }

    /// Sets an input value and fires the matching change handler.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        let kind = self
            .schema
            .field(name)
            .map(|spec| spec.kind)
            .ok_or_else(|| FormError::UnknownFieldError {
                name: name.to_string(),
            })?;

        match kind {
            FieldKind::TotalDays | FieldKind::Attachment => {
                return Err(FormError::InvalidConfigValueError {
                    field: name.to_string(),
                    value: value.to_string(),
                    reason: "Field cannot be typed into".to_string(),
                });
            }
            _ => {}
        }

        self.fields.set(name, value);
        self.view.set_field_value(name, value);

        match kind {
            FieldKind::StartDate => {
                self.dates
                    .on_start_date_changed(&mut self.fields, &mut self.view, &self.schema);
            }
            FieldKind::EndDate => {
                self.dates
                    .on_end_date_changed(&mut self.fields, &mut self.view, &self.schema);
            }
            _ => {}
        }
        Ok(())
    }

    pub fn set_attachment(&mut self, attachment: Option<Attachment>) {
        if let Some(spec) = self.schema.attachment() {
            let shown = attachment
                .as_ref()
                .map(|a| a.file_name.clone())
                .unwrap_or_default();
            self.view.set_field_value(&spec.name, &shown);
        }
        self.fields.set_attachment(attachment);
    }

    pub fn on_theme_toggled(&mut self, is_dark: bool) {
        self.theme.on_toggle_changed(&mut self.view, is_dark);
    }

    /// Clears old markers, validates, and marks every offending field.
    pub fn validate_form(&mut self) -> ValidationResult {
        self.view.clear_invalid_markers();
        let result =
            self.validator
                .validate_from(&self.schema, &self.fields, self.dates.today());
        for name in &result.invalid_fields {
            self.view.mark_invalid(name);
        }
        result
    }

    pub fn display_errors(&mut self, errors: &[String]) {
        display_errors(&mut self.view, errors);
    }

    pub fn payload(&self) -> Map<String, Value> {
        build_payload(&self.schema, &self.fields)
    }

    /// One submit gesture. Every failure ends in `Idle` and is reported through
    /// the returned value and the view, never as an `Err`.
    pub async fn handle_form_submit(&mut self) -> SubmitAttempt {
        if self.state != SubmissionState::Idle {
            tracing::warn!("⚠️ Submit ignored while {:?}", self.state);
            return SubmitAttempt::Rejected(self.state);
        }

        self.state = SubmissionState::Validating;
        let result = self.validate_form();
        display_errors(&mut self.view, &result.messages);

        if !result.is_valid() {
            tracing::info!("Form validation failed ({} errors)", result.messages.len());
            self.state = SubmissionState::Idle;
            return SubmitAttempt::Invalid(result);
        }

        self.state = SubmissionState::Submitting;
        let payload = self.payload();
        tracing::info!("📤 Submitting leave request ({} fields)", payload.len());
        let outcome = {
            let _in_flight = IdleOnDrop(&mut self.state);
            self.transport.submit(&payload).await
        };

        match &outcome {
            SubmissionOutcome::Success(_) => {
                tracing::info!("✅ Leave request accepted");
                self.view.show_success_modal();
                self.state = SubmissionState::AwaitingModalClose;
            }
            failure => {
                if let SubmissionOutcome::HttpError { status, reason } = failure {
                    tracing::warn!("Server rejected leave request: {} {}", status, reason);
                }
                let message = outcome_message(failure).unwrap_or_default();
                display_errors(&mut self.view, &[message]);
                self.state = SubmissionState::Idle;
            }
        }

        SubmitAttempt::Completed(outcome)
    }

    /// Dismisses the success modal and gets the form ready for a new entry.
    pub fn close_success_modal(&mut self) {
        self.view.hide_success_modal();
        self.reset_form();
        self.state = SubmissionState::Idle;
    }

    pub fn reset_form(&mut self) {
        self.fields.clear();
        for spec in self.schema.fields() {
            self.view.set_field_value(&spec.name, "");
        }
        self.view.clear_invalid_markers();
        self.dates.reset(&mut self.view, &self.schema);
        display_errors(&mut self.view, &[]);
        tracing::debug!("Form reset");
    }
}

/// Returns the controller to `Idle` when a pending submit is dropped mid-request.
struct IdleOnDrop<'a>(&'a mut SubmissionState);

impl Drop for IdleOnDrop<'_> {
    fn drop(&mut self) {
        if *self.0 == SubmissionState::Submitting {
            *self.0 = SubmissionState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryPreferenceStore;
    use crate::adapters::system_theme::FixedThemeProbe;
    use crate::adapters::view::MemoryView;
    use crate::core::feedback::CONNECT_ERROR_MESSAGE;
    use crate::core::validator::END_BEFORE_START_MESSAGE;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Answers with a canned outcome and counts calls.
    struct StubTransport {
        outcome: SubmissionOutcome,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl SubmissionTransport for StubTransport {
        async fn submit(&self, _payload: &Map<String, Value>) -> SubmissionOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    fn controller(
        outcome: SubmissionOutcome,
    ) -> (FormController<MemoryView, StubTransport>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let theme = ThemeManager::new(
            Box::new(MemoryPreferenceStore::new()),
            Box::new(FixedThemeProbe(false)),
        );
        let mut controller = FormController::new(
            FormSchema::leave_request(),
            Validator::default(),
            theme,
            MemoryView::new(),
            StubTransport {
                outcome,
                calls: calls.clone(),
            },
        );
        controller.initialize_at(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
        (controller, calls)
    }

    fn fill(controller: &mut FormController<MemoryView, StubTransport>) {
        for (name, value) in [
            ("full_name", "Ada Lovelace"),
            ("student_id", "2024A7PS0001"),
            ("email", "ada@example.edu"),
            ("leave_type", "Medical"),
            ("start_date", "2026-10-20"),
            ("end_date", "2026-10-26"),
            ("reason", "Surgery follow-up"),
        ] {
            controller.set_field(name, value).unwrap();
        }
    }

    /// Never answers, like a server that stopped responding.
    struct HangingTransport;

    #[async_trait::async_trait]
    impl SubmissionTransport for HangingTransport {
        async fn submit(&self, _payload: &Map<String, Value>) -> SubmissionOutcome {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_cancelled_submit_releases_in_flight_guard() {
        let theme = ThemeManager::new(
            Box::new(MemoryPreferenceStore::new()),
            Box::new(FixedThemeProbe(false)),
        );
        let mut controller = FormController::new(
            FormSchema::leave_request(),
            Validator::default(),
            theme,
            MemoryView::new(),
            HangingTransport,
        );
        controller.initialize_at(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
        for (name, value) in [
            ("full_name", "Ada Lovelace"),
            ("student_id", "2024A7PS0001"),
            ("email", "ada@example.edu"),
            ("leave_type", "Medical"),
            ("start_date", "2026-10-20"),
            ("end_date", "2026-10-26"),
            ("reason", "Surgery follow-up"),
        ] {
            controller.set_field(name, value).unwrap();
        }

        let abandoned = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            controller.handle_form_submit(),
        )
        .await;
        assert!(abandoned.is_err());
        assert_eq!(controller.state(), SubmissionState::Idle);
        assert!(!controller.view().modal_visible());
    }

    #[test]
    fn test_initialize_hides_errors_and_sets_bounds() {
        let (controller, _) = controller(SubmissionOutcome::Success(Value::Null));
        assert!(!controller.view().errors_visible());
        assert_eq!(
            controller.view().current_date_text(),
            "Saturday, October 17, 2026"
        );
        assert_eq!(controller.state(), SubmissionState::Idle);
    }

    #[test]
    fn test_date_fields_drive_total_days() {
        let (mut controller, _) = controller(SubmissionOutcome::Success(Value::Null));
        fill(&mut controller);
        assert_eq!(controller.fields().get("total_days"), "7");
        assert_eq!(
            controller.dates().end_min(),
            NaiveDate::from_ymd_opt(2026, 10, 20)
        );

        controller.set_field("end_date", "").unwrap();
        assert_eq!(controller.fields().get("total_days"), "");
    }

    #[test]
    fn test_derived_and_unknown_fields_rejected() {
        let (mut controller, _) = controller(SubmissionOutcome::Success(Value::Null));
        assert!(controller.set_field("total_days", "3").is_err());
        assert!(controller.set_field("attachment", "scan.pdf").is_err());
        assert!(matches!(
            controller.set_field("nickname", "x"),
            Err(FormError::UnknownFieldError { .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_transport() {
        let (mut controller, calls) = controller(SubmissionOutcome::Success(Value::Null));
        fill(&mut controller);
        controller.set_field("start_date", "2026-10-28").unwrap();

        let attempt = controller.handle_form_submit().await;
        match attempt {
            SubmitAttempt::Invalid(result) => {
                assert_eq!(result.messages, vec![END_BEFORE_START_MESSAGE]);
            }
            other => panic!("unexpected attempt: {:?}", other),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(controller.view().is_invalid("end_date"));
        assert_eq!(controller.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_success_shows_modal_and_blocks_resubmit() {
        let (mut controller, calls) =
            controller(SubmissionOutcome::Success(serde_json::json!({"id": 1})));
        fill(&mut controller);

        let attempt = controller.handle_form_submit().await;
        assert!(matches!(
            attempt,
            SubmitAttempt::Completed(SubmissionOutcome::Success(_))
        ));
        assert!(controller.view().modal_visible());
        assert!(!controller.view().errors_visible());
        assert_eq!(controller.state(), SubmissionState::AwaitingModalClose);

        let again = controller.handle_form_submit().await;
        assert_eq!(
            again,
            SubmitAttempt::Rejected(SubmissionState::AwaitingModalClose)
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        controller.close_success_modal();
        assert_eq!(controller.state(), SubmissionState::Idle);
        assert!(!controller.view().modal_visible());
        assert!(controller.fields().is_empty());
    }

    #[tokio::test]
    async fn test_network_error_returns_to_idle() {
        let (mut controller, _) =
            controller(SubmissionOutcome::NetworkError("connection refused".to_string()));
        fill(&mut controller);

        controller.handle_form_submit().await;
        assert_eq!(controller.view().errors(), [CONNECT_ERROR_MESSAGE.to_string()]);
        assert!(!controller.view().modal_visible());
        assert_eq!(controller.state(), SubmissionState::Idle);
    }

    #[test]
    fn test_theme_toggle_reflects_on_view() {
        let (mut controller, _) = controller(SubmissionOutcome::Success(Value::Null));
        controller.on_theme_toggled(true);
        assert!(controller.view().root_dark());
        assert_eq!(controller.theme(), ThemePreference::Dark);
    }

    #[test]
    fn test_blocking_submit_with_tokio_test() {
        let (mut controller, calls) = controller(SubmissionOutcome::Success(Value::Null));
        let attempt = tokio_test::block_on(controller.handle_form_submit());
        assert!(matches!(attempt, SubmitAttempt::Invalid(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
