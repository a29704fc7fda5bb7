use crate::domain::model::SubmissionOutcome;
use crate::domain::ports::FormView;

pub const CONNECT_ERROR_MESSAGE: &str =
    "Could not connect to the server. Please check your connection.";

/// Empty list hides the error region; otherwise it replaces whatever was shown.
pub fn display_errors<V: FormView + ?Sized>(view: &mut V, errors: &[String]) {
    if errors.is_empty() {
        view.hide_errors();
    } else {
        view.render_errors(errors);
    }
}

pub fn http_error_message(status: u16, reason: &str) -> String {
    format!("Server error: {} - {}", status, reason)
}

/// The single message shown for a failed submission, `None` on success.
pub fn outcome_message(outcome: &SubmissionOutcome) -> Option<String> {
    match outcome {
        SubmissionOutcome::Success(_) => None,
        SubmissionOutcome::HttpError { status, reason } => {
            Some(http_error_message(*status, reason))
        }
        SubmissionOutcome::NetworkError(_) => Some(CONNECT_ERROR_MESSAGE.to_string()),
    }
}
