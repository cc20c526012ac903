//! Visible form state: message panel, submit button, resume label and
//! required-field highlights.
//!
//! `FormView` is a cheap handle; clones share the same state. The success
//! auto-hide timer runs as a tokio task holding its own handle.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::NaiveDate;

use crate::form::FieldId;

pub(crate) const SUBMIT_LABEL: &str = "Submit Application";
pub(crate) const SUBMITTING_LABEL: &str = "Submitting...";
pub(crate) const RESUME_PLACEHOLDER_LABEL: &str = "Choose File - Resume/CV";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SubmitButton {
    pub enabled: bool,
    pub label: String,
}

impl Default for SubmitButton {
    fn default() -> Self {
        Self {
            enabled: true,
            label: SUBMIT_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct MessagePanel {
    pub visible: bool,
    pub success_visible: bool,
    pub error_visible: bool,
    pub error_text: String,
    /// Bumped on every show; a pending auto-hide only fires if it still matches.
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResumeLabel {
    pub text: String,
    pub selected: bool,
}

impl Default for ResumeLabel {
    fn default() -> Self {
        Self {
            text: RESUME_PLACEHOLDER_LABEL.to_string(),
            selected: false,
        }
    }
}

/// Snapshot of everything the user can see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ViewState {
    pub submit_button: SubmitButton,
    pub message: MessagePanel,
    pub resume_label: ResumeLabel,
    pub highlighted: BTreeSet<FieldId>,
    pub start_date_min: NaiveDate,
}

#[derive(Debug, Clone)]
pub(crate) struct FormView {
    state: Arc<Mutex<ViewState>>,
    success_hide_after: Duration,
}

impl FormView {
    pub(crate) fn new(start_date_min: NaiveDate, success_hide_after: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(ViewState {
                submit_button: SubmitButton::default(),
                message: MessagePanel::default(),
                resume_label: ResumeLabel::default(),
                highlighted: BTreeSet::new(),
                start_date_min,
            })),
            success_hide_after,
        }
    }

    /// View whose start date minimum is today's local date.
    pub(crate) fn starting_today(success_hide_after: Duration) -> Self {
        Self::new(chrono::Local::now().date_naive(), success_hide_after)
    }

    fn lock(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) fn snapshot(&self) -> ViewState {
        self.lock().clone()
    }

    pub(crate) fn start_date_min(&self) -> NaiveDate {
        self.lock().start_date_min
    }

    pub(crate) fn is_submit_enabled(&self) -> bool {
        self.lock().submit_button.enabled
    }

    pub(crate) fn begin_submitting(&self) {
        let mut state = self.lock();
        state.submit_button = SubmitButton {
            enabled: false,
            label: SUBMITTING_LABEL.to_string(),
        };
    }

    pub(crate) fn finish_submitting(&self) {
        self.lock().submit_button = SubmitButton::default();
    }

    /// Show the success message and schedule it to hide.
    ///
    /// Must be called from within a tokio runtime.
    pub(crate) fn show_success(&self) {
        let generation = {
            let mut state = self.lock();
            let message = &mut state.message;
            message.generation += 1;
            message.visible = true;
            message.success_visible = true;
            message.error_visible = false;
            message.generation
        };

        let view = self.clone();
        let delay = self.success_hide_after;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            view.hide_success_if_current(generation);
        });
    }

    fn hide_success_if_current(&self, generation: u64) {
        let mut state = self.lock();
        let message = &mut state.message;
        if message.generation == generation {
            message.success_visible = false;
            message.visible = false;
        }
    }

    pub(crate) fn show_error(&self, text: impl Into<String>) {
        let mut state = self.lock();
        let message = &mut state.message;
        message.generation += 1;
        message.visible = true;
        message.success_visible = false;
        message.error_visible = true;
        message.error_text = text.into();
    }

    pub(crate) fn set_resume_label(&self, file_name: Option<&str>) {
        self.lock().resume_label = match file_name {
            Some(name) => ResumeLabel {
                text: format!("📄 {name}"),
                selected: true,
            },
            None => ResumeLabel::default(),
        };
    }

    /// Mark a required field that lost focus while empty; clear the mark otherwise.
    pub(crate) fn field_blurred(&self, field: FieldId, value: &str) -> bool {
        let mut state = self.lock();
        let flag = field.is_required() && value.is_empty();
        if flag {
            state.highlighted.insert(field);
        } else {
            state.highlighted.remove(&field);
        }
        flag
    }

    pub(crate) fn clear_highlights(&self) {
        self.lock().highlighted.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_with_delay(ms: u64) -> FormView {
        FormView::new(
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            Duration::from_millis(ms),
        )
    }

    #[test]
    fn test_initial_state() {
        let view = view_with_delay(5_000);
        let state = view.snapshot();
        assert!(state.submit_button.enabled);
        assert_eq!(state.submit_button.label, SUBMIT_LABEL);
        assert!(!state.message.visible);
        assert_eq!(state.resume_label.text, RESUME_PLACEHOLDER_LABEL);
        assert!(state.highlighted.is_empty());
    }

    #[test]
    fn test_busy_state_round_trip() {
        let view = view_with_delay(5_000);
        view.begin_submitting();
        let busy = view.snapshot().submit_button;
        assert!(!busy.enabled);
        assert_eq!(busy.label, SUBMITTING_LABEL);

        view.finish_submitting();
        assert_eq!(view.snapshot().submit_button, SubmitButton::default());
    }

    #[test]
    fn test_error_replaces_success() {
        let view = view_with_delay(5_000);
        view.show_error("Server error: 500 - Unknown error");
        let message = view.snapshot().message;
        assert!(message.visible && message.error_visible && !message.success_visible);
        assert_eq!(message.error_text, "Server error: 500 - Unknown error");
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_hides_after_five_seconds() {
        let view = view_with_delay(5_000);
        view.show_success();
        assert!(view.snapshot().message.success_visible);

        tokio::time::sleep(Duration::from_millis(4_999)).await;
        assert!(view.snapshot().message.success_visible);

        tokio::time::sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        let message = view.snapshot().message;
        assert!(!message.success_visible);
        assert!(!message.visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_later_error_survives_stale_hide_timer() {
        let view = view_with_delay(5_000);
        view.show_success();
        tokio::time::sleep(Duration::from_millis(1_000)).await;
        view.show_error("Failed to submit application: offline");

        tokio::time::sleep(Duration::from_millis(10_000)).await;
        tokio::task::yield_now().await;
        let message = view.snapshot().message;
        assert!(message.visible);
        assert!(message.error_visible);
    }

    #[test]
    fn test_resume_label() {
        let view = view_with_delay(5_000);
        view.set_resume_label(Some("cv.pdf"));
        let label = view.snapshot().resume_label;
        assert_eq!(label.text, "📄 cv.pdf");
        assert!(label.selected);

        view.set_resume_label(None);
        assert_eq!(view.snapshot().resume_label, ResumeLabel::default());
    }

    #[test]
    fn test_blur_highlights_required_fields_only() {
        let view = view_with_delay(5_000);
        assert!(view.field_blurred(FieldId::Email, ""));
        assert!(!view.field_blurred(FieldId::DriverLicense, ""));
        assert!(!view.field_blurred(FieldId::Language, " "));
        assert!(view.snapshot().highlighted.contains(&FieldId::Email));

        assert!(!view.field_blurred(FieldId::Email, "a@b.c"));
        assert!(view.snapshot().highlighted.is_empty());
    }
}
