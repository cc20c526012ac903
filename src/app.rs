//! Form app: owns the controls, the view and the submitter, and handles form
//! events one at a time.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::form::{FieldId, FormControls};
use crate::resume::ResumeFile;
use crate::submit::{SubmitError, Submitter};
use crate::view::FormView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FormEvent {
    /// The resume input changed; `None` clears the selection.
    ResumeSelected(Option<PathBuf>),
    FieldBlurred(FieldId),
    Submit,
}

/// What handling an event led to.
#[derive(Debug)]
pub(crate) enum EventOutcome {
    Updated,
    /// Submit arrived while a submission was already running.
    Ignored,
    Submitted(Result<(), SubmitError>),
}

pub(crate) struct FormApp {
    controls: FormControls,
    view: FormView,
    submitter: Submitter,
}

impl FormApp {
    pub(crate) fn new(controls: FormControls, view: FormView, submitter: Submitter) -> Self {
        Self {
            controls,
            view,
            submitter,
        }
    }

    pub(crate) fn from_config(config: &Config) -> Self {
        Self::new(
            FormControls::new(),
            FormView::starting_today(config.form.success_hide_after()),
            Submitter::from_config(config),
        )
    }

    pub(crate) fn controls(&self) -> &FormControls {
        &self.controls
    }

    pub(crate) fn controls_mut(&mut self) -> &mut FormControls {
        &mut self.controls
    }

    pub(crate) fn view(&self) -> &FormView {
        &self.view
    }

    pub(crate) async fn handle(&mut self, event: FormEvent) -> Result<EventOutcome> {
        match event {
            FormEvent::ResumeSelected(path) => {
                self.select_resume(path)?;
                Ok(EventOutcome::Updated)
            }
            FormEvent::FieldBlurred(field) => {
                self.view
                    .field_blurred(field, self.controls.value_of(field));
                Ok(EventOutcome::Updated)
            }
            FormEvent::Submit => {
                if !self.view.is_submit_enabled() {
                    tracing::debug!("Submit ignored while a submission is in flight");
                    return Ok(EventOutcome::Ignored);
                }
                let result = self.submitter.submit(&mut self.controls, &self.view).await;
                Ok(EventOutcome::Submitted(result))
            }
        }
    }

    fn select_resume(&mut self, path: Option<PathBuf>) -> Result<()> {
        let file = match path {
            Some(path) => Some(
                ResumeFile::select(&path)
                    .with_context(|| format!("Could not open resume {}", path.display()))?,
            ),
            None => None,
        };

        self.view
            .set_resume_label(file.as_ref().map(|f| f.name.as_str()));
        self.controls.resume = file;
        Ok(())
    }
}
