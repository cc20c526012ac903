//! Application submission
//!
//! One submit runs: size check -> busy -> collect (encodes the resume) -> one
//! webhook request -> success or error message -> idle. The busy state is left
//! on every path, including when the submission future is dropped.

use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use crate::api::{ApiError, WebhookClient};
use crate::config::Config;
use crate::form::{self, FormControls};
use crate::resume::ResumeError;
use crate::view::FormView;

/// Everything that can stop an application from being accepted.
///
/// The display text is what the error message panel shows.
#[derive(Error, Debug)]
pub(crate) enum SubmitError {
    #[error(transparent)]
    Resume(#[from] ResumeError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SubmitError {
    pub(crate) fn is_oversize(&self) -> bool {
        matches!(self, SubmitError::Resume(ResumeError::TooLarge { .. }))
    }
}

/// Re-enables the submit button when dropped.
struct BusyGuard<'a> {
    view: &'a FormView,
}

impl<'a> BusyGuard<'a> {
    fn enter(view: &'a FormView) -> Self {
        view.begin_submitting();
        Self { view }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.view.finish_submitting();
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Submitter {
    client: WebhookClient,
    max_resume_bytes: u64,
}

impl Submitter {
    pub(crate) fn new(client: WebhookClient, max_resume_bytes: u64) -> Self {
        Self {
            client,
            max_resume_bytes,
        }
    }

    pub(crate) fn from_config(config: &Config) -> Self {
        Self::new(
            WebhookClient::new(&config.webhook),
            config.form.max_resume_bytes,
        )
    }

    /// Submit the form once, reflecting the outcome in `view`.
    ///
    /// On success the form is reset. The returned error has already been shown.
    pub(crate) async fn submit(
        &self,
        controls: &mut FormControls,
        view: &FormView,
    ) -> Result<(), SubmitError> {
        let span = tracing::info_span!("submission", id = %Uuid::new_v4());
        async {
            if let Some(resume) = &controls.resume {
                if let Err(err) = resume.ensure_within(self.max_resume_bytes) {
                    tracing::warn!(
                        size = resume.size,
                        limit = self.max_resume_bytes,
                        "Resume too large"
                    );
                    view.show_error(err.to_string());
                    return Err(SubmitError::from(err));
                }
            }

            let _busy = BusyGuard::enter(view);
            tracing::info!(url = self.client.url(), "Submitting application");

            match self.send(controls).await {
                Ok(()) => {
                    view.show_success();
                    controls.reset();
                    view.set_resume_label(None);
                    view.clear_highlights();
                    Ok(())
                }
                Err(err) => {
                    tracing::error!(error = %err, "Error submitting form");
                    view.show_error(err.to_string());
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn send(&self, controls: &FormControls) -> Result<(), SubmitError> {
        let payload = form::collect(controls).await?;
        self.client.post_application(&payload).await?;
        Ok(())
    }
}
