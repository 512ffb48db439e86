//! Form controller
//!
//! Holds the two form fields and the result of the last submission, and
//! walks the `Idle -> Requesting -> Ready | Failed` state machine. Only one
//! request may be in flight per controller; a second submission while
//! `Requesting` is refused rather than queued.

use crate::backend::{BackendError, GenerationRequest, NotesBackend};
use crate::content_model::{ContentModel, ValidationError};
use crate::docx_exporter::{self, ExportError};
use crate::html_preview;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Submit caption while idle
pub const SUBMIT_LABEL: &str = "Generate Notes";

/// Submit caption while a request is in flight
pub const BUSY_LABEL: &str = "Generating...";

/// Errors that can occur when driving the form
#[derive(Error, Debug)]
pub enum ControllerError {
    /// A request is already in flight
    #[error("A generation request is already in progress")]
    AlreadyRequesting,

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Where the form is in its request cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPhase {
    /// Nothing submitted yet
    Idle,
    /// A request is in flight; submit is disabled
    Requesting,
    /// The backend answered; the answer may still have failed validation
    Ready,
    /// The request itself failed
    Failed(String),
}

/// State behind the notes form
#[derive(Debug)]
pub struct FormController {
    language: String,
    topic: String,
    phase: FormPhase,
    /// Validation outcome of the last answer, replaced wholesale on each one
    result: Option<Result<ContentModel, ValidationError>>,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    pub fn new() -> Self {
        Self {
            language: String::new(),
            topic: String::new(),
            phase: FormPhase::Idle,
            result: None,
        }
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    /// The current model, if the last answer was valid
    pub fn model(&self) -> Option<&ContentModel> {
        self.result.as_ref().and_then(|r| r.as_ref().ok())
    }

    /// Validation outcome of the last answer, if any
    pub fn result(&self) -> Option<&Result<ContentModel, ValidationError>> {
        self.result.as_ref()
    }

    /// Submit is disabled only while a request is in flight
    pub fn can_submit(&self) -> bool {
        self.phase != FormPhase::Requesting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.can_submit() {
            SUBMIT_LABEL
        } else {
            BUSY_LABEL
        }
    }

    /// Export is offered only for a valid answer
    pub fn export_available(&self) -> bool {
        self.phase == FormPhase::Ready && self.model().is_some()
    }

    /// Start a submission and return the request to send
    ///
    /// # Returns
    /// * `Ok(GenerationRequest)` - The form fields; the controller is now `Requesting`
    /// * `Err(ControllerError::AlreadyRequesting)` - Another request is in flight
    pub fn begin_submit(&mut self) -> Result<GenerationRequest, ControllerError> {
        if !self.can_submit() {
            return Err(ControllerError::AlreadyRequesting);
        }

        self.phase = FormPhase::Requesting;
        log::info!(
            "Requesting notes: language={:?} topic={:?}",
            self.language,
            self.topic
        );
        Ok(GenerationRequest::new(self.language.clone(), self.topic.clone()))
    }

    /// Finish the in-flight submission with the backend's outcome
    pub fn complete(&mut self, outcome: Result<Value, BackendError>) {
        if self.phase != FormPhase::Requesting {
            log::warn!("Ignoring a response that arrived with no request in flight");
            return;
        }

        match outcome {
            Ok(value) => {
                let validated = ContentModel::validate(&value);
                match &validated {
                    Ok(model) => log::info!(
                        "Received '{}': {} sections, {} points",
                        model.title(),
                        model.topics().len(),
                        model.point_count()
                    ),
                    Err(e) => log::error!("Invalid response format ({}): {}", e, value),
                }
                self.result = Some(validated);
                self.phase = FormPhase::Ready;
            }
            Err(e) => {
                log::error!("Generation request failed: {}", e);
                self.result = None;
                self.phase = FormPhase::Failed(e.to_string());
            }
        }
    }

    /// Send the form to `backend` and record the outcome
    ///
    /// Whatever happens, the controller ends in a state that accepts a new
    /// submission.
    pub async fn submit(&mut self, backend: &dyn NotesBackend) -> Result<&FormPhase, ControllerError> {
        let request = self.begin_submit()?;
        let outcome = backend.generate(&request).await;
        self.complete(outcome);
        Ok(&self.phase)
    }

    /// Preview HTML for the current result
    pub fn preview_html(&self) -> String {
        html_preview::preview(self.result.as_ref())
    }

    /// Export the current model to `out_dir`
    pub fn export(&self, out_dir: &Path) -> Result<PathBuf, ControllerError> {
        let model = if self.export_available() {
            self.model()
        } else {
            None
        };
        Ok(docx_exporter::export(model, out_dir)?)
    }
}
