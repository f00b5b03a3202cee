//! The upload → classify → render workflow behind the classifier form.
//!
//! All state lives in [`UploadClassifyWorkflow`]. The error and the result are
//! held in one slot so they can never be shown together, and the preview
//! handle sits next to the file it was made from so both are replaced and
//! cleared together.

use crate::config::ClassifierConfig;
use crate::error::AppError;
use crate::models::classify_types::ClassificationResult;
use crate::models::upload_types::SelectedFile;
use crate::models::view_types::{WorkflowPhase, WorkflowView};
use crate::services::classifier::client::{ClassifierClient, ClassifyRequest};
use crate::services::classifier::lookup;
use crate::services::preview::{PreviewHandle, PreviewTracker};
use crate::services::validation;

#[derive(Debug)]
enum Outcome {
    None,
    Result(ClassificationResult),
    Error(String),
}

#[derive(Debug)]
struct Selection {
    file: SelectedFile,
    preview: PreviewHandle,
}

/// Where the workflow is, as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    FileSelected,
    Submitting,
    Result,
    Error,
}

pub struct UploadClassifyWorkflow {
    selection: Option<Selection>,
    outcome: Outcome,
    loading: bool,
    use_binary_filter: bool,
    drag_active: bool,
    max_upload_bytes: u64,
    previews: PreviewTracker,
}

impl UploadClassifyWorkflow {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self::with_tracker(config, PreviewTracker::new())
    }

    pub fn with_tracker(config: &ClassifierConfig, previews: PreviewTracker) -> Self {
        Self {
            selection: None,
            outcome: Outcome::None,
            loading: false,
            use_binary_filter: config.use_binary_filter,
            drag_active: false,
            max_upload_bytes: config.max_upload_bytes,
            previews,
        }
    }

    pub fn state(&self) -> WorkflowState {
        if self.loading {
            return WorkflowState::Submitting;
        }
        match (&self.outcome, &self.selection) {
            (Outcome::Error(_), _) => WorkflowState::Error,
            (Outcome::Result(_), _) => WorkflowState::Result,
            (Outcome::None, Some(_)) => WorkflowState::FileSelected,
            (Outcome::None, None) => WorkflowState::Idle,
        }
    }

    pub fn phase(&self) -> WorkflowPhase {
        if self.loading {
            WorkflowPhase::Loading
        } else {
            WorkflowPhase::Idle
        }
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selection.as_ref().map(|s| &s.file)
    }

    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.selection.as_ref().map(|s| &s.preview)
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        match &self.outcome {
            Outcome::Result(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn use_binary_filter(&self) -> bool {
        self.use_binary_filter
    }

    pub fn drag_active(&self) -> bool {
        self.drag_active
    }

    fn ensure_idle(&self) -> Result<(), AppError> {
        if self.loading {
            return Err(AppError::Busy);
        }
        Ok(())
    }

    fn fail(&mut self, err: &AppError) {
        self.outcome = Outcome::Error(err.message());
    }

    /// Picker path. A rejected file leaves the current selection in place
    /// and shows the validation message instead.
    pub fn select_file(&mut self, candidate: SelectedFile) -> Result<(), AppError> {
        self.ensure_idle()?;
        self.outcome = Outcome::None;

        if let Err(err) = validation::validate_image_file(&candidate, self.max_upload_bytes) {
            tracing::debug!(file = %candidate.file_name, mime = %candidate.mime_type, size = candidate.size(), "rejected upload: {err}");
            self.fail(&err);
            return Err(err);
        }

        // Retire the old preview before the new one exists.
        if let Some(mut old) = self.selection.take() {
            old.preview.release();
        }
        let preview = self.previews.acquire(&candidate);
        tracing::debug!(file = %candidate.file_name, size = candidate.size(), "file selected");
        self.selection = Some(Selection {
            file: candidate,
            preview,
        });
        Ok(())
    }

    /// A candidate that failed before it could be handed to `select_file`,
    /// e.g. an unreadable path. Shown like a rejected file.
    pub fn reject_candidate(&mut self, err: &AppError) -> Result<(), AppError> {
        self.ensure_idle()?;
        tracing::debug!("rejected candidate: {err}");
        self.fail(err);
        Ok(())
    }

    /// Drop path. Only the first dropped file is considered.
    pub fn drop_files(&mut self, files: Vec<SelectedFile>) -> Result<(), AppError> {
        self.ensure_idle()?;
        self.drag_active = false;
        match files.into_iter().next() {
            Some(first) => self.select_file(first),
            None => Ok(()),
        }
    }

    pub fn drag_enter(&mut self) {
        if !self.loading {
            self.drag_active = true;
        }
    }

    pub fn drag_over(&mut self) {
        self.drag_enter();
    }

    pub fn drag_leave(&mut self) {
        if !self.loading {
            self.drag_active = false;
        }
    }

    /// Discards file, preview, result and error together.
    pub fn remove_image(&mut self) -> Result<(), AppError> {
        self.ensure_idle()?;
        if let Some(mut old) = self.selection.take() {
            old.preview.release();
        }
        self.outcome = Outcome::None;
        tracing::debug!("selection cleared");
        Ok(())
    }

    pub fn clear_all(&mut self) -> Result<(), AppError> {
        self.remove_image()
    }

    pub fn set_use_binary_filter(&mut self, enabled: bool) -> Result<(), AppError> {
        self.ensure_idle()?;
        self.use_binary_filter = enabled;
        Ok(())
    }

    pub fn dismiss_error(&mut self) -> Result<(), AppError> {
        self.ensure_idle()?;
        if matches!(self.outcome, Outcome::Error(_)) {
            self.outcome = Outcome::None;
        }
        Ok(())
    }

    /// The preview has been shown once; its bytes are no longer needed.
    pub fn mark_preview_displayed(&mut self) {
        if let Some(selection) = self.selection.as_mut() {
            selection.preview.release();
        }
    }

    /// Enters Loading and returns the request to send. With no file the
    /// precondition error is recorded and nothing is returned.
    pub fn begin_submit(&mut self) -> Result<ClassifyRequest, AppError> {
        self.ensure_idle()?;

        let Some(selection) = self.selection.as_ref() else {
            let err = AppError::NoFileSelected;
            self.fail(&err);
            return Err(err);
        };

        let request = ClassifyRequest {
            file_name: selection.file.file_name.clone(),
            mime_type: selection.file.mime_type.clone(),
            bytes: selection.file.bytes.clone(),
            use_binary_filter: self.use_binary_filter,
        };

        self.outcome = Outcome::None;
        self.loading = true;
        tracing::info!(file = %request.file_name, use_binary_filter = request.use_binary_filter, "submitting for classification");
        Ok(request)
    }

    /// Leaves Loading and records the outcome of the request started by
    /// [`Self::begin_submit`].
    pub fn complete_submit(&mut self, outcome: Result<ClassificationResult, AppError>) {
        self.loading = false;
        match outcome {
            Ok(result) => {
                tracing::info!(class = %result.class_name, confidence = result.confidence, "classification received");
                self.outcome = Outcome::Result(result);
            }
            Err(err) => {
                tracing::warn!(kind = err.kind(), "classification failed: {err}");
                self.fail(&err);
            }
        }
    }

    pub async fn submit(&mut self, client: &ClassifierClient) -> Result<(), AppError> {
        let request = self.begin_submit()?;
        let outcome = client.classify(request).await;
        self.complete_submit(outcome);
        Ok(())
    }

    pub fn view(&self) -> WorkflowView {
        let has_file = self.selection.is_some();
        let error = self.error().map(str::to_string);
        let result = match (&self.outcome, &error) {
            (Outcome::Result(result), None) => Some(lookup::present(result)),
            _ => None,
        };

        WorkflowView {
            phase: self.phase(),
            show_drop_zone: !has_file,
            drop_zone_text: if self.drag_active {
                "Drop your tomato leaf image here"
            } else {
                "Drag & drop your image here or"
            },
            file_name: self.selected_file().map(|f| f.file_name.clone()),
            preview_url: self
                .preview()
                .and_then(|p| p.url())
                .map(str::to_string),
            use_binary_filter: self.use_binary_filter,
            controls_disabled: self.loading,
            submit_enabled: has_file && !self.loading,
            submit_label: if self.loading { "Analyzing..." } else { "Detect Disease" },
            show_clear_all: has_file && !self.loading,
            show_help: !has_file && error.is_none() && result.is_none(),
            error,
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::validation::{INVALID_TYPE_MESSAGE, TOO_LARGE_MESSAGE};
    use pretty_assertions::assert_eq;

    fn png(name: &str) -> SelectedFile {
        SelectedFile::new(name, "image/png", vec![1, 2, 3])
    }

    fn workflow() -> (UploadClassifyWorkflow, PreviewTracker) {
        let tracker = PreviewTracker::new();
        let wf = UploadClassifyWorkflow::with_tracker(&ClassifierConfig::default(), tracker.clone());
        (wf, tracker)
    }

    fn late_blight() -> ClassificationResult {
        ClassificationResult {
            class_name: "Tomato_Late_blight".to_string(),
            confidence: 0.957,
        }
    }

    fn assert_exclusive(wf: &UploadClassifyWorkflow) {
        assert!(!(wf.result().is_some() && wf.error().is_some()));
    }

    #[test]
    fn starts_idle_with_help() {
        let (wf, _) = workflow();
        assert_eq!(wf.state(), WorkflowState::Idle);
        let view = wf.view();
        assert!(view.show_drop_zone);
        assert!(view.show_help);
        assert!(!view.submit_enabled);
        assert!(view.use_binary_filter);
    }

    #[test]
    fn valid_file_is_selected_with_a_preview() {
        let (mut wf, tracker) = workflow();
        wf.select_file(png("leaf.png")).unwrap();

        assert_eq!(wf.state(), WorkflowState::FileSelected);
        assert_eq!(tracker.live_count(), 1);
        let view = wf.view();
        assert!(!view.show_drop_zone);
        assert!(view.preview_url.unwrap().starts_with("data:image/png;base64,"));
        assert!(view.submit_enabled);
        assert!(view.show_clear_all);
    }

    #[test]
    fn wrong_type_keeps_current_file() {
        let (mut wf, _) = workflow();
        wf.select_file(png("first.png")).unwrap();

        let err = wf
            .select_file(SelectedFile::new("doc.pdf", "application/pdf", vec![0]))
            .unwrap_err();
        assert_eq!(err.message(), INVALID_TYPE_MESSAGE);
        assert_eq!(wf.error(), Some(INVALID_TYPE_MESSAGE));
        assert_eq!(wf.selected_file().unwrap().file_name, "first.png");
    }

    #[test]
    fn oversized_file_is_rejected() {
        let (mut wf, tracker) = workflow();
        let big = SelectedFile::new("big.jpg", "image/jpeg", vec![0; 2 * 1024 * 1024 + 1]);
        wf.select_file(big).unwrap_err();
        assert_eq!(wf.error(), Some(TOO_LARGE_MESSAGE));
        assert!(wf.selected_file().is_none());
        assert_eq!(tracker.live_count(), 0);
    }

    #[test]
    fn unreadable_candidate_keeps_the_selection() {
        let (mut wf, tracker) = workflow();
        wf.select_file(png("a.png")).unwrap();

        wf.reject_candidate(&AppError::Io("Failed to read b.png".to_string()))
            .unwrap();
        assert_eq!(wf.state(), WorkflowState::Error);
        assert_eq!(wf.error(), Some("Failed to read b.png"));
        assert_eq!(wf.selected_file().unwrap().file_name, "a.png");
        assert_eq!(tracker.live_count(), 1);
    }

    #[test]
    fn replacing_a_file_releases_the_old_preview() {
        let (mut wf, tracker) = workflow();
        wf.select_file(png("a.png")).unwrap();
        let first_id = wf.preview().unwrap().id();
        wf.select_file(png("b.png")).unwrap();

        assert_eq!(tracker.live_count(), 1);
        assert_ne!(wf.preview().unwrap().id(), first_id);
    }

    #[test]
    fn new_file_clears_a_shown_result() {
        let (mut wf, _) = workflow();
        wf.select_file(png("a.png")).unwrap();
        wf.begin_submit().unwrap();
        wf.complete_submit(Ok(late_blight()));
        assert_eq!(wf.state(), WorkflowState::Result);

        wf.select_file(png("b.png")).unwrap();
        assert!(wf.result().is_none());
        assert!(wf.error().is_none());
        assert_eq!(wf.state(), WorkflowState::FileSelected);
    }

    #[test]
    fn rejected_file_replaces_a_shown_result_with_the_error() {
        let (mut wf, _) = workflow();
        wf.select_file(png("a.png")).unwrap();
        wf.begin_submit().unwrap();
        wf.complete_submit(Ok(late_blight()));

        wf.select_file(SelectedFile::new("a.gif", "image/gif", vec![0])).unwrap_err();
        assert!(wf.result().is_none());
        assert_eq!(wf.error(), Some(INVALID_TYPE_MESSAGE));
        assert_exclusive(&wf);
    }

    #[test]
    fn submit_without_file_fails_immediately() {
        let (mut wf, _) = workflow();
        let err = wf.begin_submit().unwrap_err();
        assert_eq!(err.message(), "Please upload an image first.");
        assert_eq!(wf.error(), Some("Please upload an image first."));
        assert_eq!(wf.phase(), WorkflowPhase::Idle);
    }

    #[test]
    fn loading_disables_every_control() {
        let (mut wf, _) = workflow();
        wf.select_file(png("a.png")).unwrap();
        let request = wf.begin_submit().unwrap();
        assert_eq!(request.file_name, "a.png");
        assert!(request.use_binary_filter);

        assert_eq!(wf.state(), WorkflowState::Submitting);
        assert!(matches!(wf.select_file(png("b.png")), Err(AppError::Busy)));
        assert!(matches!(wf.drop_files(vec![png("c.png")]), Err(AppError::Busy)));
        assert!(matches!(wf.remove_image(), Err(AppError::Busy)));
        assert!(matches!(wf.set_use_binary_filter(false), Err(AppError::Busy)));
        assert!(matches!(wf.begin_submit(), Err(AppError::Busy)));
        wf.drag_enter();
        assert!(!wf.drag_active());

        let view = wf.view();
        assert!(view.controls_disabled);
        assert!(!view.submit_enabled);
        assert!(!view.show_clear_all);
        assert_eq!(view.submit_label, "Analyzing...");
        assert_eq!(wf.selected_file().unwrap().file_name, "a.png");
        assert!(wf.use_binary_filter());
    }

    #[test]
    fn failed_submission_shows_the_error_and_allows_resubmit() {
        let (mut wf, _) = workflow();
        wf.select_file(png("a.png")).unwrap();
        wf.begin_submit().unwrap();
        wf.complete_submit(Err(AppError::Timeout));

        assert_eq!(wf.state(), WorkflowState::Error);
        assert_eq!(wf.error(), Some("Request timed out. Please try again."));

        wf.begin_submit().unwrap();
        assert!(wf.error().is_none());
        wf.complete_submit(Ok(late_blight()));
        assert_eq!(wf.state(), WorkflowState::Result);
        assert_exclusive(&wf);
    }

    #[test]
    fn result_view_carries_the_presentation() {
        let (mut wf, _) = workflow();
        wf.select_file(png("a.png")).unwrap();
        wf.begin_submit().unwrap();
        wf.complete_submit(Ok(late_blight()));

        let view = wf.view();
        let result = view.result.unwrap();
        assert_eq!(result.disease_name, "Late Blight");
        assert_eq!(result.confidence, "95.7%");
        assert!(!view.show_help);
        assert!(view.error.is_none());
    }

    #[test]
    fn clear_all_empties_everything() {
        let (mut wf, tracker) = workflow();
        wf.select_file(png("a.png")).unwrap();
        wf.begin_submit().unwrap();
        wf.complete_submit(Ok(late_blight()));

        wf.clear_all().unwrap();
        assert!(wf.selected_file().is_none());
        assert!(wf.preview().is_none());
        assert!(wf.result().is_none());
        assert!(wf.error().is_none());
        assert_eq!(tracker.live_count(), 0);
        assert_eq!(wf.state(), WorkflowState::Idle);
    }

    #[test]
    fn filter_flag_survives_file_changes() {
        let (mut wf, _) = workflow();
        wf.set_use_binary_filter(false).unwrap();
        wf.select_file(png("a.png")).unwrap();
        wf.remove_image().unwrap();
        wf.select_file(png("b.png")).unwrap();
        assert!(!wf.begin_submit().unwrap().use_binary_filter);
    }

    #[test]
    fn drop_takes_the_first_file_and_clears_the_highlight() {
        let (mut wf, _) = workflow();
        wf.drag_enter();
        assert_eq!(wf.view().drop_zone_text, "Drop your tomato leaf image here");

        wf.drop_files(vec![png("first.png"), png("second.png")]).unwrap();
        assert!(!wf.drag_active());
        assert_eq!(wf.selected_file().unwrap().file_name, "first.png");

        wf.drop_files(Vec::new()).unwrap();
        assert_eq!(wf.selected_file().unwrap().file_name, "first.png");
    }

    #[test]
    fn drag_leave_clears_the_highlight() {
        let (mut wf, _) = workflow();
        wf.drag_over();
        assert!(wf.drag_active());
        wf.drag_leave();
        assert!(!wf.drag_active());
    }

    #[test]
    fn dismiss_only_touches_the_error() {
        let (mut wf, _) = workflow();
        wf.select_file(png("a.png")).unwrap();
        wf.begin_submit().unwrap();
        wf.complete_submit(Err(AppError::Transport("connection refused".into())));

        wf.dismiss_error().unwrap();
        assert!(wf.error().is_none());
        assert_eq!(wf.selected_file().unwrap().file_name, "a.png");
        assert_eq!(wf.state(), WorkflowState::FileSelected);
    }

    #[test]
    fn displayed_preview_is_released_but_file_stays() {
        let (mut wf, tracker) = workflow();
        wf.select_file(png("a.png")).unwrap();
        wf.mark_preview_displayed();
        wf.mark_preview_displayed();

        assert_eq!(tracker.live_count(), 0);
        assert!(wf.preview().is_some());
        assert!(wf.view().preview_url.is_none());
        assert!(wf.selected_file().is_some());

        wf.remove_image().unwrap();
        assert_eq!(tracker.live_count(), 0);
    }

    #[test]
    fn dropping_the_workflow_releases_the_preview() {
        let (mut wf, tracker) = workflow();
        wf.select_file(png("a.png")).unwrap();
        drop(wf);
        assert_eq!(tracker.live_count(), 0);
    }
}
