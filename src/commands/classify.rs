use crate::commands::render;
use crate::config::ClassifierConfig;
use crate::error::AppError;
use crate::models::classify_types::ClassificationResult;
use crate::services::classifier::client::ClassifierClient;
use crate::services::classifier::lookup;
use crate::services::fs_service;
use crate::services::workflow::{UploadClassifyWorkflow, WorkflowState};
use serde::Serialize;
use std::path::PathBuf;

/// Classifies each image in turn, the way a user would pick an image, press
/// "Detect Disease", read the result and then change the image.
///
/// Returns `true` when every image ended with a classification. A path that
/// cannot be loaded ends as that image's error and the run carries on.
pub async fn classify_images(
    config: &ClassifierConfig,
    paths: &[PathBuf],
    json: bool,
) -> Result<bool, AppError> {
    let client = ClassifierClient::new(config);
    let mut workflow = UploadClassifyWorkflow::new(config);
    let mut all_classified = true;

    for path in paths {
        match fs_service::load_selected_file(path, config.max_upload_bytes).await {
            // A rejected file leaves its validation message as the error.
            Ok(file) => {
                if workflow.select_file(file).is_ok() {
                    workflow.submit(&client).await?;
                }
            }
            Err(err) => workflow.reject_candidate(&err)?,
        }

        let view = workflow.view();
        if json {
            println!("{}", to_json(&view, false)?);
        } else {
            print!("{}", render::render_view(&view));
            println!();
        }
        workflow.mark_preview_displayed();

        if workflow.state() != WorkflowState::Result {
            tracing::debug!(path = %path.display(), "image did not classify");
            all_classified = false;
        }

        // "Clear All" between images.
        workflow.clear_all()?;
    }

    Ok(all_classified)
}

/// Shows the advice for a label without contacting the classifier.
pub fn show_advice(label: &str, confidence: f64, json: bool) -> Result<(), AppError> {
    let presentation = lookup::present(&ClassificationResult {
        class_name: label.to_string(),
        confidence,
    });

    if json {
        println!("{}", to_json(&presentation, true)?);
    } else {
        print!("{}", render::render_presentation(&presentation));
    }
    Ok(())
}

/// Encodes our own output. Failures here are local, so they are not routed
/// through `From<serde_json::Error>`, which is kept for backend bodies.
fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, AppError> {
    let encoded = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    encoded.map_err(|e| AppError::Output(e.to_string()))
}
