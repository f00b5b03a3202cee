use crate::models::classify_types::Presentation;
use serde::Serialize;

pub const HELP_STEPS: [&str; 3] = [
    "Upload a clear photo of a tomato leaf",
    "Click \"Detect Disease\" to detect diseases",
    "View results and treatment recommendations",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowPhase {
    Idle,
    Loading,
}

/// Snapshot of what the classifier form shows at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowView {
    pub phase: WorkflowPhase,
    pub show_drop_zone: bool,
    pub drop_zone_text: &'static str,
    pub file_name: Option<String>,
    pub preview_url: Option<String>,
    pub use_binary_filter: bool,
    pub controls_disabled: bool,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub show_clear_all: bool,
    pub error: Option<String>,
    pub result: Option<Presentation>,
    pub show_help: bool,
}
