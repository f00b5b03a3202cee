use crate::models::classify_types::Presentation;
use crate::models::view_types::{WorkflowView, HELP_STEPS};
use std::fmt::Write;

const RULE: &str = "----------------------------------------";

pub fn render_presentation(p: &Presentation) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Analysis Results");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{}  {}  [{}]", p.disease_name, p.confidence, p.color);
    let _ = writeln!(out, "{}", p.severity_text);
    let _ = writeln!(out, "{}", confidence_bar(p.bar.width_percent));
    let _ = writeln!(out);
    let _ = writeln!(out, "About this condition:");
    let _ = writeln!(out, "  {}", p.info.description);
    let _ = writeln!(out);
    let _ = writeln!(out, "Recommended actions:");
    for item in p.info.recommendations.iter() {
        let _ = writeln!(out, "  - {item}");
    }
    out
}

pub fn render_view(view: &WorkflowView) -> String {
    let mut out = String::new();

    if let Some(name) = &view.file_name {
        let _ = writeln!(out, "Image: {name}");
    }
    let _ = writeln!(
        out,
        "Binary leaf filter: {}",
        if view.use_binary_filter { "on" } else { "off" }
    );

    if let Some(error) = &view.error {
        let _ = writeln!(out, "Error: {error}");
    }

    if let Some(result) = &view.result {
        let _ = writeln!(out);
        out.push_str(&render_presentation(result));
    }

    if view.show_help {
        let _ = writeln!(out, "How to use:");
        for (i, step) in HELP_STEPS.iter().enumerate() {
            let _ = writeln!(out, "  {}. {step}", i + 1);
        }
    }
    out
}

fn confidence_bar(width_percent: f64) -> String {
    const CELLS: usize = 30;
    let filled = ((width_percent.clamp(0.0, 100.0) / 100.0) * CELLS as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), " ".repeat(CELLS - filled))
}
