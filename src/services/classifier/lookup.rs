//! Static lookups that turn a disease label into what the result panel shows.
//!
//! Labels are matched by substring against [`SEVERITY_TABLE`] in order; the
//! first matching row wins and the last row matches everything.

use crate::models::classify_types::{
    ClassificationResult, ConfidenceBar, DiseaseInfo, Presentation, SeverityColor, SeverityIcon,
    SeverityTier,
};

const LABEL_PREFIX: &str = "Tomato_";

pub struct SeverityBucket {
    /// `None` matches any label.
    pub needle: Option<&'static str>,
    pub tier: SeverityTier,
    pub color: SeverityColor,
    pub icon: SeverityIcon,
    pub info: DiseaseInfo,
}

impl SeverityBucket {
    fn matches(&self, label: &str) -> bool {
        self.needle.map_or(true, |needle| label.contains(needle))
    }
}

pub static SEVERITY_TABLE: [SeverityBucket; 4] = [
    SeverityBucket {
        needle: Some("Late_blight"),
        tier: SeverityTier::High,
        color: SeverityColor::Red,
        icon: SeverityIcon::Viruses,
        info: DiseaseInfo {
            description: "Late blight is a serious fungal disease that can destroy entire tomato crops. It thrives in cool, wet conditions and spreads rapidly.",
            recommendations: [
                "Remove and destroy infected leaves immediately",
                "Apply copper-based fungicides as preventive measure",
                "Avoid overhead watering",
                "Ensure proper plant spacing for air circulation",
            ],
        },
    },
    SeverityBucket {
        needle: Some("Early_blight"),
        tier: SeverityTier::Moderate,
        color: SeverityColor::Orange,
        icon: SeverityIcon::Virus,
        info: DiseaseInfo {
            description: "Early blight is a common fungal disease characterized by concentric rings on leaves. It typically appears on older leaves first.",
            recommendations: [
                "Remove affected leaves",
                "Apply fungicides containing chlorothalonil",
                "Water at the base of plants",
                "Rotate crops annually",
            ],
        },
    },
    SeverityBucket {
        needle: Some("Leaf_Mold"),
        tier: SeverityTier::Low,
        color: SeverityColor::Amber,
        icon: SeverityIcon::VirusSlash,
        info: DiseaseInfo {
            description: "Leaf mold is a fungal disease that develops in humid conditions, causing yellow spots on upper leaf surfaces and fuzzy mold underneath.",
            recommendations: [
                "Reduce humidity and improve ventilation",
                "Remove infected leaves",
                "Apply fungicides if necessary",
                "Avoid crowding plants",
            ],
        },
    },
    SeverityBucket {
        needle: None,
        tier: SeverityTier::Healthy,
        color: SeverityColor::Green,
        icon: SeverityIcon::CheckCircle,
        info: DiseaseInfo {
            description: "Your tomato plant appears healthy with no signs of disease. Continue with good cultural practices to maintain plant health.",
            recommendations: [
                "Monitor plants regularly for early signs of disease",
                "Water at the base of plants",
                "Maintain proper spacing for air circulation",
                "Practice crop rotation",
            ],
        },
    },
];

/// The confidence bar checks `healthy` first, unlike the severity table.
const BAR_COLORS: [(&str, SeverityColor); 3] = [
    ("healthy", SeverityColor::Green),
    ("Late_blight", SeverityColor::Red),
    ("Early_blight", SeverityColor::Orange),
];

pub fn bucket_for(label: &str) -> &'static SeverityBucket {
    SEVERITY_TABLE
        .iter()
        .find(|bucket| bucket.matches(label))
        .unwrap_or(&SEVERITY_TABLE[SEVERITY_TABLE.len() - 1])
}

pub fn severity_tier(label: &str) -> SeverityTier {
    bucket_for(label).tier
}

pub fn severity_color(label: &str) -> SeverityColor {
    bucket_for(label).color
}

pub fn severity_icon(label: &str) -> SeverityIcon {
    bucket_for(label).icon
}

pub fn severity_text(label: &str) -> &'static str {
    bucket_for(label).tier.text()
}

pub fn disease_info(label: &str) -> DiseaseInfo {
    bucket_for(label).info.clone()
}

/// One decimal, ties rounded away from zero (`12.25` shows as `12.3`).
pub fn format_confidence(confidence: f64) -> String {
    let percent = confidence * 100.0;
    format!("{:.1}%", (percent * 10.0).round() / 10.0)
}

pub fn format_disease_name(label: &str) -> String {
    let stripped = label.replacen(LABEL_PREFIX, "", 1).replace('_', " ");

    let mut out = String::with_capacity(stripped.len());
    let mut at_word_start = true;
    for c in stripped.chars() {
        let is_word = c.is_ascii_alphanumeric();
        if is_word && at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !is_word;
    }
    out
}

pub fn confidence_bar(label: &str, confidence: f64) -> ConfidenceBar {
    let color = BAR_COLORS
        .iter()
        .find(|(needle, _)| label.contains(needle))
        .map(|(_, color)| *color)
        .unwrap_or(SeverityColor::Amber);

    ConfidenceBar {
        width_percent: confidence * 100.0,
        color,
    }
}

pub fn present(result: &ClassificationResult) -> Presentation {
    let label = result.class_name.as_str();
    let bucket = bucket_for(label);

    Presentation {
        label: label.to_string(),
        disease_name: format_disease_name(label),
        confidence: format_confidence(result.confidence),
        severity: bucket.tier,
        severity_text: bucket.tier.text(),
        color: bucket.color,
        icon: bucket.icon,
        bar: confidence_bar(label, result.confidence),
        info: bucket.info.clone(),
    }
}
