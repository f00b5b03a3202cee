use serde::{Deserialize, Serialize};
use std::fmt;

/// Success body of `POST /classify`. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(rename = "class")]
    pub class_name: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Healthy,
    Low,
    Moderate,
    High,
}

impl SeverityTier {
    pub fn text(&self) -> &'static str {
        match self {
            SeverityTier::High => "High Severity",
            SeverityTier::Moderate => "Moderate Severity",
            SeverityTier::Low => "Low Severity",
            SeverityTier::Healthy => "Healthy Plant",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityColor {
    Red,
    Orange,
    Amber,
    Green,
}

impl fmt::Display for SeverityColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SeverityColor::Red => "red",
            SeverityColor::Orange => "orange",
            SeverityColor::Amber => "amber",
            SeverityColor::Green => "green",
        };
        f.write_str(name)
    }
}

/// Icon identifiers; the artwork itself belongs to whatever renders them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityIcon {
    Viruses,
    Virus,
    VirusSlash,
    CheckCircle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiseaseInfo {
    pub description: &'static str,
    pub recommendations: [&'static str; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceBar {
    pub width_percent: f64,
    pub color: SeverityColor,
}

/// Everything the result panel shows for one classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    pub label: String,
    pub disease_name: String,
    pub confidence: String,
    pub severity: SeverityTier,
    pub severity_text: &'static str,
    pub color: SeverityColor,
    pub icon: SeverityIcon,
    pub bar: ConfidenceBar,
    pub info: DiseaseInfo,
}
