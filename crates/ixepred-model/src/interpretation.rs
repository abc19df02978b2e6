//! Traffic-light interpretation of the PASI90 probability.

use serde::Serialize;

/// prob90 at or above this is a high probability of deep response.
pub const HIGH_THRESHOLD: f64 = 0.70;
/// prob90 at or above this (and below HIGH_THRESHOLD) is intermediate.
pub const INTERMEDIATE_THRESHOLD: f64 = 0.40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerLevel {
    Success,
    Warning,
    Alert,
}

impl BannerLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            BannerLevel::Success => "alert-success",
            BannerLevel::Warning => "alert-warning",
            BannerLevel::Alert => "alert-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Banner {
    pub level: BannerLevel,
    pub message: &'static str,
}

impl Banner {
    pub fn for_prob90(prob90: f64) -> Self {
        if prob90 >= HIGH_THRESHOLD {
            Banner {
                level: BannerLevel::Success,
                message: "Alta probabilidad de respuesta profunda (PASI90).",
            }
        } else if prob90 >= INTERMEDIATE_THRESHOLD {
            Banner {
                level: BannerLevel::Warning,
                message: "Probabilidad intermedia de respuesta profunda (PASI90).",
            }
        } else {
            Banner {
                level: BannerLevel::Alert,
                message: "Baja probabilidad de alcanzar PASI90.",
            }
        }
    }
}

/// Probability as a percentage with one decimal, e.g. `0.4567` → `"45.7%"`.
pub fn format_percent(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}
