//! Clinical endpoints scored by the calculator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Week-16 response endpoint. Each endpoint has its own serialized classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    /// ≥75% reduction in PASI from baseline
    #[serde(rename = "PASI75_w16")]
    Pasi75W16,
    /// ≥90% reduction in PASI from baseline (deep response)
    #[serde(rename = "PASI90_w16")]
    Pasi90W16,
}

impl Endpoint {
    pub const ALL: [Endpoint; 2] = [Endpoint::Pasi75W16, Endpoint::Pasi90W16];

    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Pasi75W16 => "PASI75_w16",
            Endpoint::Pasi90W16 => "PASI90_w16",
        }
    }

    /// Fixed artifact file name inside the models directory.
    pub fn artifact_file_name(&self) -> String {
        format!("ixe_{}.json", self.as_str())
    }

    /// Label shown above the probability metric.
    pub fn metric_label(&self) -> &'static str {
        match self {
            Endpoint::Pasi75W16 => "Probabilidad PASI75 (semana 16)",
            Endpoint::Pasi90W16 => "Probabilidad PASI90 (semana 16)",
        }
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Endpoint::Pasi75W16
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_file_names() {
        assert_eq!(Endpoint::Pasi75W16.artifact_file_name(), "ixe_PASI75_w16.json");
        assert_eq!(Endpoint::Pasi90W16.artifact_file_name(), "ixe_PASI90_w16.json");
    }

    #[test]
    fn test_serde_uses_endpoint_names() {
        let json = serde_json::to_string(&Endpoint::Pasi90W16).unwrap();
        assert_eq!(json, "\"PASI90_w16\"");
        let back: Endpoint = serde_json::from_str("\"PASI75_w16\"").unwrap();
        assert_eq!(back, Endpoint::Pasi75W16);
    }
}
