//! Model metadata document and the transparency panel built from it.
//!
//! `metadata.json` has two optional keys:
//!   - `features`: list of column names used for training
//!   - `models`:   endpoint → either a file path (older exports) or a record
//!                 `{n, pos, auc, brier}` with any field possibly absent

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use ixepred_common::Result;
use crate::source::ArtifactSource;

pub const METADATA_FILE: &str = "metadata.json";

pub const MISSING_METADATA_WARNING: &str =
    "No se encontró el archivo metadata.json del modelo. Reentrena y vuelve a subir los modelos.";
pub const LEGACY_ENTRY_NOTICE: &str =
    "Este modelo no incluye métricas internas (AUC, Brier). Para mostrarlas es necesario reentrenar el modelo.";
pub const NOT_AVAILABLE: &str = "NA";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataDocument {
    /// `null` is treated as absent; non-string entries keep their JSON text.
    #[serde(default, deserialize_with = "lenient_features")]
    pub features: Vec<String>,
    /// Endpoint entries in document order. `null` or a non-object is treated as absent.
    #[serde(default, deserialize_with = "lenient_models")]
    pub models: Map<String, Value>,
}

fn lenient_features<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<String>, D::Error> {
    let features = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter(|item| !item.is_null())
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(features)
}

fn lenient_models<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Map<String, Value>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Object(models) => Ok(models),
        _ => Ok(Map::new()),
    }
}

impl MetadataDocument {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, ModelEntry<'_>)> {
        self.models.iter().map(|(name, value)| (name.as_str(), ModelEntry::from_value(value)))
    }
}

/// Shape of one endpoint entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEntry<'a> {
    /// Older exports stored only the artifact path.
    Legacy(&'a str),
    /// Current exports carry internal validation metrics.
    Metrics(&'a Map<String, Value>),
    /// Anything else carries no usable metrics.
    Unrecognised,
}

impl<'a> ModelEntry<'a> {
    pub fn from_value(value: &'a Value) -> Self {
        match value {
            Value::String(path) => ModelEntry::Legacy(path),
            Value::Object(record) => ModelEntry::Metrics(record),
            _ => ModelEntry::Unrecognised,
        }
    }
}

// ── Panel model ───────────────────────────────────────────────────────────────

/// What the transparency panel shows for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransparencyPanel {
    /// metadata.json is absent: a single warning and nothing else.
    MissingMetadata { warning: String },
    /// metadata.json exists but could not be decoded.
    Unreadable { error: String },
    Loaded {
        /// Comma-joined feature list, empty when absent.
        features: String,
        endpoints: Vec<EndpointSummary>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointSummary {
    pub name: String,
    #[serde(flatten)]
    pub detail: EndpointDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EndpointDetail {
    Legacy { path: String, notice: String },
    Metrics(MetricFields),
}

/// The four displayed metrics, already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricFields {
    pub n: String,
    pub pos: String,
    pub auc: String,
    pub brier: String,
}

impl TransparencyPanel {
    /// Read the metadata document from `source` and build the panel.
    pub fn build(source: &dyn ArtifactSource) -> Self {
        match source.load_metadata() {
            Ok(Some(doc)) => Self::from_document(&doc),
            Ok(None) => {
                warn!("metadata document not found; transparency panel shows a warning only");
                TransparencyPanel::MissingMetadata { warning: MISSING_METADATA_WARNING.to_string() }
            }
            Err(e) => {
                error!("metadata document could not be read: {e}");
                TransparencyPanel::Unreadable { error: e.to_string() }
            }
        }
    }

    pub fn from_document(doc: &MetadataDocument) -> Self {
        let endpoints = doc
            .entries()
            .map(|(name, entry)| {
                let detail = match entry {
                    ModelEntry::Legacy(path) => EndpointDetail::Legacy {
                        path: path.to_string(),
                        notice: LEGACY_ENTRY_NOTICE.to_string(),
                    },
                    ModelEntry::Metrics(record) => EndpointDetail::Metrics(MetricFields::from_record(record)),
                    ModelEntry::Unrecognised => {
                        debug!("metadata entry for {name} is neither a path nor a record");
                        EndpointDetail::Metrics(MetricFields::not_available())
                    }
                };
                EndpointSummary { name: name.to_string(), detail }
            })
            .collect();

        TransparencyPanel::Loaded {
            features: doc.features.join(", "),
            endpoints,
        }
    }
}

impl MetricFields {
    pub fn from_record(record: &Map<String, Value>) -> Self {
        Self {
            n: display_raw(record.get("n")),
            pos: display_raw(record.get("pos")),
            auc: display_fixed(record.get("auc"), 2),
            brier: display_fixed(record.get("brier"), 3),
        }
    }

    pub fn not_available() -> Self {
        Self {
            n: NOT_AVAILABLE.to_string(),
            pos: NOT_AVAILABLE.to_string(),
            auc: NOT_AVAILABLE.to_string(),
            brier: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Counts are shown as stored.
fn display_raw(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Scores are shown to fixed decimals, or NA when absent or not numeric.
fn display_fixed(value: Option<&Value>, decimals: usize) -> String {
    match value.and_then(Value::as_f64) {
        Some(v) => format!("{v:.decimals$}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_metric_formatting() {
        let record = json!({"n": 212, "pos": 131, "auc": 0.7349, "brier": 0.18861});
        let fields = MetricFields::from_record(record.as_object().unwrap());
        assert_eq!(fields, MetricFields {
            n: "212".into(),
            pos: "131".into(),
            auc: "0.73".into(),
            brier: "0.189".into(),
        });
    }

    #[test]
    fn test_absent_and_non_numeric_metrics_are_na() {
        let record = json!({"auc": "high", "brier": null});
        let fields = MetricFields::from_record(record.as_object().unwrap());
        assert_eq!(fields, MetricFields::not_available());
    }

    #[test]
    fn test_document_order_is_preserved() {
        let doc = MetadataDocument::from_json_str(
            r#"{"models": {"PASI90_w16": "a.joblib", "PASI75_w16": "b.joblib"}}"#,
        ).unwrap();
        let names: Vec<&str> = doc.entries().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["PASI90_w16", "PASI75_w16"]);
    }

    #[test]
    fn test_absent_features_render_empty() {
        let doc = MetadataDocument::from_json_str("{}").unwrap();
        match TransparencyPanel::from_document(&doc) {
            TransparencyPanel::Loaded { features, endpoints } => {
                assert_eq!(features, "");
                assert!(endpoints.is_empty());
            }
            other => panic!("unexpected panel: {other:?}"),
        }
    }

    #[test]
    fn test_null_features_keep_endpoint_metrics() {
        let doc = MetadataDocument::from_json_str(
            r#"{"features": null, "models": {"PASI75_w16": {"n": 90, "auc": 0.66}}}"#,
        ).unwrap();
        let TransparencyPanel::Loaded { features, endpoints } = TransparencyPanel::from_document(&doc) else {
            panic!("expected loaded panel");
        };
        assert_eq!(features, "");
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].detail, EndpointDetail::Metrics(MetricFields {
            n: "90".into(),
            pos: NOT_AVAILABLE.into(),
            auc: "0.66".into(),
            brier: NOT_AVAILABLE.into(),
        }));
    }

    #[test]
    fn test_non_string_features_and_null_models() {
        let doc = MetadataDocument::from_json_str(r#"{"features": ["edad", 3, null], "models": null}"#).unwrap();
        assert_eq!(doc.features, vec!["edad".to_string(), "3".to_string()]);
        assert!(doc.models.is_empty());
    }

    #[test]
    fn test_unrecognised_entry_shows_na_metrics() {
        let doc = MetadataDocument::from_json_str(r#"{"models": {"PASI75_w16": 3}}"#).unwrap();
        let TransparencyPanel::Loaded { endpoints, .. } = TransparencyPanel::from_document(&doc) else {
            panic!("expected loaded panel");
        };
        assert_eq!(endpoints[0].detail, EndpointDetail::Metrics(MetricFields::not_available()));
    }
}
