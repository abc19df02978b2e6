//! ixepred-model — Patient records, serialized classifiers and the scoring orchestrator.
//!
//! Flow for a single calculation:
//!   PatientInput → PatientRecord → project() per model → ModelArtifact::predict_proba
//!   → Prediction → Banner
//!
//! The transparency panel is independent and only reads the metadata document.

pub mod endpoint;
pub mod patient;
pub mod artifact;
pub mod projection;
pub mod source;
pub mod scorer;
pub mod interpretation;
pub mod metadata;

pub use endpoint::Endpoint;
pub use patient::{PatientInput, PatientRecord, FeatureValue, Sex, YesNo};
pub use artifact::ModelArtifact;
pub use source::{ArtifactSource, FsArtifactSource, InMemoryArtifactSource};
pub use scorer::{Prediction, score_patient};
pub use interpretation::{Banner, BannerLevel};
pub use metadata::{MetadataDocument, TransparencyPanel};
