//! sift analysis engine: statement capture, shape extraction, candidate
//! scoring, empirical index validation, and reporting.

pub mod advisor;
pub mod capture;
pub mod recommend;
pub mod report;
pub mod shape;
pub mod validate;

pub use advisor::IndexAdvisor;
pub use capture::{CaptureResult, QueryCapture, StatementKind};
pub use recommend::{IndexSnapshot, Recommender, RecommenderConfig, ScoringWeights};
pub use validate::{apply_index, AppliedIndex, Validator};
