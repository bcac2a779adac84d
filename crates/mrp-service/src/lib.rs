//! # MRP Service
//!
//! 資料來源介面、資料正規化與非同步推演服務

pub mod json_source;
pub mod normalize;
pub mod orchestrator;
pub mod source;

pub use json_source::JsonDirSource;
pub use normalize::RecordNormalizer;
pub use orchestrator::ProjectionService;
pub use source::{InMemorySource, MrpDataSource};
