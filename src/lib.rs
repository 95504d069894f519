pub mod config;
pub mod core;
pub mod dashboard;
pub mod detection;
pub mod error;
pub mod imagery;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod sources;

pub use config::Config;
pub use dashboard::{Dashboard, DashboardSnapshot, render_summary};
pub use detection::{ShipDetector, annotate};
pub use error::{SourceError, SourceResult};
pub use models::{Contour, ShipDetection};
pub use pipeline::{
    Attr, BoundingBox, Frame, Pipeline, PipelineContext, PipelineExecutor, PipelineStep, WorkItem,
};
