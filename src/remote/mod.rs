// Remote classification: trait-based so the HTTP provider can be swapped or
// scripted without touching the orchestrator.

pub mod error;
pub mod http;
pub mod traits;

pub use error::ClassifierError;
pub use http::HttpClassifier;
pub use traits::{Category, CategoryScore, RemoteClassifier};
