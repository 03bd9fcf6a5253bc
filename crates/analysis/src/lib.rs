//! Ingredient-list cleanup and the shaping of analysis results into displayable data.

pub mod error;
pub mod label;
pub mod navigation;
pub mod normalize;
pub mod pipeline;
pub mod project;
pub mod session;
pub mod skin;
pub mod tier;

pub use error::AnalysisError;
pub use navigation::{NavEvent, Screen, View};
pub use normalize::normalize;
pub use pipeline::{run_analysis, AnalysisBackend, IngredientSource};
pub use project::{project, CategoryView, FreeFromView, IngredientView, ViewModel};
pub use session::{AnalysisSession, CachedAnalysis};
pub use tier::{HazardTier, PillTone};
