// Modules
pub mod data;
pub mod errors;
pub mod loader;
pub mod report;
pub mod summary;
pub mod sweep;
pub mod utils;

// Individual classes, and functions
pub use data::{Campaign, CampaignState, Dataset};
pub use sweep::{threshold_sweep, SweepBounds, ThresholdRow};
