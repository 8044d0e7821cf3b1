pub mod classifier;
pub mod download;
pub mod orchestrator;
pub mod upload;
