pub mod classifier;
pub mod fs_service;
pub mod preview;
pub mod validation;
pub mod workflow;
