//! Utility modules for common functionality

pub mod exit_codes;

// Re-export commonly used items
pub use exit_codes::CommandOutcome;
