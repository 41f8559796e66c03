// Calendar Grid Layout Library
// Exports all modules for testing and reuse

pub mod cli;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::LayoutError;
pub use services::layout::GridAssembler;
