pub mod decisions;
pub mod engine;
pub mod report;
