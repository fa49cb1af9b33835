pub mod analyzer;
pub mod planner;
