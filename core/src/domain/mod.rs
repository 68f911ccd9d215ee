pub mod calorie_analysis;
pub mod common;
pub mod generation;
pub mod history;
pub mod plan;
pub mod profile;
