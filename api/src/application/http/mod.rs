pub mod calorie_analysis;
pub mod health;
pub mod plan;
pub mod server;
