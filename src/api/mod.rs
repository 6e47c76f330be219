pub mod analytics;
pub mod employee;
pub mod export;
pub mod health;
