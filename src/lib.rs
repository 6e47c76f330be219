//! HR analytics backend: absenteeism, leave and attrition reports over
//! employee records, served as JSON or CSV.

pub mod analytics;
pub mod api;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod model;
pub mod repository;
pub mod routes;
pub mod utils;
