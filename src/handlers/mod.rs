pub mod analytics;
pub mod dashboard;
pub mod health;
pub mod servers;
pub mod stats;
