pub mod common;
pub mod dashboard;
pub mod servers;
pub mod stats;
