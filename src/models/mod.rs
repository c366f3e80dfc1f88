//! Database models and DTOs for all domain entities.

pub mod company;
pub mod dashboard;
pub mod tenant;
