//! Business logic services.

pub mod company;
pub mod dashboard;
pub mod store;
