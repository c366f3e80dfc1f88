//! Request middleware and extractors.

pub mod tenant;
