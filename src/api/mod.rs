//! API module
//!
//! Contains HTTP request handlers for the catalog endpoints

pub mod items;
pub mod stats;
