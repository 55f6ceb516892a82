//! CLI command implementations.

pub mod catalog;
pub mod check;
pub mod common;
pub mod edit;
pub mod show;
pub mod version;
