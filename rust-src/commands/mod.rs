//! CLI command implementations.

pub mod contact;
pub mod dashboard;
pub mod export;
pub mod show;
