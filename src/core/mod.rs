//! Curriculum graph construction, derivation and reporting

pub mod diagram;
pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod requisites;
pub mod validate;
