//! Data models for the curriculum table

pub mod catalog;
pub mod discipline;
pub mod language;

pub use catalog::{Catalog, ProgramTitle};
pub use discipline::{plain_label, Category, Discipline, Edge};
pub use language::Language;
