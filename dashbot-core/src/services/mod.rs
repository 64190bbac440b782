// File: src/services/mod.rs

pub mod discord;
pub mod language;
pub mod stats;

pub use language::LanguageSetting;
