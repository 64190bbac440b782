pub mod error;
pub mod i18n;
pub mod models;

pub use error::Error;
