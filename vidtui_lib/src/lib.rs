pub mod api;
pub mod fetch;
pub mod format;
pub mod models;
