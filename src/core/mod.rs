pub mod error;
pub mod items;
pub mod models;
pub mod notifications;
pub mod settings;
pub mod store;
