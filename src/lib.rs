pub mod alert;
pub mod backend;
pub mod config;
pub mod content;
pub mod error;
pub mod i18n;
pub mod orchestrator;
pub mod pages;
pub mod retry;
pub mod server;
pub mod translation;
