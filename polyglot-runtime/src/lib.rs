pub mod chat;
pub mod config_store;
pub mod env;
pub mod files;
pub mod runtime_controller;
