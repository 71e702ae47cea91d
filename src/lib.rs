pub mod api_client;
pub mod cli;
pub mod commands;
pub mod config;
pub mod confirm;
pub mod context;
pub mod errors;
pub mod models;
pub mod org_select;
pub mod params;
pub mod presenters;
pub mod prompt;
