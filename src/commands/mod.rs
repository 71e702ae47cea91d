pub mod app_command;
