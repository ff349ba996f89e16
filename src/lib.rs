pub mod api;
pub mod commands;
pub mod config;
pub mod console;
pub mod machine_info;
pub mod status;
pub mod todos;
