pub mod api_error;
pub mod api_types;
pub mod config;
pub mod consts;
pub mod graceful;
pub mod handlers;
pub mod init;
pub mod server;
