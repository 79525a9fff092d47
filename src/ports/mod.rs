pub mod file_system;
pub mod http_server;
