// Frameworks layer: configuration, persistence and server bootstrap.

pub mod config;
pub mod db;
pub mod server;
