pub mod catalog;
pub mod config;
pub mod output;
pub mod roadmap;
pub mod server;
pub mod store;
