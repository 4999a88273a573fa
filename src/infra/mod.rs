pub mod connection;
pub mod factory;
pub mod repositories;
