pub mod config;
pub mod db;
pub mod error;
pub mod registry;
pub mod routes;
pub mod sync;
