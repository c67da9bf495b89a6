pub mod aggregator;
pub mod config;
pub mod db;
pub mod downstream;
pub mod entities;
pub mod error;
pub mod events;
pub mod models;
pub mod routes;
pub mod store;
pub mod validation;
