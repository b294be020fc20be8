pub mod alpaca;
pub mod broker;
pub mod config;
pub mod engine;
pub mod journal;
pub mod models;
pub mod strategy;
