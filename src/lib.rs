pub mod api;
pub mod config;
pub mod error;
pub mod logic;
pub mod models;
pub mod state;
pub mod storage;
