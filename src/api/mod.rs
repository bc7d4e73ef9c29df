pub mod error;
pub mod handlers;
pub mod identity;
pub mod openapi;
pub mod routes;
