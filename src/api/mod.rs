//! API Module
//!
//! HTTP inspection surface over one simulated browser session.
//!
//! # Endpoints
//! - `POST /navigate` - Navigate to a path
//! - `GET /entries/:key` - Inspect a cached entry
//! - `DELETE /entries/:key` - Remove a cached entry
//! - `DELETE /entries` - Clear the cache
//! - `PUT /max-cache` - Change the capacity
//! - `PUT /policy` - Replace the include/exclude policy
//! - `GET /viewport`, `PUT /viewport` - Read or scroll the window
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
