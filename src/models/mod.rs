//! Request and Response models for the inspection API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{MaxCacheRequest, NavigateRequest, PolicyRequest, ViewportRequest};
pub use responses::{
    ClearResponse, EntryResponse, ErrorResponse, HealthResponse, MaxCacheResponse,
    NavigateResponse, PolicyResponse, RemoveResponse, StatsResponse, ViewportResponse,
};
