//! GeoPin Client - Place service adapters
//!
//! This crate provides the implementations of the `GeoQueryService` port:
//! an HTTP client for the remote place service and an in-memory service for
//! offline sessions and tests.

pub mod dto;
pub mod http;
pub mod memory;

pub use http::HttpGeoClient;
pub use memory::MemoryGeoService;
