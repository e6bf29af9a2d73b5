//! GeoPin Core - Domain models, ports, and configuration
//!
//! This crate contains the domain types shared by the map client: points,
//! places, interaction modes, pins, and the port traits that the query
//! service, map surface and presentation layer implement.

pub mod config;
pub mod error;
pub mod models;
pub mod ports;
pub mod projection;

pub use error::{GeopinError, Result};
