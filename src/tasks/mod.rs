//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Eviction: drops expired values and null markers from the in-memory store

mod eviction;

pub use eviction::spawn_eviction_task;
