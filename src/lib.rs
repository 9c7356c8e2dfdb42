//! Keuzegids — terminal wizard client for a remote decision-tree service.

pub mod config;
pub mod error;
pub mod model;
pub mod service;
pub mod terminal;
pub mod wizard;
