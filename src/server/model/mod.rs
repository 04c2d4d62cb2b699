//! Server application models and type definitions.
//!
//! This module contains data models for the server application, including application state,
//! database model type aliases, and the parsed row forms consumed by the workbook import.
//! These models bridge the gap between database entities and HTTP handlers.

pub mod app;
pub mod db;
pub mod import;
