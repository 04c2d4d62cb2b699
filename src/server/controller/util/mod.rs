//! Utility functions for controller request handling.
//!
//! This module provides reusable helpers used across controllers: the bearer-token
//! gate protecting admin endpoints and the mapping of database rows and service
//! views into response DTOs.

pub mod admin_gate;
pub mod dto;
