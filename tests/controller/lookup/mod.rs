//! Tests for public catalog lookup endpoints.
//!
//! This module contains integration tests for the unauthenticated lookup
//! routes: device autocomplete, part listings, per-part group pages, combined
//! search, and the compatibility check.

mod compat_check;
mod part_groups;
mod parts;
mod search;

use fitment_test_utils::prelude::*;

use super::*;
