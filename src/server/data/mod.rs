//! Data access layer repositories.
//!
//! This module contains all database repository implementations for the
//! application. Repositories provide an abstraction layer over database
//! operations and are generic over [`sea_orm::ConnectionTrait`], so the same
//! code runs against a plain connection or a transaction; bulk import relies
//! on this to execute whole batches transactionally.

pub mod brand;
pub mod device;
pub mod group;
pub mod part;

/// One page of a listing query.
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total matching records across all pages
    pub total: u64,
    /// Total page count at the requested page size
    pub pages: u64,
}
