use serde::Deserialize;

pub mod brand;
pub mod device;
pub mod group;
pub mod part;
pub mod transfer;

pub static ADMIN_TAG: &str = "admin";

/// Largest page size an admin listing will serve
const MAX_PAGE_SIZE: u64 = 200;

const DEFAULT_PAGE_SIZE: u64 = 50;

/// Shared pagination parameters of the admin listing endpoints
#[derive(Deserialize, utoipa::IntoParams)]
pub struct PageQuery {
    /// 1-based page number, defaults to 1
    pub page: Option<u64>,
    /// Rows per page, defaults to 50 and is capped at 200
    pub per_page: Option<u64>,
    /// Filter text matched against names, slugs and related fields
    pub q: Option<String>,
}

impl PageQuery {
    /// Page number and page size with defaults and the cap applied
    pub fn bounds(&self) -> (u64, u64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self
            .per_page
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        (page, per_page)
    }

    /// Trimmed filter text, `None` when blank or absent
    pub fn filter(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}
