use meridian_core::repository::Paginated;
use serde::{Deserialize, Serialize};

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl PageQuery {
    pub fn limit(&self) -> i64 {
        self.limit.clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }
}

#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub total_count: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub limit: i64,
}

#[derive(Debug, Serialize)]
pub struct PageEnvelope<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

pub fn envelope<T>(page: Paginated<T>, query: &PageQuery) -> PageEnvelope<T> {
    let limit = query.limit();
    PageEnvelope {
        pagination: PaginationMeta {
            total_count: page.total_count,
            total_pages: (page.total_count + limit - 1) / limit,
            current_page: query.page.max(1),
            limit,
        },
        data: page.data,
    }
}
