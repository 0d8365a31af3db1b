use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 单页最大条数
pub const MAX_PAGE_SIZE: i64 = 100;

// 分页查询参数，未指定 size 时返回全部匹配记录
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "pagination.ts")]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl PaginationQuery {
    pub fn new(page: i64, size: i64) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
        }
    }

    /// 计算 (offset, limit)，未分页时返回 None
    pub fn window(&self) -> Option<(u64, u64)> {
        let size = self.size?.clamp(1, MAX_PAGE_SIZE) as u64;
        let page = self.page.unwrap_or(1).max(1) as u64;
        // 超大页码饱和到数据库可接受的最大偏移
        let offset = (page - 1).saturating_mul(size).min(i64::MAX as u64);
        Some((offset, size))
    }
}

// 排序方向
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "pagination.ts")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl From<SortOrder> for sea_orm::Order {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => sea_orm::Order::Asc,
            SortOrder::Desc => sea_orm::Order::Desc,
        }
    }
}
