pub mod pagination;
pub mod response;

pub use pagination::{PaginationQuery, SortOrder};
pub use response::ErrorBody;
