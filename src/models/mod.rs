pub mod common;
pub mod diagnostics;
pub mod grades;
pub mod messages;
pub mod session;
pub mod students;
pub mod users;

pub use common::{ErrorBody, PaginationQuery, SortOrder};
