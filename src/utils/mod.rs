pub mod sql;
pub mod validate;

pub use sql::{contains_pattern, escape_like_pattern};
