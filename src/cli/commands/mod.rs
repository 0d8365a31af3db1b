mod promote_admin;
mod snapshot;

pub use promote_admin::cmd_promote_admin;
pub use snapshot::cmd_snapshot;
