//! 运维命令行
//!
//! 两个一次性命令：提升超级管理员与打印诊断快照。

mod commands;

use clap::{Parser, Subcommand};

pub use commands::{cmd_promote_admin, cmd_snapshot};

/// School Registry - 学校管理数据存储
#[derive(Parser, Debug)]
#[command(name = "school-registry")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Grant super-admin rights to an existing user
    #[command(alias = "promote")]
    PromoteAdmin {
        /// Username to promote (defaults to admin.promote_username)
        #[arg(long, short)]
        username: Option<String>,
    },

    /// Print grades and admin accounts as JSON
    Snapshot,
}
