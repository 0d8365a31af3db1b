//! School Registry - 学校管理数据存储层
//!
//! 年级、学生、管理员账户与消息的持久化，基于 SeaORM。
//!
//! # 架构
//! - `cli`: 运维命令行
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `runtime`: 运行时生命周期管理
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cli;
pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod runtime;
pub mod storage;
pub mod utils;
