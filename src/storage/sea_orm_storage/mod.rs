//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 唯一性与引用完整性由数据库约束保证，存储层只负责把约束冲突翻译成类型化错误。

mod diagnostics;
mod grades;
mod messages;
mod students;
mod users;

use crate::config::DatabaseConfig;
use crate::errors::{Result, StoreError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;
use tracing::{error, info};

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 连接数据库并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| db_error("数据库迁移失败", e))?;

        info!("SeaORM 存储初始化完成，数据库类型: {}", backend_name(&db_url));

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = is_in_memory(url);

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| StoreError::configuration(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .pragma("wal_autocheckpoint", "1000");
        }

        // 内存库每个连接都是独立的数据库，只能保留单个永不回收的连接
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.pool_size)
                .min_connections(1)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| StoreError::infrastructure(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        // 连接错误可能包含连接串，只记录数据库类型
        Database::connect(opt).await.map_err(|e| {
            error!("无法连接到 {} 数据库: {}", backend_name(url), e);
            StoreError::infrastructure(format!("无法连接到 {} 数据库", backend_name(url)))
        })
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    pub fn build_database_url(url: &str) -> Result<String> {
        if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(StoreError::configuration(
                "无法从 URL 推断数据库类型. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径",
            ))
        }
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// 数据库类型名称，用于日志（不输出完整连接串）
fn backend_name(url: &str) -> &'static str {
    if url.starts_with("sqlite:") {
        "sqlite"
    } else if url.starts_with("postgres") {
        "postgres"
    } else {
        "mysql"
    }
}

/// 未预期的数据库错误统一视为基础设施错误，详情只写日志
pub(crate) fn db_error(context: &str, err: DbErr) -> StoreError {
    error!("{}: {}", context, err);
    StoreError::infrastructure(format!("{context}: {err}"))
}

/// 字段校验失败转换为带字段名的校验错误
pub(crate) fn require(field: &str, check: std::result::Result<(), &'static str>) -> Result<()> {
    check.map_err(|reason| StoreError::invalid_field(field, reason))
}

/// 当前秒级时间戳
pub(crate) fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// 去除首尾空白后为空的可选过滤条件视为未设置
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// Storage trait 实现
use crate::models::{
    diagnostics::responses::StoreSnapshot,
    grades::{
        entities::{DeletePolicy, Grade, GradeDeletion},
        requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest},
    },
    messages::{
        entities::Message,
        requests::{MessageListQuery, PurgeMessagesRequest, SendMessageRequest},
    },
    session::entities::SessionUser,
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 年级模块
    async fn list_grades(&self, query: GradeListQuery) -> Result<Vec<Grade>> {
        self.list_grades_impl(query).await
    }

    async fn get_grade(&self, id: i64) -> Result<Grade> {
        self.get_grade_impl(id).await
    }

    async fn create_grade(&self, grade: CreateGradeRequest) -> Result<Grade> {
        self.create_grade_impl(grade).await
    }

    async fn update_grade(&self, id: i64, update: UpdateGradeRequest) -> Result<Grade> {
        self.update_grade_impl(id, update).await
    }

    async fn count_students_in_grade(&self, id: i64) -> Result<u64> {
        self.count_students_in_grade_impl(id).await
    }

    async fn delete_grade(&self, id: i64, policy: DeletePolicy) -> Result<GradeDeletion> {
        self.delete_grade_impl(id, policy).await
    }

    // 学生模块
    async fn list_students(&self, query: StudentListQuery) -> Result<Vec<Student>> {
        self.list_students_impl(query).await
    }

    async fn get_student(&self, id: i64) -> Result<Student> {
        self.get_student_impl(id).await
    }

    async fn get_student_by_username(&self, username: &str) -> Result<Student> {
        self.get_student_by_username_impl(username).await
    }

    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn update_student(&self, id: i64, update: UpdateStudentRequest) -> Result<Student> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<()> {
        self.delete_student_impl(id).await
    }

    // 用户模块
    async fn list_users(&self, query: UserListQuery) -> Result<Vec<User>> {
        self.list_users_impl(query).await
    }

    async fn get_user(&self, id: i64) -> Result<User> {
        self.get_user_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<User> {
        self.get_user_by_username_impl(username).await
    }

    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<User> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        self.delete_user_impl(id).await
    }

    async fn promote_super_admin(&self, username: &str) -> Result<User> {
        self.promote_super_admin_impl(username).await
    }

    // 消息模块
    async fn send_message(&self, message: SendMessageRequest) -> Result<Message> {
        self.send_message_impl(message).await
    }

    async fn list_messages(&self, query: MessageListQuery) -> Result<Vec<Message>> {
        self.list_messages_impl(query).await
    }

    async fn get_message(&self, id: i64) -> Result<Message> {
        self.get_message_impl(id).await
    }

    async fn conversation(&self, user_a: i64, user_b: i64) -> Result<Vec<Message>> {
        self.conversation_impl(user_a, user_b).await
    }

    async fn delete_message(&self, actor: &SessionUser, id: i64) -> Result<()> {
        self.delete_message_impl(actor, id).await
    }

    async fn purge_messages(
        &self,
        actor: &SessionUser,
        request: PurgeMessagesRequest,
    ) -> Result<u64> {
        self.purge_messages_impl(actor, request).await
    }

    // 诊断模块
    async fn snapshot(&self) -> Result<StoreSnapshot> {
        self.snapshot_impl().await
    }

    async fn close(&self) -> Result<()> {
        self.db
            .close_by_ref()
            .await
            .map_err(|e| db_error("关闭数据库连接失败", e))?;
        info!("SeaORM 存储已关闭");
        Ok(())
    }
}
