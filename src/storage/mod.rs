use std::sync::Arc;

use crate::config::DatabaseConfig;
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

use crate::errors::Result;

pub mod sea_orm_storage;

/// 实体存储契约
///
/// 所有按 ID / 用户名查找的操作在记录不存在时返回 `NotFound`，
/// 写操作在约束冲突时返回 `Validation`，不做任何重试。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 年级管理方法
    // 列出年级
    async fn list_grades(&self, query: GradeListQuery) -> Result<Vec<Grade>>;
    // 通过ID获取年级
    async fn get_grade(&self, id: i64) -> Result<Grade>;
    // 创建年级
    async fn create_grade(&self, grade: CreateGradeRequest) -> Result<Grade>;
    // 更新年级
    async fn update_grade(&self, id: i64, update: UpdateGradeRequest) -> Result<Grade>;
    // 统计引用该年级的学生数量
    async fn count_students_in_grade(&self, id: i64) -> Result<u64>;
    // 删除年级，按策略处理引用学生
    async fn delete_grade(&self, id: i64, policy: DeletePolicy) -> Result<GradeDeletion>;

    /// 学生管理方法
    // 列出学生（附带年级投影）
    async fn list_students(&self, query: StudentListQuery) -> Result<Vec<Student>>;
    // 通过ID获取学生
    async fn get_student(&self, id: i64) -> Result<Student>;
    // 通过用户名获取学生
    async fn get_student_by_username(&self, username: &str) -> Result<Student>;
    // 创建学生
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    // 更新学生
    async fn update_student(&self, id: i64, update: UpdateStudentRequest) -> Result<Student>;
    // 删除学生
    async fn delete_student(&self, id: i64) -> Result<()>;

    /// 用户（管理员）管理方法
    // 列出用户
    async fn list_users(&self, query: UserListQuery) -> Result<Vec<User>>;
    // 通过ID获取用户
    async fn get_user(&self, id: i64) -> Result<User>;
    // 通过用户名获取用户
    async fn get_user_by_username(&self, username: &str) -> Result<User>;
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 更新用户
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<User>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<()>;
    // 提升为超级管理员（幂等）
    async fn promote_super_admin(&self, username: &str) -> Result<User>;

    /// 消息方法
    // 发送消息
    async fn send_message(&self, message: SendMessageRequest) -> Result<Message>;
    // 列出消息
    async fn list_messages(&self, query: MessageListQuery) -> Result<Vec<Message>>;
    // 通过ID获取消息
    async fn get_message(&self, id: i64) -> Result<Message>;
    // 获取两个用户之间的往来消息（按时间顺序）
    async fn conversation(&self, user_a: i64, user_b: i64) -> Result<Vec<Message>>;
    // 删除单条消息
    async fn delete_message(&self, actor: &SessionUser, id: i64) -> Result<()>;
    // 批量清理消息
    async fn purge_messages(
        &self,
        actor: &SessionUser,
        request: PurgeMessagesRequest,
    ) -> Result<u64>;

    /// 诊断
    async fn snapshot(&self) -> Result<StoreSnapshot>;

    /// 释放连接池
    async fn close(&self) -> Result<()>;
}

/// 打开存储并执行迁移，返回显式传递的存储句柄
pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::connect(config).await?;
    Ok(Arc::new(storage))
}
