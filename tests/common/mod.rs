use std::sync::Arc;

use school_registry::config::DatabaseConfig;
use school_registry::models::{
    grades::{entities::Grade, requests::CreateGradeRequest},
    students::{entities::Student, requests::CreateStudentRequest},
    users::{entities::User, requests::CreateUserRequest},
};
use school_registry::storage::{Storage, create_storage};

/// 每个测试独立的内存数据库，已完成迁移
pub async fn spawn_store() -> Arc<dyn Storage> {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    create_storage(&config)
        .await
        .expect("Failed to open in-memory store")
}

/// 临时目录下的 SQLite 文件库，连接池可容纳多个连接
///
/// 返回的 `TempDir` 必须在测试结束前保持存活。
pub async fn spawn_file_store(pool_size: u32) -> (Arc<dyn Storage>, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = DatabaseConfig {
        url: dir.path().join("school.db").to_string_lossy().into_owned(),
        pool_size,
        timeout: 5,
    };
    let store = create_storage(&config)
        .await
        .expect("Failed to open file-backed store");
    (store, dir)
}

pub async fn seed_grade(store: &Arc<dyn Storage>, name: &str) -> Grade {
    store
        .create_grade(CreateGradeRequest::named(name))
        .await
        .expect("Failed to create grade")
}

pub fn student_request(username: &str, grade_id: i64) -> CreateStudentRequest {
    CreateStudentRequest {
        full_name: format!("Student {username}"),
        username: username.to_string(),
        level: "5".to_string(),
        grade_id,
        gender: "female".to_string(),
        password: "$argon2id$v=19$placeholder".to_string(),
        is_active: None,
    }
}

pub async fn seed_student(store: &Arc<dyn Storage>, username: &str, grade_id: i64) -> Student {
    store
        .create_student(student_request(username, grade_id))
        .await
        .expect("Failed to create student")
}

pub async fn seed_user(store: &Arc<dyn Storage>, username: &str, role: &str) -> User {
    store
        .create_user(CreateUserRequest {
            username: username.to_string(),
            password: "$argon2id$v=19$placeholder".to_string(),
            role: Some(role.to_string()),
            is_super_admin: None,
        })
        .await
        .expect("Failed to create user")
}
