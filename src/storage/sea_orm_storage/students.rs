//! 学生存储操作
//!
//! 学生记录上的年级信息通过 `find_also_related` 联表得到，不单独存储。

use super::{SeaOrmStorage, db_error, non_blank, now, require};
use crate::entity::grades::Entity as Grades;
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{Result, StoreError};
use crate::models::students::{
    entities::Student,
    requests::{CreateStudentRequest, StudentListQuery, StudentSortField, UpdateStudentRequest},
};
use crate::utils::{
    contains_pattern,
    validate::{validate_required, validate_username},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbErr, EntityTrait, Order, QueryFilter, QueryOrder,
    QuerySelect, Set, SqlErr,
};
use tracing::{debug, info};

fn student_not_found(id: i64) -> StoreError {
    StoreError::not_found(format!("student {id} not found"))
}

/// 学生写操作的数据库错误转换
///
/// 唯一索引冲突对应 username，外键冲突对应 grade_id。
fn student_write_error(
    err: DbErr,
    context: &str,
    id: Option<i64>,
    grade_id: Option<i64>,
) -> StoreError {
    if let (DbErr::RecordNotUpdated, Some(id)) = (&err, id) {
        return student_not_found(id);
    }
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            StoreError::invalid_field("username", "already exists")
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => match grade_id {
            Some(grade_id) => {
                StoreError::invalid_field("grade_id", format!("grade {grade_id} does not exist"))
            }
            None => StoreError::invalid_field("grade_id", "referenced grade does not exist"),
        },
        _ => db_error(context, err),
    }
}

impl SeaOrmStorage {
    /// 创建学生
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        require("full_name", validate_required(&req.full_name))?;
        require("username", validate_username(&req.username))?;
        require("level", validate_required(&req.level))?;
        require("gender", validate_required(&req.gender))?;
        require("password", validate_required(&req.password))?;

        let now = now();
        let grade_id = req.grade_id;

        let model = ActiveModel {
            full_name: Set(req.full_name),
            username: Set(req.username),
            level: Set(req.level),
            grade_id: Set(grade_id),
            gender: Set(req.gender),
            password_hash: Set(req.password),
            is_active: Set(req.is_active.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| student_write_error(e, "创建学生失败", None, Some(grade_id)))?;

        info!(
            "Student {} ({}) created in grade {}",
            result.id, result.username, grade_id
        );

        self.get_student_impl(result.id).await
    }

    /// 通过 ID 获取学生
    pub async fn get_student_impl(&self, id: i64) -> Result<Student> {
        Students::find_by_id(id)
            .find_also_related(Grades)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询学生失败", e))?
            .map(|(student, grade)| student.into_student(grade))
            .ok_or_else(|| student_not_found(id))
    }

    /// 通过用户名获取学生
    pub async fn get_student_by_username_impl(&self, username: &str) -> Result<Student> {
        Students::find()
            .filter(Column::Username.eq(username))
            .find_also_related(Grades)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询学生失败", e))?
            .map(|(student, grade)| student.into_student(grade))
            .ok_or_else(|| StoreError::not_found(format!("student '{username}' not found")))
    }

    /// 列出学生
    pub async fn list_students_impl(&self, query: StudentListQuery) -> Result<Vec<Student>> {
        debug!("Listing students with {:?}", query);

        let mut select = Students::find();

        // 年级筛选
        if let Some(grade_id) = query.grade_id {
            select = select.filter(Column::GradeId.eq(grade_id));
        }

        // 状态筛选
        if let Some(is_active) = query.is_active {
            select = select.filter(Column::IsActive.eq(is_active));
        }

        // 级别筛选
        if let Some(level) = non_blank(&query.level) {
            select = select.filter(Column::Level.eq(level));
        }

        // 搜索条件
        if let Some(search) = non_blank(&query.search) {
            select = select.filter(
                Condition::any()
                    .add(Column::FullName.like(contains_pattern(search)))
                    .add(Column::Username.like(contains_pattern(search))),
            );
        }

        // 排序
        let order: Order = query.order.unwrap_or_default().into();
        select = match query.sort_by {
            Some(StudentSortField::FullName) => select.order_by(Column::FullName, order),
            Some(StudentSortField::Username) => select.order_by(Column::Username, order),
            Some(StudentSortField::CreatedAt) => select.order_by(Column::CreatedAt, order),
            None => select,
        };
        select = select.order_by_asc(Column::Id);

        if let Some((offset, limit)) = query.pagination.window() {
            select = select.offset(offset).limit(limit);
        }

        let rows = select
            .find_also_related(Grades)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询学生列表失败", e))?;

        Ok(rows
            .into_iter()
            .map(|(student, grade)| student.into_student(grade))
            .collect())
    }

    /// 更新学生信息
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Student> {
        if let Some(ref full_name) = update.full_name {
            require("full_name", validate_required(full_name))?;
        }
        if let Some(ref username) = update.username {
            require("username", validate_username(username))?;
        }
        if let Some(ref level) = update.level {
            require("level", validate_required(level))?;
        }
        if let Some(ref gender) = update.gender {
            require("gender", validate_required(gender))?;
        }
        if let Some(ref password) = update.password {
            require("password", validate_required(password))?;
        }

        let grade_id = update.grade_id;
        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now()),
            ..Default::default()
        };

        if let Some(full_name) = update.full_name {
            model.full_name = Set(full_name);
        }

        if let Some(username) = update.username {
            model.username = Set(username);
        }

        if let Some(level) = update.level {
            model.level = Set(level);
        }

        if let Some(grade_id) = update.grade_id {
            model.grade_id = Set(grade_id);
        }

        if let Some(gender) = update.gender {
            model.gender = Set(gender);
        }

        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }

        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| student_write_error(e, "更新学生失败", Some(id), grade_id))?;

        info!("Student {} updated", id);
        self.get_student_impl(id).await
    }

    /// 删除学生
    pub async fn delete_student_impl(&self, id: i64) -> Result<()> {
        let result = Students::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("删除学生失败", e))?;

        if result.rows_affected == 0 {
            return Err(student_not_found(id));
        }

        info!("Student {} deleted", id);
        Ok(())
    }
}
