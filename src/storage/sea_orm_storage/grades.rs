//! 年级存储操作

use super::{SeaOrmStorage, db_error, non_blank, now, require};
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{Result, StoreError};
use crate::models::grades::{
    entities::{DeletePolicy, Grade, GradeDeletion},
    requests::{CreateGradeRequest, GradeListQuery, GradeSortField, UpdateGradeRequest},
};
use crate::utils::{contains_pattern, validate::validate_required};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};
use tracing::{debug, info, warn};

fn grade_not_found(id: i64) -> StoreError {
    StoreError::not_found(format!("grade {id} not found"))
}

impl SeaOrmStorage {
    /// 创建年级
    pub async fn create_grade_impl(&self, req: CreateGradeRequest) -> Result<Grade> {
        require("name", validate_required(&req.name))?;

        let now = now();
        let model = ActiveModel {
            name: Set(req.name),
            level: Set(req.level),
            description: Set(req.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("创建年级失败", e))?;

        info!("Grade {} ({}) created", result.id, result.name);
        Ok(result.into_grade())
    }

    /// 通过 ID 获取年级
    pub async fn get_grade_impl(&self, id: i64) -> Result<Grade> {
        Grades::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询年级失败", e))?
            .map(|m| m.into_grade())
            .ok_or_else(|| grade_not_found(id))
    }

    /// 列出年级
    pub async fn list_grades_impl(&self, query: GradeListQuery) -> Result<Vec<Grade>> {
        debug!("Listing grades with {:?}", query);

        let mut select = Grades::find();

        // 级别筛选
        if let Some(level) = non_blank(&query.level) {
            select = select.filter(Column::Level.eq(level));
        }

        // 名称搜索
        if let Some(search) = non_blank(&query.search) {
            select = select.filter(Column::Name.like(contains_pattern(search)));
        }

        // 排序，ID 作为稳定的次级排序
        let order: Order = query.order.unwrap_or_default().into();
        select = match query.sort_by {
            Some(GradeSortField::Name) => select.order_by(Column::Name, order),
            Some(GradeSortField::Level) => select.order_by(Column::Level, order),
            Some(GradeSortField::CreatedAt) => select.order_by(Column::CreatedAt, order),
            None => select,
        };
        select = select.order_by_asc(Column::Id);

        if let Some((offset, limit)) = query.pagination.window() {
            select = select.offset(offset).limit(limit);
        }

        let grades = select
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询年级列表失败", e))?;

        Ok(grades.into_iter().map(|m| m.into_grade()).collect())
    }

    /// 更新年级，单条 UPDATE 语句完成存在性判断
    pub async fn update_grade_impl(&self, id: i64, update: UpdateGradeRequest) -> Result<Grade> {
        if let Some(ref name) = update.name {
            require("name", validate_required(name))?;
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(level) = update.level {
            model.level = Set(Some(level));
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        let result = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => grade_not_found(id),
            e => db_error("更新年级失败", e),
        })?;

        info!("Grade {} updated", id);
        Ok(result.into_grade())
    }

    /// 统计引用该年级的学生数量
    pub async fn count_students_in_grade_impl(&self, id: i64) -> Result<u64> {
        // 确认年级存在，不存在时返回 NotFound 而不是 0
        self.get_grade_impl(id).await?;

        Students::find()
            .filter(StudentColumn::GradeId.eq(id))
            .count(&self.db)
            .await
            .map_err(|e| db_error("统计年级学生数量失败", e))
    }

    /// 删除年级
    ///
    /// 引用检查、级联删除与年级删除在同一事务内完成；
    /// 外键 RESTRICT 约束兜底并发插入的学生。
    pub async fn delete_grade_impl(&self, id: i64, policy: DeletePolicy) -> Result<GradeDeletion> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("开启事务失败", e))?;

        let exists = Grades::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| db_error("查询年级失败", e))?
            .is_some();
        if !exists {
            return Err(grade_not_found(id));
        }

        let referencing = Students::find()
            .filter(StudentColumn::GradeId.eq(id))
            .count(&txn)
            .await
            .map_err(|e| db_error("统计年级学生数量失败", e))?;

        let students_removed = match policy {
            DeletePolicy::Restrict if referencing > 0 => {
                warn!(
                    "Refusing to delete grade {}: referenced by {} student(s)",
                    id, referencing
                );
                return Err(StoreError::integrity(format!(
                    "grade {id} is referenced by {referencing} student(s)"
                )));
            }
            DeletePolicy::Restrict => 0,
            DeletePolicy::Cascade => {
                Students::delete_many()
                    .filter(StudentColumn::GradeId.eq(id))
                    .exec(&txn)
                    .await
                    .map_err(|e| db_error("级联删除学生失败", e))?
                    .rows_affected
            }
        };

        Grades::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => StoreError::integrity(format!(
                    "grade {id} is still referenced by students"
                )),
                _ => db_error("删除年级失败", e),
            })?;

        txn.commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))?;

        info!(
            "Grade {} deleted ({:?}), {} student(s) removed",
            id, policy, students_removed
        );

        Ok(GradeDeletion {
            grade_id: id,
            students_removed,
        })
    }
}
