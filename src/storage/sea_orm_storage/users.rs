use super::{SeaOrmStorage, db_error, non_blank, now, require};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{Result, StoreError};
use crate::models::users::{
    entities::{ADMIN_ROLE, User},
    requests::{CreateUserRequest, UpdateUserRequest, UserListQuery, UserSortField},
};
use crate::utils::{
    contains_pattern,
    validate::{validate_required, validate_username},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect,
    Set, SqlErr, sea_query::Expr,
};
use tracing::{debug, info};

fn user_not_found(id: i64) -> StoreError {
    StoreError::not_found(format!("user {id} not found"))
}

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        require("username", validate_username(&req.username))?;
        require("password", validate_required(&req.password))?;
        if let Some(ref role) = req.role {
            require("role", validate_required(role))?;
        }

        let now = now();
        let model = ActiveModel {
            username: Set(req.username),
            password_hash: Set(req.password),
            role: Set(req.role.unwrap_or_else(|| ADMIN_ROLE.to_string())),
            is_super_admin: Set(req.is_super_admin.unwrap_or(false)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                StoreError::invalid_field("username", "already exists")
            }
            _ => db_error("创建用户失败", e),
        })?;

        info!(
            "User {} ({}) created with role {}",
            result.id, result.username, result.role
        );
        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_impl(&self, id: i64) -> Result<User> {
        Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询用户失败", e))?
            .map(|m| m.into_user())
            .ok_or_else(|| user_not_found(id))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<User> {
        Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询用户失败", e))?
            .map(|m| m.into_user())
            .ok_or_else(|| StoreError::not_found(format!("user '{username}' not found")))
    }

    /// 列出用户
    pub async fn list_users_impl(&self, query: UserListQuery) -> Result<Vec<User>> {
        debug!("Listing users with {:?}", query);

        let mut select = Users::find();

        // 搜索条件
        if let Some(search) = non_blank(&query.search) {
            select = select.filter(Column::Username.like(contains_pattern(search)));
        }

        // 角色筛选
        if let Some(role) = non_blank(&query.role) {
            select = select.filter(Column::Role.eq(role));
        }

        if let Some(is_super_admin) = query.is_super_admin {
            select = select.filter(Column::IsSuperAdmin.eq(is_super_admin));
        }

        // 排序
        let order: Order = query.order.unwrap_or_default().into();
        select = match query.sort_by {
            Some(UserSortField::Username) => select.order_by(Column::Username, order),
            Some(UserSortField::CreatedAt) => select.order_by(Column::CreatedAt, order),
            None => select,
        };
        select = select.order_by_asc(Column::Id);

        if let Some((offset, limit)) = query.pagination.window() {
            select = select.offset(offset).limit(limit);
        }

        let users = select
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询用户列表失败", e))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }

    /// 更新用户信息
    pub async fn update_user_impl(&self, id: i64, update: UpdateUserRequest) -> Result<User> {
        if let Some(ref password) = update.password {
            require("password", validate_required(password))?;
        }
        if let Some(ref role) = update.role {
            require("role", validate_required(role))?;
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now()),
            ..Default::default()
        };

        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }

        if let Some(role) = update.role {
            model.role = Set(role);
        }

        if let Some(is_super_admin) = update.is_super_admin {
            model.is_super_admin = Set(is_super_admin);
        }

        let result = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => user_not_found(id),
            e => db_error("更新用户失败", e),
        })?;

        info!("User {} updated", id);
        Ok(result.into_user())
    }

    /// 删除用户
    pub async fn delete_user_impl(&self, id: i64) -> Result<()> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("删除用户失败", e))?;

        if result.rows_affected == 0 {
            return Err(user_not_found(id));
        }

        info!("User {} deleted", id);
        Ok(())
    }

    /// 将指定用户提升为超级管理员
    ///
    /// 单条 UPDATE 完成，重复调用结果相同。
    pub async fn promote_super_admin_impl(&self, username: &str) -> Result<User> {
        let result = Users::update_many()
            .col_expr(Column::IsSuperAdmin, Expr::value(true))
            .col_expr(Column::UpdatedAt, Expr::value(now()))
            .filter(Column::Username.eq(username))
            .exec(&self.db)
            .await
            .map_err(|e| db_error("提升超级管理员失败", e))?;

        // MySQL 在值未变化时 rows_affected 为 0，回查确认用户是否存在
        let user = self.get_user_by_username_impl(username).await?;

        if result.rows_affected > 0 {
            info!("User {} ({}) promoted to super admin", user.id, user.username);
        }
        Ok(user)
    }
}
