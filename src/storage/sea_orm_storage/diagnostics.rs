use super::{SeaOrmStorage, db_error};
use crate::entity::grades::{Column as GradeColumn, Entity as Grades};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::Result;
use crate::models::{diagnostics::responses::StoreSnapshot, users::entities::ADMIN_ROLE};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

impl SeaOrmStorage {
    /// 诊断快照：全部年级与管理员账户
    pub async fn snapshot_impl(&self) -> Result<StoreSnapshot> {
        let grades = Grades::find()
            .order_by_asc(GradeColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询年级快照失败", e))?;

        let admin = Users::find()
            .filter(UserColumn::Role.eq(ADMIN_ROLE))
            .order_by_asc(UserColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询管理员快照失败", e))?;

        Ok(StoreSnapshot {
            grades: grades.into_iter().map(|m| m.into_grade()).collect(),
            admin: admin.into_iter().map(|m| m.into_user()).collect(),
        })
    }
}
