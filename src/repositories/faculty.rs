use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::faculty::{self, Entity as Faculty};
use crate::models::faculty::FacultyInput;

use super::contains_ci;

pub async fn insert<C: ConnectionTrait>(db: &C, input: FacultyInput) -> Result<faculty::Model, DbErr> {
    faculty::ActiveModel {
        name: Set(input.name),
        color: Set(input.color),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<faculty::Model>, DbErr> {
    Faculty::find_by_id(id).one(db).await
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    faculty: faculty::ActiveModel,
) -> Result<faculty::Model, DbErr> {
    faculty.update(db).await
}

pub async fn delete_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<u64, DbErr> {
    let res = Faculty::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected)
}

pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<faculty::Model>, DbErr> {
    Faculty::find().order_by_asc(faculty::Column::Id).all(db).await
}

pub async fn find_by_color_containing<C: ConnectionTrait>(
    db: &C,
    color: &str,
) -> Result<Vec<faculty::Model>, DbErr> {
    Faculty::find()
        .filter(contains_ci(faculty::Column::Color, color))
        .order_by_asc(faculty::Column::Id)
        .all(db)
        .await
}

pub async fn find_by_name_containing<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> Result<Vec<faculty::Model>, DbErr> {
    Faculty::find()
        .filter(contains_ci(faculty::Column::Name, name))
        .order_by_asc(faculty::Column::Id)
        .all(db)
        .await
}
