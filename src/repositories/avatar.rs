use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::entities::avatar::{self, Entity as Avatar};
use crate::models::avatar::AvatarMeta;

/// One page of avatar metadata plus the totals needed to page through it.
#[derive(Debug)]
pub struct AvatarPage {
    pub items: Vec<AvatarMeta>,
    pub total_items: u64,
    pub total_pages: u64,
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<avatar::Model>, DbErr> {
    Avatar::find_by_id(id).one(db).await
}

pub async fn find_by_student_id<C: ConnectionTrait>(
    db: &C,
    student_id: i32,
) -> Result<Option<avatar::Model>, DbErr> {
    Avatar::find()
        .filter(avatar::Column::StudentId.eq(student_id))
        .one(db)
        .await
}

/// Blob locations of the avatars owned by the given students.
pub async fn file_paths_for_students<C: ConnectionTrait>(
    db: &C,
    student_ids: Vec<i32>,
) -> Result<Vec<String>, DbErr> {
    if student_ids.is_empty() {
        return Ok(Vec::new());
    }

    let paths: Vec<Option<String>> = Avatar::find()
        .select_only()
        .column(avatar::Column::FilePath)
        .filter(avatar::Column::StudentId.is_in(student_ids))
        .into_tuple()
        .all(db)
        .await?;

    Ok(paths.into_iter().flatten().collect())
}

pub async fn delete_by_student_ids<C: ConnectionTrait>(
    db: &C,
    student_ids: Vec<i32>,
) -> Result<u64, DbErr> {
    if student_ids.is_empty() {
        return Ok(0);
    }

    let res = Avatar::delete_many()
        .filter(avatar::Column::StudentId.is_in(student_ids))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

/// Inserts the avatar, or overwrites the student's existing one in place.
pub async fn upsert<C: ConnectionTrait>(db: &C, model: avatar::ActiveModel) -> Result<(), DbErr> {
    Avatar::insert(model)
        .on_conflict(
            OnConflict::column(avatar::Column::StudentId)
                .update_columns([
                    avatar::Column::FilePath,
                    avatar::Column::FileSize,
                    avatar::Column::MediaType,
                    avatar::Column::Data,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    Ok(())
}

pub async fn count_for_student<C: ConnectionTrait>(db: &C, student_id: i32) -> Result<u64, DbErr> {
    Avatar::find()
        .filter(avatar::Column::StudentId.eq(student_id))
        .count(db)
        .await
}

/// `page` is 1-based.
pub async fn page<C: ConnectionTrait>(db: &C, page: u64, limit: u64) -> Result<AvatarPage, DbErr> {
    let paginator = Avatar::find()
        .select_only()
        .columns([
            avatar::Column::Id,
            avatar::Column::FilePath,
            avatar::Column::FileSize,
            avatar::Column::MediaType,
            avatar::Column::StudentId,
        ])
        .order_by_asc(avatar::Column::Id)
        .into_model::<AvatarMeta>()
        .paginate(db, limit);

    let total_items = paginator.num_items().await?;
    let total_pages = paginator.num_pages().await?;
    let items = paginator.fetch_page(page.saturating_sub(1)).await?;

    Ok(AvatarPage {
        items,
        total_items,
        total_pages,
    })
}
