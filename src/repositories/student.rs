use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::student::{self, Entity as Student};
use crate::models::student::StudentInput;

use super::{contains_ci, starts_with_ci};

#[derive(Debug, FromQueryResult)]
struct AverageAge {
    average_age: Option<f64>,
}

pub async fn insert<C: ConnectionTrait>(db: &C, input: StudentInput) -> Result<student::Model, DbErr> {
    student::ActiveModel {
        name: Set(input.name),
        age: Set(input.age),
        faculty_id: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<student::Model>, DbErr> {
    Student::find_by_id(id).one(db).await
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    student: student::ActiveModel,
) -> Result<student::Model, DbErr> {
    student.update(db).await
}

pub async fn delete_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<u64, DbErr> {
    let res = Student::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected)
}

pub async fn delete_by_faculty<C: ConnectionTrait>(db: &C, faculty_id: i32) -> Result<u64, DbErr> {
    let res = Student::delete_many()
        .filter(student::Column::FacultyId.eq(faculty_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<student::Model>, DbErr> {
    Student::find().order_by_asc(student::Column::Id).all(db).await
}

pub async fn find_by_age_between<C: ConnectionTrait>(
    db: &C,
    min_age: i32,
    max_age: i32,
) -> Result<Vec<student::Model>, DbErr> {
    Student::find()
        .filter(student::Column::Age.between(min_age, max_age))
        .all(db)
        .await
}

pub async fn find_by_name_containing<C: ConnectionTrait>(
    db: &C,
    fragment: &str,
) -> Result<Vec<student::Model>, DbErr> {
    Student::find()
        .filter(contains_ci(student::Column::Name, fragment))
        .order_by_asc(student::Column::Id)
        .all(db)
        .await
}

pub async fn find_by_name_prefix<C: ConnectionTrait>(
    db: &C,
    prefix: &str,
) -> Result<Vec<student::Model>, DbErr> {
    Student::find()
        .filter(starts_with_ci(student::Column::Name, prefix))
        .all(db)
        .await
}

pub async fn find_by_faculty<C: ConnectionTrait>(
    db: &C,
    faculty_id: i32,
) -> Result<Vec<student::Model>, DbErr> {
    Student::find()
        .filter(student::Column::FacultyId.eq(faculty_id))
        .order_by_asc(student::Column::Id)
        .all(db)
        .await
}

pub async fn ids_by_faculty<C: ConnectionTrait>(db: &C, faculty_id: i32) -> Result<Vec<i32>, DbErr> {
    Student::find()
        .select_only()
        .column(student::Column::Id)
        .filter(student::Column::FacultyId.eq(faculty_id))
        .into_tuple()
        .all(db)
        .await
}

pub async fn count<C: ConnectionTrait>(db: &C) -> Result<u64, DbErr> {
    Student::find().count(db).await
}

/// Mean age over all students, `None` when the table is empty.
pub async fn average_age<C: ConnectionTrait>(db: &C) -> Result<Option<f64>, DbErr> {
    let row = Student::find()
        .select_only()
        .column_as(Expr::cust("CAST(AVG(age) AS DOUBLE PRECISION)"), "average_age")
        .into_model::<AverageAge>()
        .one(db)
        .await?;

    Ok(row.and_then(|r| r.average_age))
}

/// The `n` most recently created students, newest first.
pub async fn find_latest<C: ConnectionTrait>(db: &C, n: u64) -> Result<Vec<student::Model>, DbErr> {
    Student::find()
        .order_by_desc(student::Column::Id)
        .paginate(db, n)
        .fetch_page(0)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;

    fn input(name: &str, age: i32) -> StudentInput {
        StudentInput {
            name: name.to_string(),
            age,
        }
    }

    #[tokio::test]
    async fn age_range_is_inclusive() {
        let db = test_db().await;
        for (name, age) in [("a", 15), ("b", 18), ("c", 20), ("d", 22)] {
            insert(&db, input(name, age)).await.unwrap();
        }

        let mut ages: Vec<i32> = find_by_age_between(&db, 18, 20)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.age)
            .collect();
        ages.sort();
        assert_eq!(ages, vec![18, 20]);
    }

    #[tokio::test]
    async fn name_search_ignores_case() {
        let db = test_db().await;
        insert(&db, input("Harry Potter", 17)).await.unwrap();
        insert(&db, input("Hermione Granger", 17)).await.unwrap();
        insert(&db, input("Ron Weasley", 17)).await.unwrap();

        let found = find_by_name_containing(&db, "POTT").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Harry Potter");

        let prefixed = find_by_name_prefix(&db, "h").await.unwrap();
        assert_eq!(prefixed.len(), 2);
    }

    #[tokio::test]
    async fn wildcards_in_name_search_match_literally() {
        let db = test_db().await;
        insert(&db, input("Harry", 17)).await.unwrap();
        insert(&db, input("Ron", 17)).await.unwrap();
        insert(&db, input("Hermione", 17)).await.unwrap();

        assert!(find_by_name_containing(&db, "%").await.unwrap().is_empty());
        assert!(find_by_name_containing(&db, "_").await.unwrap().is_empty());
        assert!(find_by_name_prefix(&db, "_").await.unwrap().is_empty());
        assert!(find_by_name_prefix(&db, "%").await.unwrap().is_empty());

        insert(&db, input("snake_case", 17)).await.unwrap();
        let found = find_by_name_containing(&db, "_").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "snake_case");
    }

    #[tokio::test]
    async fn average_age_is_none_for_empty_table() {
        let db = test_db().await;
        assert_eq!(average_age(&db).await.unwrap(), None);

        insert(&db, input("a", 17)).await.unwrap();
        insert(&db, input("b", 20)).await.unwrap();
        assert_eq!(average_age(&db).await.unwrap(), Some(18.5));
        assert_eq!(count(&db).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn latest_is_newest_first_and_bounded() {
        let db = test_db().await;
        for i in 0..7 {
            insert(&db, input(&format!("s{}", i), 18)).await.unwrap();
        }

        let ids: Vec<i32> = find_latest(&db, 5).await.unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![7, 6, 5, 4, 3]);
    }
}
