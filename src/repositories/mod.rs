//! Query functions over the relational store.
//!
//! Every function is generic over [`sea_orm::ConnectionTrait`] so services
//! can call it with either the pooled connection or an open transaction.

pub mod avatar;
pub mod faculty;
pub mod student;

use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::ColumnTrait;

const LIKE_ESCAPE: char = '\\';

/// Makes `%`, `_` and the escape character match literally.
fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

fn ilike<C: ColumnTrait>(column: C, pattern: String) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column)))
        .like(LikeExpr::new(pattern.to_lowercase()).escape(LIKE_ESCAPE))
}

/// Case-insensitive "column contains `fragment`".
pub(crate) fn contains_ci<C: ColumnTrait>(column: C, fragment: &str) -> SimpleExpr {
    ilike(column, format!("%{}%", escape_like(fragment)))
}

/// Case-insensitive "column starts with `prefix`".
pub(crate) fn starts_with_ci<C: ColumnTrait>(column: C, prefix: &str) -> SimpleExpr {
    ilike(column, format!("{}%", escape_like(prefix)))
}
