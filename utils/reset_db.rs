use sea_orm::{ConnectionTrait, Database, Statement};
use std::env;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let db = Database::connect(database_url)
        .await
        .expect("Failed to connect to database");
    let backend = db.get_database_backend();

    for table in ["avatar", "student", "faculty", "seaql_migrations"] {
        db.execute(Statement::from_string(
            backend,
            format!("DROP TABLE IF EXISTS \"{}\"", table),
        ))
        .await
        .unwrap_or_else(|e| panic!("Failed to drop {}: {}", table, e));
    }
    println!("Database reset successfully");
}
