// Database connection and schema bootstrap

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema};

use crate::models::{orders, payments, personal_access_tokens, users};

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options.sqlx_logging(true);

    Database::connect(options).await
}

/// Creates every table that does not exist yet, parents before children.
pub async fn sync_schema<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    create_table(db, users::Entity).await?;
    create_table(db, orders::Entity).await?;
    create_table(db, payments::Entity).await?;
    create_table(db, personal_access_tokens::Entity).await?;
    Ok(())
}

async fn create_table<C, E>(db: &C, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let table = entity.table_name().to_owned();
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(backend.build(&statement)).await?;
    tracing::debug!(%table, "table ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn test_sync_schema_creates_parents_first() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results((0..4).map(|_| MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }))
            .into_connection();

        sync_schema(&db).await.unwrap();

        let log = format!("{:?}", db.into_transaction_log());
        let position = |table: &str| log.find(table).unwrap();

        assert!(log.contains("CREATE TABLE IF NOT EXISTS"));
        assert!(position("users") < position("orders"));
        assert!(position("orders") < position("payments"));
        assert!(position("payments") < position("personal_access_tokens"));
    }
}
