use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // Foreign keys to accounts (ON DELETE CASCADE) and the unique pair_key
        // come from the entity definition.
        manager
            .create_table(
                schema
                    .create_table_from_entity(Friendships)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        let conn = manager.get_connection();

        conn.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_friendships_recipient_status ON friendships(recipient_id, status)",
        )
        .await?;

        conn.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_friendships_requester_status ON friendships(requester_id, status)",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        conn.execute_unprepared("DROP INDEX IF EXISTS idx_friendships_requester_status")
            .await?;
        conn.execute_unprepared("DROP INDEX IF EXISTS idx_friendships_recipient_status")
            .await?;

        manager
            .drop_table(Table::drop().table(Friendships).to_owned())
            .await?;

        Ok(())
    }
}
