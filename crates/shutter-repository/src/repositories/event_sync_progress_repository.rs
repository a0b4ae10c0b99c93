use std::time::Instant;

use sea_orm::{ActiveValue, ConnectionTrait, EntityTrait, sea_query::OnConflict};

use crate::{
    error::{RepositoryError, Result},
    models::event_sync_progress::{ActiveModel, Column, Entity, Model},
    observability::record_repository_query,
    types::EventSyncProgress,
};

/// The cursor is a singleton row.
const PROGRESS_ROW_ID: i32 = 1;

pub struct EventSyncProgressRepository<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> EventSyncProgressRepository<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    /// Returns the persisted cursor, or `None` if no event was ever applied.
    pub async fn get(&self) -> Result<Option<EventSyncProgress>> {
        let started = Instant::now();
        let result = async {
            let row = Entity::find_by_id(PROGRESS_ROW_ID).one(self.conn).await?;
            row.map(Self::to_progress).transpose()
        }
        .await;

        match &result {
            Ok(row) => record_repository_query(
                "event_sync_progress",
                "get",
                "ok",
                started.elapsed(),
                Some(usize::from(row.is_some())),
            ),
            Err(_) => record_repository_query(
                "event_sync_progress",
                "get",
                "error",
                started.elapsed(),
                None,
            ),
        }

        result
    }

    /// Overwrites the cursor.
    pub async fn update(&self, progress: EventSyncProgress) -> Result<()> {
        let started = Instant::now();
        let result = async {
            let next_block_number = i64::try_from(progress.next_block_number).map_err(|_| {
                RepositoryError::invalid_value(
                    "next_block_number",
                    format!("{} exceeds i64", progress.next_block_number),
                )
            })?;
            let next_log_index = i64::try_from(progress.next_log_index).map_err(|_| {
                RepositoryError::invalid_value(
                    "next_log_index",
                    format!("{} exceeds i64", progress.next_log_index),
                )
            })?;

            let model = ActiveModel {
                id: ActiveValue::Set(PROGRESS_ROW_ID),
                next_block_number: ActiveValue::Set(next_block_number),
                next_log_index: ActiveValue::Set(next_log_index),
            };

            Entity::insert(model)
                .on_conflict(
                    OnConflict::column(Column::Id)
                        .update_columns([Column::NextBlockNumber, Column::NextLogIndex])
                        .to_owned(),
                )
                .exec_without_returning(self.conn)
                .await?;
            Ok::<_, RepositoryError>(())
        }
        .await;

        match &result {
            Ok(()) => record_repository_query(
                "event_sync_progress",
                "update",
                "ok",
                started.elapsed(),
                Some(1),
            ),
            Err(_) => record_repository_query(
                "event_sync_progress",
                "update",
                "error",
                started.elapsed(),
                None,
            ),
        }

        result
    }

    fn to_progress(model: Model) -> Result<EventSyncProgress> {
        let next_block_number = u64::try_from(model.next_block_number).map_err(|_| {
            RepositoryError::invalid_value("next_block_number", "negative value stored")
        })?;
        let next_log_index = u64::try_from(model.next_log_index)
            .map_err(|_| RepositoryError::invalid_value("next_log_index", "negative value stored"))?;
        Ok(EventSyncProgress {
            next_block_number,
            next_log_index,
        })
    }
}
