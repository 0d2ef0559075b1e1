use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};
use tokio::sync::RwLock;

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::AttemptRecord,
};

/// Result sink for finished attempts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttemptResultRepository: Send + Sync {
    async fn create(&self, record: AttemptRecord) -> AppResult<AttemptRecord>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<AttemptRecord>>;
    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<AttemptRecord>>;
    async fn find_by_user_and_chapter(
        &self,
        user_id: &str,
        chapter_id: &str,
    ) -> AppResult<Vec<AttemptRecord>>;
    async fn count_user_attempts(&self, user_id: &str, chapter_id: &str) -> AppResult<usize>;
}

pub struct MongoAttemptResultRepository {
    collection: Collection<AttemptRecord>,
}

impl MongoAttemptResultRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for attempt results collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let user_chapter_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "chapter_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("user_chapter".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(user_chapter_index).await?;

        log::info!("Successfully created indexes for attempt results collection");
        Ok(())
    }
}

#[async_trait]
impl AttemptResultRepository for MongoAttemptResultRepository {
    async fn create(&self, record: AttemptRecord) -> AppResult<AttemptRecord> {
        self.collection.insert_one(&record).await.map_err(|err| {
            if is_duplicate_key(&err) {
                AppError::AlreadyExists(format!("Attempt with id '{}' already exists", record.id))
            } else {
                err.into()
            }
        })?;
        Ok(record)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<AttemptRecord>> {
        let record = self.collection.find_one(doc! { "id": id }).await?;
        Ok(record)
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<AttemptRecord>> {
        let records = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "attempt_number": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(records)
    }

    async fn find_by_user_and_chapter(
        &self,
        user_id: &str,
        chapter_id: &str,
    ) -> AppResult<Vec<AttemptRecord>> {
        let records = self
            .collection
            .find(doc! {
                "user_id": user_id,
                "chapter_id": chapter_id
            })
            .sort(doc! { "attempt_number": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(records)
    }

    async fn count_user_attempts(&self, user_id: &str, chapter_id: &str) -> AppResult<usize> {
        let count = self
            .collection
            .count_documents(doc! {
                "user_id": user_id,
                "chapter_id": chapter_id
            })
            .await?;
        Ok(count as usize)
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        _ => false,
    }
}

/// Process-local sink for runs without a database.
#[derive(Default)]
pub struct InMemoryAttemptResultRepository {
    records: Arc<RwLock<HashMap<String, AttemptRecord>>>,
}

impl InMemoryAttemptResultRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttemptResultRepository for InMemoryAttemptResultRepository {
    async fn create(&self, record: AttemptRecord) -> AppResult<AttemptRecord> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.id) {
            return Err(AppError::AlreadyExists(format!(
                "Attempt with id '{}' already exists",
                record.id
            )));
        }
        records.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<AttemptRecord>> {
        let records = self.records.read().await;
        Ok(records.get(id).cloned())
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<AttemptRecord>> {
        let records = self.records.read().await;
        let mut items: Vec<_> = records
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            a.chapter_id
                .cmp(&b.chapter_id)
                .then(a.attempt_number.cmp(&b.attempt_number))
        });
        Ok(items)
    }

    async fn find_by_user_and_chapter(
        &self,
        user_id: &str,
        chapter_id: &str,
    ) -> AppResult<Vec<AttemptRecord>> {
        let records = self.records.read().await;
        let mut items: Vec<_> = records
            .values()
            .filter(|r| r.user_id == user_id && r.chapter_id == chapter_id)
            .cloned()
            .collect();
        items.sort_by_key(|r| r.attempt_number);
        Ok(items)
    }

    async fn count_user_attempts(&self, user_id: &str, chapter_id: &str) -> AppResult<usize> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| r.user_id == user_id && r.chapter_id == chapter_id)
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::test_attempt_result;

    #[tokio::test]
    async fn in_memory_rejects_duplicate_ids() {
        let repo = InMemoryAttemptResultRepository::new();
        let record = AttemptRecord::new("user-1", 1, test_attempt_result("optics", true, 5, 10, 12));

        repo.create(record.clone()).await.unwrap();
        let err = repo.create(record).await.unwrap_err();

        assert_eq!(err.error_code(), "ALREADY_EXISTS");
    }

    #[tokio::test]
    async fn in_memory_filters_by_user_and_chapter() {
        let repo = InMemoryAttemptResultRepository::new();
        repo.create(AttemptRecord::new("user-1", 1, test_attempt_result("optics", false, 1, 3, 4)))
            .await
            .unwrap();
        repo.create(AttemptRecord::new("user-1", 1, test_attempt_result("waves", true, 5, 10, 9)))
            .await
            .unwrap();
        repo.create(AttemptRecord::new("user-2", 1, test_attempt_result("optics", true, 5, 11, 7)))
            .await
            .unwrap();

        assert_eq!(repo.count_user_attempts("user-1", "optics").await.unwrap(), 1);
        assert_eq!(repo.find_by_user("user-1").await.unwrap().len(), 2);
        let optics = repo.find_by_user_and_chapter("user-2", "optics").await.unwrap();
        assert_eq!(optics.len(), 1);
        assert!(optics[0].result.success);
    }
}
