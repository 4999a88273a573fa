use crate::domain::{models::event::Event, ports::EventRepository};
use crate::error::AppError;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::{Collection, Database};

pub const EVENTS_COLLECTION: &str = "events";

pub struct MongoEventRepo {
    collection: Collection<Event>,
}

impl MongoEventRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(EVENTS_COLLECTION),
        }
    }
}

#[async_trait]
impl EventRepository for MongoEventRepo {
    async fn insert(&self, event: &Event) -> Result<Event, AppError> {
        let result = self
            .collection
            .insert_one(event)
            .await
            .map_err(AppError::from_write)?;

        let mut created = event.clone();
        created.id = result.inserted_id.as_object_id();
        Ok(created)
    }

    async fn replace(&self, event: &Event) -> Result<Event, AppError> {
        let id = event
            .id
            .ok_or_else(|| AppError::NotFound("Event not found".into()))?;

        let result = self
            .collection
            .replace_one(doc! { "_id": id }, event)
            .await
            .map_err(AppError::from_write)?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("Event not found".into()));
        }
        Ok(event.clone())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Event>, AppError> {
        Ok(self.collection.find_one(doc! { "_id": *id }).await?)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Event>, AppError> {
        Ok(self.collection.find_one(doc! { "slug": slug }).await?)
    }

    async fn exists(&self, id: &ObjectId) -> Result<bool, AppError> {
        let count = self
            .collection
            .count_documents(doc! { "_id": *id })
            .await?;
        Ok(count > 0)
    }

    async fn list(&self) -> Result<Vec<Event>, AppError> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .await?;
        let records: Vec<Event> = cursor.try_collect().await?;
        Ok(records)
    }

    async fn find_by_tags(&self, tags: &[String], exclude: &ObjectId, limit: i64) -> Result<Vec<Event>, AppError> {
        let cursor = self
            .collection
            .find(doc! { "_id": { "$ne": *exclude }, "tags": { "$in": tags.to_vec() } })
            .sort(doc! { "createdAt": -1 })
            .limit(limit)
            .await?;
        let records: Vec<Event> = cursor.try_collect().await?;
        Ok(records)
    }

    async fn delete(&self, id: &ObjectId) -> Result<(), AppError> {
        let result = self.collection.delete_one(doc! { "_id": *id }).await?;
        if result.deleted_count == 0 {
            return Err(AppError::NotFound("Event not found".into()));
        }
        Ok(())
    }
}
