use crate::domain::{models::booking::Booking, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::{Collection, Database};

pub const BOOKINGS_COLLECTION: &str = "bookings";

pub struct MongoBookingRepo {
    collection: Collection<Booking>,
}

impl MongoBookingRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(BOOKINGS_COLLECTION),
        }
    }
}

#[async_trait]
impl BookingRepository for MongoBookingRepo {
    async fn insert(&self, booking: &Booking) -> Result<Booking, AppError> {
        let result = self
            .collection
            .insert_one(booking)
            .await
            .map_err(AppError::from_write)?;

        let mut created = booking.clone();
        created.id = result.inserted_id.as_object_id();
        Ok(created)
    }

    async fn list_by_event(&self, event_id: &ObjectId) -> Result<Vec<Booking>, AppError> {
        let cursor = self
            .collection
            .find(doc! { "eventId": *event_id })
            .sort(doc! { "createdAt": -1 })
            .await?;
        let records: Vec<Booking> = cursor.try_collect().await?;
        Ok(records)
    }

    async fn count_by_event(&self, event_id: &ObjectId) -> Result<u64, AppError> {
        Ok(self.collection.count_documents(doc! { "eventId": *event_id }).await?)
    }
}
