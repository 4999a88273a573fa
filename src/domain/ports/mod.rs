use crate::domain::models::{booking::Booking, event::Event};
use crate::error::AppError;
use async_trait::async_trait;
use bson::oid::ObjectId;

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Inserts a new record and returns it with its storage id.
    async fn insert(&self, event: &Event) -> Result<Event, AppError>;
    /// Replaces the stored record with the same id.
    async fn replace(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Event>, AppError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Event>, AppError>;
    async fn exists(&self, id: &ObjectId) -> Result<bool, AppError>;
    /// Newest first.
    async fn list(&self) -> Result<Vec<Event>, AppError>;
    /// Events with at least one tag in `tags`, excluding `exclude`, newest first.
    async fn find_by_tags(&self, tags: &[String], exclude: &ObjectId, limit: i64) -> Result<Vec<Event>, AppError>;
    async fn delete(&self, id: &ObjectId) -> Result<(), AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn list_by_event(&self, event_id: &ObjectId) -> Result<Vec<Booking>, AppError>;
    async fn count_by_event(&self, event_id: &ObjectId) -> Result<u64, AppError>;
}

/// The one question the booking pipeline asks of the event store.
#[async_trait]
pub trait EventLookup: Send + Sync {
    async fn event_exists(&self, id: &ObjectId) -> Result<bool, AppError>;
}

#[async_trait]
impl<T: EventRepository + ?Sized> EventLookup for T {
    async fn event_exists(&self, id: &ObjectId) -> Result<bool, AppError> {
        self.exists(id).await
    }
}
