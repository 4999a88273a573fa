#![allow(dead_code)]

use async_trait::async_trait;
use bson::oid::ObjectId;
use event_listing::{
    config::Config,
    domain::models::{booking::Booking, event::{Event, NewEvent}},
    domain::ports::{BookingRepository, EventRepository},
    error::AppError,
    state::AppState,
};
use std::sync::{Arc, Mutex};

/// Mirrors the storage-level unique index on `slug`.
#[derive(Default)]
pub struct InMemoryEventRepo {
    events: Mutex<Vec<Event>>,
}

#[async_trait]
impl EventRepository for InMemoryEventRepo {
    async fn insert(&self, event: &Event) -> Result<Event, AppError> {
        let mut events = self.events.lock().unwrap();
        if events.iter().any(|e| e.slug == event.slug) {
            return Err(AppError::ConstraintViolation("Resource already exists (duplicate entry)".into()));
        }
        let mut created = event.clone();
        created.id = Some(ObjectId::new());
        events.push(created.clone());
        Ok(created)
    }

    async fn replace(&self, event: &Event) -> Result<Event, AppError> {
        let mut events = self.events.lock().unwrap();
        if events.iter().any(|e| e.slug == event.slug && e.id != event.id) {
            return Err(AppError::ConstraintViolation("Resource already exists (duplicate entry)".into()));
        }
        let stored = events
            .iter_mut()
            .find(|e| e.id.is_some() && e.id == event.id)
            .ok_or_else(|| AppError::NotFound("Event not found".into()))?;
        *stored = event.clone();
        Ok(event.clone())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Event>, AppError> {
        Ok(self.events.lock().unwrap().iter().find(|e| e.id.as_ref() == Some(id)).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Event>, AppError> {
        Ok(self.events.lock().unwrap().iter().find(|e| e.slug == slug).cloned())
    }

    async fn exists(&self, id: &ObjectId) -> Result<bool, AppError> {
        Ok(self.events.lock().unwrap().iter().any(|e| e.id.as_ref() == Some(id)))
    }

    async fn list(&self) -> Result<Vec<Event>, AppError> {
        let mut events = self.events.lock().unwrap().clone();
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(events)
    }

    async fn find_by_tags(&self, tags: &[String], exclude: &ObjectId, limit: i64) -> Result<Vec<Event>, AppError> {
        let mut events: Vec<Event> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.id.as_ref() != Some(exclude))
            .filter(|e| e.tags.iter().any(|t| tags.contains(t)))
            .cloned()
            .collect();
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        events.truncate(limit as usize);
        Ok(events)
    }

    async fn delete(&self, id: &ObjectId) -> Result<(), AppError> {
        let mut events = self.events.lock().unwrap();
        let before = events.len();
        events.retain(|e| e.id.as_ref() != Some(id));
        if events.len() == before {
            return Err(AppError::NotFound("Event not found".into()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryBookingRepo {
    bookings: Mutex<Vec<Booking>>,
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepo {
    async fn insert(&self, booking: &Booking) -> Result<Booking, AppError> {
        let mut created = booking.clone();
        created.id = Some(ObjectId::new());
        self.bookings.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_by_event(&self, event_id: &ObjectId) -> Result<Vec<Booking>, AppError> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| &b.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn count_by_event(&self, event_id: &ObjectId) -> Result<u64, AppError> {
        Ok(self.bookings.lock().unwrap().iter().filter(|b| &b.event_id == event_id).count() as u64)
    }
}

pub struct TestApp {
    pub state: Arc<AppState>,
}

impl TestApp {
    pub fn new() -> Self {
        let state = Arc::new(AppState {
            config: Config::with_uri("mongodb://localhost:27017/event_listing_test"),
            event_repo: Arc::new(InMemoryEventRepo::default()),
            booking_repo: Arc::new(InMemoryBookingRepo::default()),
        });

        Self { state }
    }

    pub fn events(&self) -> &dyn EventRepository {
        self.state.event_repo.as_ref()
    }

    pub fn bookings(&self) -> &dyn BookingRepository {
        self.state.booking_repo.as_ref()
    }
}

pub fn new_event(title: &str, tags: &[&str]) -> NewEvent {
    NewEvent {
        title: title.to_string(),
        description: "Two days of talks and hands-on sessions.".to_string(),
        overview: "Meet the community and learn from practitioners.".to_string(),
        image: "/images/event-full.png".to_string(),
        venue: "Moscone Center".to_string(),
        location: "San Francisco, CA".to_string(),
        date: "2025-12-01".to_string(),
        time: "09:00".to_string(),
        mode: "hybrid".to_string(),
        audience: "Developers".to_string(),
        agenda: vec!["08:30 Registration".to_string(), "09:00 Keynote".to_string()],
        organizer: "Dev Community".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}
