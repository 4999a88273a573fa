use bson::oid::ObjectId;
use chrono::Utc;
use tracing::{debug, info};

use crate::domain::models::event::{Event, NewEvent};
use crate::domain::ports::EventRepository;
use crate::domain::services::normalize::{
    normalize_date, normalize_time, require_list, require_text, slugify,
};
use crate::error::AppError;

pub const SIMILAR_EVENTS_LIMIT: i64 = 3;

/// Pre-save pipeline. `previous` is the stored version of the record, if any;
/// slug, date and time are only recomputed when they differ from it.
pub fn prepare_event(event: &mut Event, previous: Option<&Event>) -> Result<(), AppError> {
    event.title = require_text("title", &event.title)?;
    event.description = require_text("description", &event.description)?;
    event.overview = require_text("overview", &event.overview)?;
    event.image = require_text("image", &event.image)?;
    event.venue = require_text("venue", &event.venue)?;
    event.location = require_text("location", &event.location)?;
    event.mode = require_text("mode", &event.mode)?;
    event.audience = require_text("audience", &event.audience)?;
    event.organizer = require_text("organizer", &event.organizer)?;
    event.agenda = require_list("agenda", &event.agenda)?;
    event.tags = require_list("tags", &event.tags)?;

    let title_changed = previous.map_or(true, |p| p.title != event.title);
    if title_changed || event.slug.is_empty() {
        let slug = slugify(&event.title);
        if slug.is_empty() {
            return Err(AppError::Validation("title must contain at least one letter or digit".into()));
        }
        debug!("Derived slug '{}' from title '{}'", slug, event.title);
        event.slug = slug;
    }

    if previous.map_or(true, |p| p.date != event.date) {
        event.date = normalize_date(&event.date)?;
    }

    if previous.map_or(true, |p| p.time != event.time) {
        event.time = normalize_time(&event.time)?;
    }

    Ok(())
}

pub async fn create_event(repo: &dyn EventRepository, input: NewEvent) -> Result<Event, AppError> {
    let mut event = Event::new(input);
    prepare_event(&mut event, None)?;

    let created = repo.insert(&event).await?;
    info!("Event created: {}", created.slug);
    Ok(created)
}

/// Full-record save of an existing event. Runs the pipeline against the stored
/// version so unchanged fields are left alone.
pub async fn save_event(repo: &dyn EventRepository, mut event: Event) -> Result<Event, AppError> {
    let id = event
        .id
        .ok_or_else(|| AppError::Validation("Event has no id; use create_event".into()))?;

    let previous = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".into()))?;

    prepare_event(&mut event, Some(&previous))?;
    event.created_at = previous.created_at;
    event.updated_at = Utc::now();

    let updated = repo.replace(&event).await?;
    info!("Event updated: {}", updated.slug);
    Ok(updated)
}

pub async fn list_events(repo: &dyn EventRepository) -> Result<Vec<Event>, AppError> {
    repo.list().await
}

pub async fn find_event_by_slug(repo: &dyn EventRepository, slug: &str) -> Result<Event, AppError> {
    repo.find_by_slug(slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event '{}' not found", slug)))
}

pub async fn similar_events(repo: &dyn EventRepository, slug: &str) -> Result<Vec<Event>, AppError> {
    let event = find_event_by_slug(repo, slug).await?;
    let id = event
        .id
        .ok_or_else(|| AppError::NotFound(format!("Event '{}' not found", slug)))?;

    repo.find_by_tags(&event.tags, &id, SIMILAR_EVENTS_LIMIT).await
}

pub async fn delete_event(repo: &dyn EventRepository, id: &str) -> Result<(), AppError> {
    let id = ObjectId::parse_str(id).map_err(|_| AppError::Validation("Invalid event id".into()))?;
    repo.delete(&id).await?;
    info!("Event deleted: {}", id);
    Ok(())
}
