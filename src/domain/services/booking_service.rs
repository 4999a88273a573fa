use bson::oid::ObjectId;
use chrono::Utc;
use tracing::{info, warn};

use crate::domain::models::booking::Booking;
use crate::domain::ports::{BookingRepository, EventLookup};
use crate::domain::services::normalize::normalize_email;
use crate::error::AppError;

fn parse_event_id(event_id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(event_id.trim()).map_err(|_| AppError::Validation("Invalid event id".into()))
}

/// Pre-save step for bookings: re-checks the email and confirms the event exists.
pub async fn prepare_booking<L>(booking: &mut Booking, events: &L) -> Result<(), AppError>
where
    L: EventLookup + ?Sized,
{
    booking.email = normalize_email(&booking.email)?;

    if !events.event_exists(&booking.event_id).await? {
        warn!("Booking rejected, event {} does not exist", booking.event_id);
        return Err(AppError::Validation("referenced event does not exist".into()));
    }

    booking.updated_at = Utc::now();
    Ok(())
}

pub async fn create_booking<L>(
    events: &L,
    bookings: &dyn BookingRepository,
    event_id: &str,
    email: &str,
) -> Result<Booking, AppError>
where
    L: EventLookup + ?Sized,
{
    let mut booking = Booking::new(parse_event_id(event_id)?, email)?;
    prepare_booking(&mut booking, events).await?;

    let created = bookings.insert(&booking).await?;
    info!("Booking created for event {}", created.event_id);
    Ok(created)
}

pub async fn bookings_for_event(bookings: &dyn BookingRepository, event_id: &str) -> Result<Vec<Booking>, AppError> {
    bookings.list_by_event(&parse_event_id(event_id)?).await
}

pub async fn booking_count(bookings: &dyn BookingRepository, event_id: &str) -> Result<u64, AppError> {
    bookings.count_by_event(&parse_event_id(event_id)?).await
}
