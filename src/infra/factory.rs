use std::sync::Arc;

use bson::doc;
use mongodb::{options::IndexOptions, Database, IndexModel};
use tracing::info;

use crate::config::Config;
use crate::domain::models::{booking::Booking, event::Event};
use crate::error::AppError;
use crate::infra::connection::{connect, database};
use crate::infra::repositories::{
    mongo_booking_repo::{MongoBookingRepo, BOOKINGS_COLLECTION},
    mongo_event_repo::{MongoEventRepo, EVENTS_COLLECTION},
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    let client = connect(config).await?;
    let db = database(&client, config);
    info!("Using database '{}'", db.name());

    if config.auto_index {
        ensure_indexes(&db).await?;
    }

    Ok(AppState {
        config: config.clone(),
        event_repo: Arc::new(MongoEventRepo::new(&db)),
        booking_repo: Arc::new(MongoBookingRepo::new(&db)),
    })
}

/// Creates the unique slug index on events and the eventId index on bookings.
pub async fn ensure_indexes(db: &Database) -> Result<(), AppError> {
    let slug_index = IndexModel::builder()
        .keys(doc! { "slug": 1 })
        .options(
            IndexOptions::builder()
                .unique(true)
                .name("slug_unique".to_string())
                .build(),
        )
        .build();
    db.collection::<Event>(EVENTS_COLLECTION)
        .create_index(slug_index)
        .await?;

    let event_ref_index = IndexModel::builder()
        .keys(doc! { "eventId": 1 })
        .options(IndexOptions::builder().name("event_id".to_string()).build())
        .build();
    db.collection::<Booking>(BOOKINGS_COLLECTION)
        .create_index(event_ref_index)
        .await?;

    info!("Indexes ensured on '{}' and '{}'", EVENTS_COLLECTION, BOOKINGS_COLLECTION);
    Ok(())
}
