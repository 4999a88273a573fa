use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::services::normalize::normalize_email;
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub event_id: ObjectId,
    pub email: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Rejects malformed emails up front; the save pipeline checks again.
    pub fn new(event_id: ObjectId, email: &str) -> Result<Self, AppError> {
        let now = Utc::now();
        Ok(Self {
            id: None,
            event_id,
            email: normalize_email(email)?,
            created_at: now,
            updated_at: now,
        })
    }
}
