//! Hydration event entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An immutable record of a single logged drink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct HydrationEvent {
    /// Unique event identifier.
    pub id: Uuid,
    /// The user who logged the drink.
    pub user_id: Uuid,
    /// Volume in millilitres. Always positive.
    pub amount_ml: i32,
    /// When the drink happened.
    pub occurred_at: DateTime<Utc>,
}
