use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::User;

/// A pending invitation. Requests only ever come from seed data; they end
/// their life through accept (friend edge created) or reject (dropped).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FriendRequest {
    pub id: String,
    pub from: User,
    pub timestamp: DateTime<Utc>,
}
