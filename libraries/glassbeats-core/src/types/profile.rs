//! User profile types

use crate::types::UserId;
use serde::{Deserialize, Serialize};

/// Profile of the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Owning user
    pub user_id: UserId,

    /// Display name shown in the UI
    pub display_name: Option<String>,

    /// Avatar URL in the store's object storage
    pub avatar_url: Option<String>,
}

/// Partial profile update payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfile {
    /// New display name, when changing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// New avatar URL, when changing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}
