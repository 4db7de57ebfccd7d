//! User profiles.

use serde::{Deserialize, Serialize};

/// A user's public profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Profile {
    /// Profile id assigned by the service.
    #[serde(default)]
    pub id: u64,
    /// Owning user id.
    #[serde(default)]
    pub user_id: u64,
    /// Full name, possibly empty.
    #[serde(default)]
    pub full_name: String,
    /// Free-form bio, possibly empty.
    #[serde(default)]
    pub bio: String,
    /// Link to the user's GitHub page, possibly empty.
    #[serde(default)]
    pub github: String,
    /// Service-relative path of the profile picture, possibly empty.
    #[serde(default)]
    pub profile_picture: String,
}

impl Profile {
    /// Name to display, with a placeholder for blank names.
    #[must_use]
    pub fn display_name(&self) -> &str {
        non_blank(&self.full_name).unwrap_or("No Name")
    }

    /// Bio to display, with a placeholder for blank bios.
    #[must_use]
    pub fn display_bio(&self) -> &str {
        non_blank(&self.bio).unwrap_or("No bio available")
    }

    /// GitHub link, when one is set.
    #[must_use]
    pub fn github_link(&self) -> Option<&str> {
        non_blank(&self.github)
    }

    /// Picture path, when one is set.
    #[must_use]
    pub fn picture_path(&self) -> Option<&str> {
        non_blank(&self.profile_picture)
    }
}

fn non_blank(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Editable profile fields sent with `PUT /profiles/{userId}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// Required full name.
    pub full_name: String,
    /// Optional bio.
    #[serde(default)]
    pub bio: String,
    /// Optional GitHub link.
    #[serde(default)]
    pub github: String,
}
