//! Profile lookup and editing.

use std::sync::Arc;

use gitconnect_api::FeedApi;
use gitconnect_model::{Profile, ProfileUpdate, Session};

use crate::error::{FeedError, Result, ValidationError};
use crate::session::SessionGate;

/// Reads profiles and updates the current user's own.
pub struct ProfileService<A> {
    api: Arc<A>,
    gate: Arc<SessionGate>,
}

impl<A: FeedApi> ProfileService<A> {
    pub fn new(api: Arc<A>, gate: Arc<SessionGate>) -> Self {
        Self { api, gate }
    }

    /// All public profiles.
    pub async fn list_profiles(&self) -> Result<Vec<Profile>> {
        let session = self.gate.current_session();
        let profiles = self
            .api
            .list_profiles(session.bearer())
            .await
            .inspect_err(|err| tracing::warn!("Failed to load profiles: {}", err))?;
        tracing::debug!("Loaded {} profiles", profiles.len());
        Ok(profiles)
    }

    /// One user's profile.
    pub async fn get_profile(&self, user_id: &str) -> Result<Profile> {
        let session = self.gate.current_session();
        let profile = self
            .api
            .get_profile(session.bearer(), user_id)
            .await
            .inspect_err(|err| {
                tracing::warn!("Failed to load profile for user {}: {}", user_id, err);
            })?;
        Ok(profile)
    }

    /// The signed-in user's profile.
    pub async fn my_profile(&self) -> Result<Profile> {
        let session = self.gate.current_session();
        let user_id = own_user_id(&session)?;
        self.get_profile(user_id).await
    }

    /// Saves the signed-in user's profile. The full name is required.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<()> {
        let session = self.gate.current_session();
        let user_id = own_user_id(&session)?;
        let Some(token) = session.bearer() else {
            return Err(FeedError::Unauthenticated);
        };
        if update.full_name.trim().is_empty() {
            return Err(ValidationError::MissingField("full name").into());
        }

        tracing::debug!("Updating profile for user {}", user_id);
        self.api
            .update_profile(token, user_id, update)
            .await
            .inspect_err(|err| tracing::warn!("Failed to update profile: {}", err))?;
        tracing::info!("Updated profile for user {}", user_id);
        Ok(())
    }
}

fn own_user_id(session: &Session) -> Result<&str> {
    if !session.is_authenticated() {
        return Err(FeedError::Unauthenticated);
    }
    session
        .user_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ValidationError::MissingUserId.into())
}
