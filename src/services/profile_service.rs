use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::errors::{ApiError, ProfileSubmitError};
use crate::external::AdvisorBackend;
use crate::models::{ProfileData, ProfileStatus, UpdateProfileRequest};

pub use crate::errors::{PROFILE_FAILURE_NOTICE, PROFILE_SUCCESS_NOTICE};

/// Edits a draft financial profile and submits it under the current user id.
///
/// Has its own busy flag, independent of the conversation session, so a
/// profile save and a chat turn can be in flight at the same time.
pub struct ProfileEditor {
    backend: Arc<dyn AdvisorBackend>,
    user_id: String,
    request_timeout: Duration,
    draft: Mutex<ProfileData>,
    /// Last profile the backend accepted; what a discard returns to.
    saved: Mutex<ProfileData>,
    busy: AtomicBool,
}

impl ProfileEditor {
    pub fn new(backend: Arc<dyn AdvisorBackend>, user_id: String, request_timeout: Duration) -> Self {
        Self {
            backend,
            user_id,
            request_timeout,
            draft: Mutex::new(ProfileData::default()),
            saved: Mutex::new(ProfileData::default()),
            busy: AtomicBool::new(false),
        }
    }

    pub fn draft(&self) -> ProfileData {
        self.draft.lock().clone()
    }

    pub fn edit_draft(&self, edit: impl FnOnce(&mut ProfileData)) {
        edit(&mut *self.draft.lock());
    }

    /// Throw away unsaved edits, returning the draft to the last profile
    /// the backend accepted (defaults if nothing was saved yet). No
    /// confirmation is asked for.
    pub fn discard_draft(&self) {
        let saved = self.saved.lock().clone();
        *self.draft.lock() = saved;
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Submit the current draft.
    pub async fn submit(&self) -> Result<&'static str, ProfileSubmitError> {
        let profile = self.draft();
        self.submit_profile(&profile).await
    }

    /// Submit an explicit profile record. Returns the fixed success notice;
    /// on error, `ProfileSubmitError::notice` gives the fixed failure text.
    pub async fn submit_profile(
        &self,
        profile: &ProfileData,
    ) -> Result<&'static str, ProfileSubmitError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ProfileSubmitError::Busy);
        }
        let _busy = BusyFlag(&self.busy);

        let request = UpdateProfileRequest {
            user_id: self.user_id.clone(),
            profile: profile.clone(),
        };

        let result = tokio::time::timeout(self.request_timeout, self.backend.update_profile(&request))
            .await
            .unwrap_or_else(|_| Err(ApiError::Timeout));

        match result {
            Ok(()) => {
                *self.saved.lock() = request.profile;
                info!("Profile updated for {}", self.user_id);
                Ok(PROFILE_SUCCESS_NOTICE)
            }
            Err(e) => {
                warn!("Profile update for {} failed: {}", self.user_id, e);
                Err(ProfileSubmitError::Backend(e))
            }
        }
    }

    /// Ask the backend what it currently holds for this user.
    pub async fn status(&self) -> Result<ProfileStatus, ApiError> {
        tokio::time::timeout(self.request_timeout, self.backend.profile_status(&self.user_id))
            .await
            .unwrap_or_else(|_| Err(ApiError::Timeout))
    }
}

/// Clears the busy flag however the submission ends.
struct BusyFlag<'a>(&'a AtomicBool);

impl Drop for BusyFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
