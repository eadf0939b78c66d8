use std::sync::Arc;

use crate::config::ClientConfig;
use crate::external::AdvisorBackend;
use crate::services::conversation_service::ConversationSession;
use crate::services::profile_service::ProfileEditor;

#[derive(Clone)]
pub struct AppState {
    pub config: ClientConfig,
    pub backend: Arc<dyn AdvisorBackend>,
    pub session: Arc<ConversationSession>,
    pub profile_editor: Arc<ProfileEditor>,
}

impl AppState {
    pub fn new(config: ClientConfig, backend: Arc<dyn AdvisorBackend>, user_id: String) -> Self {
        let session = Arc::new(ConversationSession::new(
            backend.clone(),
            user_id.clone(),
            config.request_timeout,
        ));
        let profile_editor = Arc::new(ProfileEditor::new(
            backend.clone(),
            user_id,
            config.request_timeout,
        ));

        Self {
            config,
            backend,
            session,
            profile_editor,
        }
    }
}
