use limelight_core::context::{AppConfigExt, BackgroundTasks};
use limelight_core::push::PushSender;
use limelight_core::shutdown::ShutdownController;
use limelight_types::AppConfig;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// One running overlay session: its task handles, the shutdown handle,
/// and the local alert injection point (present when the alerts overlay
/// is enabled).
pub struct EngineSession {
    pub controller: ShutdownController,
    pub tasks: BackgroundTasks,
    pub push: Option<PushSender>,
}

/// Holds all shared state for the CLI application.
/// This is a lightweight container - logic lives in the command handlers.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<AppConfig>>,
    /// The active overlay session. None while the engine is stopped.
    session: Arc<Mutex<Option<EngineSession>>>,
}

impl CliContext {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::load())),
            session: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn is_running(&self) -> bool {
        self.session.lock().await.is_some()
    }

    /// Install a freshly started session. Returns the new session back if
    /// one is already running (the caller keeps the running one).
    pub async fn start_session(&self, session: EngineSession) -> Result<(), EngineSession> {
        let mut slot = self.session.lock().await;
        if slot.is_some() {
            return Err(session);
        }
        *slot = Some(session);
        Ok(())
    }

    /// Take the running session out, leaving the engine stopped.
    pub async fn take_session(&self) -> Option<EngineSession> {
        self.session.lock().await.take()
    }

    /// The alert injection point of the running session, if any.
    pub async fn push_sender(&self) -> Option<PushSender> {
        self.session
            .lock()
            .await
            .as_ref()
            .and_then(|session| session.push.clone())
    }
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}
