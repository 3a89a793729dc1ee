use std::time::Instant;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use zeroize::Zeroizing;

use crate::api::ApiClient;
use crate::app_event::AppEvent;
use crate::browser::Browser;
use crate::dispatch::BackupDispatcher;
use crate::models::StorageUsage;
use crate::restore::RestoreCoordinator;
use crate::session::{Session, SessionStore};
use crate::vault::VaultLister;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePanel {
    Files,
    Vault,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
    Confirm,
}

/// Input state of the login/registration screen. Both password buffers are
/// wiped on submit and on drop.
pub struct LoginForm {
    pub username: String,
    pub password: Zeroizing<String>,
    pub confirm: Zeroizing<String>,
    pub field: LoginField,
    pub register_mode: bool,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: Zeroizing::new(String::new()),
            confirm: Zeroizing::new(String::new()),
            field: LoginField::Username,
            register_mode: false,
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub screen: Screen,
    pub active_panel: ActivePanel,

    pub session_store: Box<dyn SessionStore>,
    pub session: Option<Session>,
    pub api: ApiClient,

    // Core components
    pub browser: Browser,
    pub dispatcher: BackupDispatcher,
    pub restore: RestoreCoordinator,
    pub vault: VaultLister,
    pub storage: Option<StorageUsage>,

    // Login screen
    pub login_form: LoginForm,
    pub is_authenticating: bool,

    pub status_message: Option<(String, Instant)>,

    // Completion channel: spawned request tasks send, the event loop drains.
    pub events_tx: UnboundedSender<AppEvent>,
    pub events_rx: UnboundedReceiver<AppEvent>,
}
