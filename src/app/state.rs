use std::time::Instant;

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::app::types::{ActivePanel, App, LoginForm, Screen};
use crate::app_event::AppEvent;
use crate::browser::{Browser, ListingRequest};
use crate::config::ConfigManager;
use crate::dispatch::{BackupDispatcher, BackupOutcome};
use crate::restore::RestoreCoordinator;
use crate::session::{FileSessionStore, Session, SessionStore};
use crate::vault::VaultLister;

impl App {
    pub fn new(server_override: Option<String>) -> Result<Self> {
        let config_manager = ConfigManager::new().context("Failed to initialize config")?;
        let config = config_manager.load_config().context("Failed to load config")?;
        let server_url = server_override.unwrap_or(config.server_url);
        tracing::info!(%server_url, "Using backend");

        let session_store: Box<dyn SessionStore> = Box::new(FileSessionStore::new(
            config_manager.session_path().to_path_buf(),
        ));

        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let mut app = Self {
            should_quit: false,
            screen: Screen::Login,
            active_panel: ActivePanel::Files,
            session_store,
            session: None,
            api: ApiClient::new(&server_url),
            browser: Browser::new(),
            dispatcher: BackupDispatcher::new(),
            restore: RestoreCoordinator::new(),
            vault: VaultLister::new(),
            storage: None,
            login_form: LoginForm::default(),
            is_authenticating: false,
            status_message: None,
            events_tx,
            events_rx,
        };

        // A saved session skips the login screen.
        match app.session_store.load() {
            Ok(Some(session)) => app.enter_dashboard(session),
            Ok(None) => {}
            Err(e) => tracing::warn!("Could not restore session: {}", e),
        }

        Ok(app)
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    pub fn switch_panel(&mut self) {
        self.active_panel = match self.active_panel {
            ActivePanel::Files => ActivePanel::Vault,
            ActivePanel::Vault => ActivePanel::Files,
        };
        tracing::debug!("Switched to {:?} panel", self.active_panel);
    }

    /// Install `session` and kick off the initial mount requests: root
    /// listing, vault refresh, storage usage.
    pub fn enter_dashboard(&mut self, session: Session) {
        tracing::info!(username = %session.username, "Entering dashboard");
        self.session = Some(session);
        self.screen = Screen::Dashboard;
        self.active_panel = ActivePanel::Files;
        self.request_listing();
        self.request_vault_refresh();
        self.request_storage();
    }

    pub fn logout(&mut self) {
        if let Err(e) = self.session_store.clear() {
            tracing::error!("Failed to clear saved session: {}", e);
        }
        self.session = None;
        self.screen = Screen::Login;
        self.login_form = LoginForm::default();
        self.browser = Browser::new();
        self.dispatcher = BackupDispatcher::new();
        self.restore = RestoreCoordinator::new();
        self.vault = VaultLister::new();
        self.storage = None;
        self.set_status("Logged out");
    }

    // --- request spawning ---------------------------------------------------

    pub fn request_listing(&mut self) {
        let request = self.browser.begin_listing();
        self.spawn_listing(request);
    }

    /// Perform an already-issued listing request in the background. The
    /// completion carries the request's generation so the browser can tell
    /// whether it is still current.
    pub fn spawn_listing(&self, request: ListingRequest) {
        let api = self.api.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.list_files(&request.path).await;
            let _ = tx.send(AppEvent::ListingDone {
                generation: request.generation,
                result,
            });
        });
    }

    pub fn request_vault_refresh(&mut self) {
        let Some(session) = &self.session else { return };
        let uid = session.uid.clone();
        let request = self.vault.begin_refresh();
        let api = self.api.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.list_backups(&uid).await;
            let _ = tx.send(AppEvent::VaultDone {
                generation: request.generation,
                result,
            });
        });
    }

    pub fn request_storage(&mut self) {
        let Some(session) = &self.session else { return };
        let uid = session.uid.clone();
        let api = self.api.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.storage(&uid).await;
            let _ = tx.send(AppEvent::StorageDone { result });
        });
    }

    /// Back up the entry currently selected in the file panel. A duplicate
    /// request for a path that is already in flight is rejected before it
    /// reaches the network.
    pub fn backup_selected(&mut self) {
        let Some(session) = &self.session else { return };
        let username = session.username.clone();
        let Some(entry) = self.browser.selected_entry().cloned() else {
            return;
        };

        let job = match self.dispatcher.begin(&entry) {
            Ok(job) => job,
            Err(_) => {
                self.set_status(format!("Backup already in progress for {}", entry.name));
                return;
            }
        };

        self.set_status(format!("Backing up {}...", job.display_name));
        let api = self.api.clone();
        let tx = self.events_tx.clone();
        let job_for_task = job.clone();
        tokio::spawn(async move {
            let result = api.save_backup(&job_for_task.target_path, &username).await;
            let _ = tx.send(AppEvent::BackupDone {
                job: job_for_task,
                result,
            });
        });
    }

    /// Open the password prompt for the record selected in the vault panel.
    pub fn select_restore(&mut self) {
        let Some(record) = self.vault.selected_record().cloned() else {
            return;
        };
        if let Err(rejected) = self.restore.select(record) {
            self.set_status(rejected.user_message());
        }
    }

    /// Confirm the open password prompt and issue the restore request.
    pub fn confirm_restore(&mut self) {
        let Some(session) = &self.session else { return };
        let username = session.username.clone();
        match self.restore.confirm(&username) {
            Ok(request) => {
                self.set_status("Restoring...");
                let api = self.api.clone();
                let tx = self.events_tx.clone();
                tokio::spawn(async move {
                    let result = api.restore(&request).await;
                    // Dropping the request here wipes the password.
                    drop(request);
                    let _ = tx.send(AppEvent::RestoreDone { result });
                });
            }
            Err(rejected) => self.set_status(rejected.user_message()),
        }
    }

    pub fn submit_login(&mut self) {
        if self.is_authenticating {
            return;
        }
        if self.login_form.username.is_empty() || self.login_form.password.is_empty() {
            self.set_status("Please enter username and password");
            return;
        }
        let register = self.login_form.register_mode;
        if register {
            if self.login_form.password.as_str() != self.login_form.confirm.as_str() {
                self.set_status("Passwords do not match");
                return;
            }
            if self.login_form.password.chars().count() < 8 {
                self.set_status("Password must be at least 8 characters");
                return;
            }
        }

        self.is_authenticating = true;
        let username = self.login_form.username.clone();
        let password = std::mem::take(&mut self.login_form.password);
        self.login_form.confirm = Default::default();
        let api = self.api.clone();
        let tx = self.events_tx.clone();
        self.set_status(if register { "Registering..." } else { "Logging in..." });
        tokio::spawn(async move {
            if register {
                let result = api.register(&username, &password).await;
                let _ = tx.send(AppEvent::RegisterDone { username, result });
            } else {
                let result = api.login(&username, &password).await;
                let _ = tx.send(AppEvent::LoginDone { result });
            }
            // password (Zeroizing) wiped on drop here
        });
    }

    // --- completion processing ----------------------------------------------

    /// Drain all pending request completions. Called every tick of the main
    /// loop; never blocks.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ListingDone { generation, result } => {
                if let Some(message) = self.browser.apply_listing(generation, result) {
                    self.set_status(message);
                }
            }
            AppEvent::BackupDone { job, result } => {
                match self.dispatcher.finish(&job, result) {
                    BackupOutcome::Completed { display_name } => {
                        self.set_status(format!("Successfully backed up {}", display_name));
                        // BackupCompleted: the vault and the storage stats
                        // are stale now.
                        self.request_vault_refresh();
                        self.request_storage();
                    }
                    BackupOutcome::Failed { message } => self.set_status(message),
                }
            }
            AppEvent::VaultDone { generation, result } => {
                if let Some(message) = self.vault.apply_refresh(generation, result) {
                    self.set_status(message);
                }
            }
            AppEvent::RestoreDone { result } => {
                let message = self.restore.finish(result);
                if !message.is_empty() {
                    self.set_status(message);
                }
            }
            AppEvent::StorageDone { result } => match result {
                Ok(usage) => self.storage = Some(usage),
                Err(e) => tracing::warn!("Storage usage fetch failed: {}", e),
            },
            AppEvent::LoginDone { result } => {
                self.is_authenticating = false;
                match result {
                    Ok(session) => {
                        if let Err(e) = self.session_store.save(&session) {
                            tracing::error!("Failed to persist session: {}", e);
                        }
                        self.set_status(format!("Welcome, {}!", session.username));
                        self.login_form = LoginForm::default();
                        self.enter_dashboard(session);
                    }
                    Err(err) => self.set_status(err.user_message("Login failed")),
                }
            }
            AppEvent::RegisterDone { username, result } => {
                self.is_authenticating = false;
                match result {
                    Ok(()) => {
                        self.set_status(format!(
                            "Welcome, {}! Registration successful, please log in",
                            username
                        ));
                        self.login_form.register_mode = false;
                    }
                    Err(err) => self.set_status(err.user_message("Registration failed")),
                }
            }
        }
    }
}
