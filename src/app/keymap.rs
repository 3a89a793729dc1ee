use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::types::{ActivePanel, App, LoginField, Screen};

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.screen {
            Screen::Login => self.handle_login_key(key),
            Screen::Dashboard => {
                if self.restore.is_awaiting_password() {
                    self.handle_password_prompt_key(key);
                } else {
                    self.handle_dashboard_key(key);
                }
            }
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down => self.next_login_field(),
            KeyCode::BackTab | KeyCode::Up => self.previous_login_field(),
            KeyCode::Enter => self.submit_login(),
            // Ctrl+R flips between login and registration.
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.login_form.register_mode = !self.login_form.register_mode;
                if !self.login_form.register_mode {
                    self.login_form.confirm = Default::default();
                    if self.login_form.field == LoginField::Confirm {
                        self.login_form.field = LoginField::Password;
                    }
                }
                self.clear_status_message();
            }
            KeyCode::Char(c) => match self.login_form.field {
                LoginField::Username => self.login_form.username.push(c),
                LoginField::Password => self.login_form.password.push(c),
                LoginField::Confirm => self.login_form.confirm.push(c),
            },
            KeyCode::Backspace => {
                match self.login_form.field {
                    LoginField::Username => self.login_form.username.pop(),
                    LoginField::Password => self.login_form.password.pop(),
                    LoginField::Confirm => self.login_form.confirm.pop(),
                };
            }
            _ => {}
        }
    }

    fn next_login_field(&mut self) {
        self.login_form.field = match self.login_form.field {
            LoginField::Username => LoginField::Password,
            LoginField::Password if self.login_form.register_mode => LoginField::Confirm,
            LoginField::Password | LoginField::Confirm => LoginField::Username,
        };
    }

    fn previous_login_field(&mut self) {
        self.login_form.field = match self.login_form.field {
            LoginField::Username if self.login_form.register_mode => LoginField::Confirm,
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
            LoginField::Confirm => LoginField::Password,
        };
    }

    /// Keys while the restore password prompt is open. Everything routes to
    /// the coordinator; the rest of the dashboard is inert.
    fn handle_password_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.restore.cancel(),
            KeyCode::Enter => self.confirm_restore(),
            KeyCode::Backspace => self.restore.pop_char(),
            KeyCode::Char(c) => self.restore.push_char(c),
            _ => {}
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.switch_panel(),
            KeyCode::Char('j') | KeyCode::Down => match self.active_panel {
                ActivePanel::Files => self.browser.select_next(),
                ActivePanel::Vault => self.vault.select_next(),
            },
            KeyCode::Char('k') | KeyCode::Up => match self.active_panel {
                ActivePanel::Files => self.browser.select_previous(),
                ActivePanel::Vault => self.vault.select_previous(),
            },
            KeyCode::Enter => match self.active_panel {
                ActivePanel::Files => self.enter_selected(),
                ActivePanel::Vault => self.select_restore(),
            },
            KeyCode::Char('u') | KeyCode::Backspace => {
                if self.active_panel == ActivePanel::Files {
                    self.go_up();
                }
            }
            KeyCode::Char('b') => {
                if self.active_panel == ActivePanel::Files {
                    self.backup_selected();
                }
            }
            KeyCode::Char('r') => match self.active_panel {
                ActivePanel::Files => self.request_listing(),
                ActivePanel::Vault => self.request_vault_refresh(),
            },
            KeyCode::Char('o') => self.logout(),
            _ => {}
        }
    }

    fn enter_selected(&mut self) {
        let Some(entry) = self.browser.selected_entry().cloned() else {
            return;
        };
        if let Some(request) = self.browser.enter(&entry) {
            tracing::debug!(path = %request.path, "Entering directory");
            self.spawn_listing(request);
        }
    }

    fn go_up(&mut self) {
        if let Some(request) = self.browser.up() {
            self.spawn_listing(request);
        }
    }
}
