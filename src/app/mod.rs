mod keymap;
mod state;
mod types;

pub use types::{ActivePanel, App, LoginField, Screen};
