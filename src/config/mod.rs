//! Configuration resolution for slimspec.
//!
//! Settings come from `.slimspecrc` files (key=value lines, one in the home
//! directory and one in the working directory) and environment variables,
//! merged into an immutable [`ConfigSnapshot`] built once at startup.
//! Precedence, highest wins: environment > project rc > home rc > defaults.

mod loader;
mod types;

pub use types::ConfigSnapshot;

impl ConfigSnapshot {
    /// Loads the effective configuration. Never fails: unreadable or absent
    /// rc files contribute an empty layer.
    pub fn load() -> Self {
        let mut layers = vec![Self::default()];
        if let Some(home) = dirs::home_dir() {
            layers.push(Self::from_rc_file(&home.join(crate::constants::RC_FILENAME)));
        }
        if let Ok(cwd) = std::env::current_dir() {
            layers.push(Self::from_rc_file(&cwd.join(crate::constants::RC_FILENAME)));
        }
        layers.push(Self::from_env());
        Self::merged(layers)
    }
}
