//! Command implementations.
//!
//! Each command builds one storefront or admin event, dispatches it against
//! the file-backed stores and prints the outcome.

pub mod orders;
pub mod storefront;

use std::io::{self, Write};
use std::path::PathBuf;

use tienda_admin::{AdminConfig, AdminState};
use tienda_core::{FileStore, Fragment, NoticeKind, Update};
use tienda_storefront::{AppState, StorefrontConfig};

/// The page as loaded from the data directory.
pub struct Session {
    pub page: AppState<FileStore>,
    pub admin: AdminState,
}

impl Session {
    /// Load configuration and open the stores.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is invalid or the stores cannot be read.
    pub fn open(data_dir: Option<PathBuf>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = StorefrontConfig::from_env()?;
        if let Some(dir) = data_dir {
            config.data_dir = dir;
        }
        let admin_config = AdminConfig::from_env()?;

        let store = FileStore::open(&config.data_dir)?;
        tracing::debug!(dir = %store.dir().display(), "Opened data directory");

        Ok(Self {
            page: AppState::new(config, store)?,
            admin: AdminState::new(admin_config),
        })
    }
}

/// How updates are printed.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    /// Print rendered fragments as well as the notice
    pub fragments: bool,
}

impl Output {
    /// Print an update to stdout, error notices to stderr.
    ///
    /// # Errors
    ///
    /// Returns an error if either stream cannot be written.
    pub fn print(self, update: &Update) -> io::Result<()> {
        self.write(update, &mut io::stdout().lock(), &mut io::stderr().lock())
    }

    /// Write fragments when requested, then the notice to `out` or `err`
    /// by kind.
    fn write(self, update: &Update, out: &mut impl Write, err: &mut impl Write) -> io::Result<()> {
        if self.fragments {
            for Fragment { target, html } in &update.fragments {
                writeln!(out, "<!-- #{target} -->")?;
                writeln!(out, "{html}")?;
            }
        }
        if let Some(notice) = &update.notice {
            match notice.kind {
                NoticeKind::Success => writeln!(out, "{}", notice.message)?,
                NoticeKind::Error => writeln!(err, "{}", notice.message)?,
            }
        }
        Ok(())
    }
}
