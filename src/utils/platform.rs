//! Installed-client theme folder discovery.
//!
//! Locates the `themes` directory of a BetterDiscord or Vencord install
//! from the platform's conventional data directory. The result is only ever
//! consumed as a destination path by the compile pipeline; nothing here
//! touches the client itself.

use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// The theming clients the dev loop can write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Client {
    BetterDiscord,
    Vencord,
}

impl Client {
    /// Data-directory folder name of the client.
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::BetterDiscord => "BetterDiscord",
            Self::Vencord => "Vencord",
        }
    }
}

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("cannot determine the OS data directory for `{0}`")]
    Unsupported(String),

    #[error("the `{0}` environment variable is not set")]
    MissingEnv(&'static str),
}

/// Resolve the default `themes` folder for a client on this platform.
///
/// - Windows: `%APPDATA%\{client}\themes`
/// - macOS: `~/Library/Application Support/{client}/themes`
/// - Linux: `~/.local/share/{client}/themes` for BetterDiscord,
///   `$XDG_CONFIG_HOME/{client}/themes` (or `~/.config/...`) for Vencord
pub fn theme_folder(client: Client) -> Result<PathBuf, PlatformError> {
    let data = data_dir(client)?;
    Ok(data.join(client.dir_name()).join("themes"))
}

/// Platform data directory holding the client's install.
fn data_dir(client: Client) -> Result<PathBuf, PlatformError> {
    match env::consts::OS {
        "windows" => env_path("APPDATA"),
        "macos" => Ok(home()?.join("Library").join("Application Support")),
        "linux" => match client {
            Client::BetterDiscord => Ok(home()?.join(".local").join("share")),
            // Vencord keeps its data under the XDG config directory
            Client::Vencord => env_path("XDG_CONFIG_HOME")
                .or_else(|_| Ok(home()?.join(".config"))),
        },
        other => Err(PlatformError::Unsupported(other.to_string())),
    }
}

fn home() -> Result<PathBuf, PlatformError> {
    env_path("HOME").or_else(|_| env_path("USERPROFILE"))
}

fn env_path(key: &'static str) -> Result<PathBuf, PlatformError> {
    env::var_os(key)
        .map(PathBuf::from)
        .ok_or(PlatformError::MissingEnv(key))
}
