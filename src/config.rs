use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::admission::DeathPolicy;

/// Default user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; U; Intel Mac OS X 10.6; en-US; \
     rv:1.9.2.12) Gecko/20101026 Firefox/3.6.12";

/// Per-client defaults, loadable from `~/.config/fetchgate/config.toml`.
///
/// A client snapshots this at construction; `reset()` restores the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Category tags and/or concrete MIME types accepted by default.
    pub accept: Vec<String>,
    /// HTTP status codes that kill a request outright (empty = none).
    pub death_codes: Vec<u32>,
    /// Maximum declared response size in kilobytes.
    pub size_limit_kb: u64,
    /// Seconds allowed for the TCP/TLS connect phase.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for the whole transfer.
    pub timeout_secs: u64,
    /// User agent string sent with every request.
    pub user_agent: String,
    /// Follow HTTP redirects.
    pub follow_redirects: bool,
    /// Redirect cap when following.
    pub max_redirects: u32,
    /// Value sent as `Accept-Encoding`.
    pub accept_encoding: String,
    /// Cookie jar path override; `None` = under the XDG state dir.
    #[serde(default)]
    pub cookie_jar: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            accept: vec!["webpages".to_string()],
            death_codes: vec![404],
            size_limit_kb: 1024,
            connect_timeout_secs: 5,
            timeout_secs: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            follow_redirects: true,
            max_redirects: 10,
            accept_encoding: "gzip,deflate".to_string(),
            cookie_jar: None,
        }
    }
}

impl ClientConfig {
    /// Death policy derived from `death_codes`.
    pub fn death_policy(&self) -> DeathPolicy {
        match self.death_codes.as_slice() {
            [] => DeathPolicy::None,
            [code] => DeathPolicy::Code(*code),
            codes => DeathPolicy::Codes(codes.iter().copied().collect()),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fetchgate")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ClientConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ClientConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ClientConfig = toml::from_str(&data)?;
    Ok(cfg)
}
