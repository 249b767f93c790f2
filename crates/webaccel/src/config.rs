//! CLI-owned configuration: TOML profiles, credential resolution, and
//! translation to the inputs `WebAccelClient::new` takes.
//!
//! The API crate never sees these types.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

use webaccel_api::{DEFAULT_API_URL, TransportConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Keyring service name; entries are keyed `<profile>/secret`.
pub const KEYRING_SERVICE: &str = "webaccel";

const REDACTED: &str = "********";

// ── TOML config structs ──────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name (used when --profile is not specified).
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named API profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Copy with plaintext secrets masked, for display.
    pub fn redacted(&self) -> Self {
        let mut cfg = self.clone();
        for profile in cfg.profiles.values_mut() {
            if profile.access_token_secret.is_some() {
                profile.access_token_secret = Some(REDACTED.into());
            }
        }
        cfg
    }

    /// Comma-separated profile names, for diagnostics.
    pub fn available_profiles(&self) -> String {
        if self.profiles.is_empty() {
            "(none)".into()
        } else {
            self.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

/// One set of API credentials and endpoint settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// API base URL; the public endpoint when unset.
    pub api_url: Option<String>,

    /// Access token (not secret on its own).
    pub access_token: Option<String>,

    /// Environment variable name containing the access token.
    pub access_token_env: Option<String>,

    /// Access token secret (plaintext -- prefer keyring or env var).
    pub access_token_secret: Option<String>,

    /// Environment variable name containing the access token secret.
    pub access_token_secret_env: Option<String>,

    /// Path to an additional CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

// ── Config file path ─────────────────────────────────────────────────

/// Resolve the config file path: `WEBACCEL_CONFIG`, else the platform
/// config directory.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os("WEBACCEL_CONFIG") {
        return PathBuf::from(path);
    }
    ProjectDirs::from("", "", "webaccel").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("webaccel");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ───────────────────────────────────────────────────

/// Load the full Config from defaults, file and environment.
///
/// Nested keys in the environment use `__`, e.g.
/// `WEBACCEL_PROFILES__PROD__API_URL`.
pub fn load_config() -> Result<Config, CliError> {
    let path = config_path();
    tracing::debug!(path = %path.display(), "loading config");

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("WEBACCEL_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Profile resolution ───────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Everything needed to construct a `WebAccelClient`.
#[derive(Debug)]
pub struct Resolved {
    pub profile_name: String,
    pub api_url: Url,
    pub access_token: String,
    pub access_token_secret: SecretString,
    pub transport: TransportConfig,
}

/// Translate config + global flags into client inputs.
///
/// Flags win over the profile. An explicitly requested profile must exist;
/// the implicit default may be missing when flags or env carry everything.
pub fn resolve(global: &GlobalOpts, config: &Config) -> Result<Resolved, CliError> {
    let profile_name = active_profile_name(global, config);
    let fallback = Profile::default();
    let profile = match config.profiles.get(&profile_name) {
        Some(p) => p,
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: config.available_profiles(),
                path: config_path().display().to_string(),
            });
        }
        None => &fallback,
    };

    // 1. API URL (flag > profile > built-in)
    let url_str = global
        .api_url
        .as_deref()
        .or(profile.api_url.as_deref())
        .unwrap_or(DEFAULT_API_URL);
    let api_url: Url = url_str.parse().map_err(|e| CliError::Validation {
        field: "api_url".into(),
        reason: format!("invalid URL {url_str:?}: {e}"),
    })?;

    // 2. Credentials
    let access_token = resolve_access_token(profile, &profile_name, global)?;
    let access_token_secret = resolve_secret(profile, &profile_name, global)?;

    // 3. Transport
    let timeout = global
        .timeout
        .or(profile.timeout)
        .unwrap_or(config.defaults.timeout);
    let mut transport = TransportConfig::default().with_timeout(Duration::from_secs(timeout));
    if let Some(ca) = global.ca_cert.as_ref().or(profile.ca_cert.as_ref()) {
        transport = transport.with_ca_cert(ca);
    }

    Ok(Resolved {
        profile_name,
        api_url,
        access_token,
        access_token_secret,
        transport,
    })
}

// ── Credential helpers ───────────────────────────────────────────────

fn resolve_access_token(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<String, CliError> {
    global
        .access_token
        .clone()
        .or_else(|| env_indirect(profile.access_token_env.as_deref()))
        .or_else(|| profile.access_token.clone())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| CliError::NoCredentials {
            profile: profile_name.into(),
        })
}

/// Resolve the token secret from the credential chain.
fn resolve_secret(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<SecretString, CliError> {
    // 1. CLI flag / WEBACCEL_ACCESS_TOKEN_SECRET
    if let Some(ref secret) = global.access_token_secret {
        return Ok(SecretString::from(secret.clone()));
    }

    // 2. Profile's access_token_secret_env -> env var lookup
    if let Some(secret) = env_indirect(profile.access_token_secret_env.as_deref()) {
        return Ok(SecretString::from(secret));
    }

    // 3. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &keyring_user(profile_name)) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 4. Plaintext in config
    if let Some(ref secret) = profile.access_token_secret {
        return Ok(SecretString::from(secret.clone()));
    }

    Err(CliError::NoCredentials {
        profile: profile_name.into(),
    })
}

pub fn keyring_user(profile_name: &str) -> String {
    format!("{profile_name}/secret")
}

fn env_indirect(var: Option<&str>) -> Option<String> {
    var.and_then(|name| std::env::var(name).ok())
        .filter(|v| !v.is_empty())
}
