//! CLI error types with miette diagnostics.
//!
//! Maps `webaccel_api::Error` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use webaccel_api::{Rule, ValidationError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the API at {url}")]
    #[diagnostic(
        code(webaccel::connection_failed),
        help(
            "Check network access and the configured API URL.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(webaccel::tls_error),
        help("Check the ca_cert path in your profile or the --ca-cert flag.")
    )]
    Tls { message: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed for profile '{profile}'")]
    #[diagnostic(
        code(webaccel::auth_failed),
        help(
            "Verify the access token and secret.\n\
             Store a new secret with: webaccel config set-secret --profile {profile}"
        )
    )]
    AuthFailed { profile: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(webaccel::no_credentials),
        help(
            "Set WEBACCEL_ACCESS_TOKEN and WEBACCEL_ACCESS_TOKEN_SECRET,\n\
             or add access_token to the profile and run: webaccel config set-secret"
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(webaccel::not_found),
        help("Run: webaccel {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("No {what} found for site '{site}'")]
    #[diagnostic(
        code(webaccel::not_found),
        help("Check that the site exists with: webaccel sites get {site}")
    )]
    NotFoundOnSite { what: String, site: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error (HTTP {status}{}): {message}", code_suffix(.code.as_deref()))]
    #[diagnostic(code(webaccel::api_error))]
    ApiError {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Unexpected API response: {message}")]
    #[diagnostic(
        code(webaccel::bad_response),
        help("Re-run with -vvv to log the raw response body.")
    )]
    BadResponse { message: String },

    #[error("{failed} of {total} URL(s) were not purged")]
    #[diagnostic(
        code(webaccel::partial_purge),
        help("The per-URL results above show which entries failed.")
    )]
    PartialPurge { failed: usize, total: usize },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(webaccel::validation))]
    Validation { field: String, reason: String },

    #[error("{error}")]
    #[diagnostic(code(webaccel::invalid_payload))]
    InvalidPayload {
        error: ValidationError,
        #[help]
        help: String,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(webaccel::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Config file: {path}"
        )
    )]
    ProfileNotFound {
        name: String,
        available: String,
        path: String,
    },

    #[error(transparent)]
    #[diagnostic(code(webaccel::config))]
    Config(Box<figment::Error>),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(webaccel::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(webaccel::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidPayload {
            help: payload_help(&err),
            error: err,
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::Tls { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::NotFoundOnSite { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. }
            | Self::InvalidPayload { .. }
            | Self::Json(_)
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Attach the addressed resource and active profile to an API error.
    pub fn from_api(err: webaccel_api::Error, target: Option<&Target>, profile: &str) -> Self {
        use webaccel_api::Error as LibError;

        if err.is_unauthorized() {
            return Self::AuthFailed {
                profile: profile.into(),
            };
        }
        if err.is_not_found() {
            match target {
                Some(Target::Site(id)) => {
                    return Self::NotFound {
                        resource_type: "site".into(),
                        identifier: id.clone(),
                        list_command: "sites list".into(),
                    };
                }
                Some(Target::OnSite { what, site }) => {
                    return Self::NotFoundOnSite {
                        what: (*what).into(),
                        site: site.clone(),
                    };
                }
                None => {}
            }
        }

        match err {
            LibError::Validation(e) => e.into(),
            LibError::Transport(e) => Self::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "(unknown)".into(), ToString::to_string),
                source: Box::new(e),
            },
            LibError::InvalidUrl(e) => Self::Validation {
                field: "api_url".into(),
                reason: e.to_string(),
            },
            LibError::Tls(message) => Self::Tls { message },
            LibError::Api {
                status,
                message,
                code,
            } => Self::ApiError {
                status,
                code,
                message,
            },
            LibError::Deserialization { message, .. } => Self::BadResponse { message },
        }
    }
}

/// What a site-scoped call addressed, for reporting a 404.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// The site itself.
    Site(String),
    /// A sub-resource of the site, such as its certificate.
    OnSite { what: &'static str, site: String },
}

impl Target {
    pub fn site(id: &str) -> Self {
        Self::Site(id.to_owned())
    }

    pub fn on_site(what: &'static str, site: &str) -> Self {
        Self::OnSite {
            what,
            site: site.to_owned(),
        }
    }
}

fn code_suffix(code: Option<&str>) -> String {
    code.map(|c| format!(", {c}")).unwrap_or_default()
}

fn payload_help(err: &ValidationError) -> String {
    match err.rule() {
        Rule::OneOf { allowed, .. } => format!("Accepted values: {}", allowed.join(", ")),
        Rule::Range { min, max, .. } => format!("Use a value from {min} to {max}."),
        Rule::InactiveOriginGroup { .. } | Rule::MixedOriginGroups => {
            "Set only the fields for the chosen OriginType.".into()
        }
        Rule::TooManyItems { max, .. } => format!("Remove entries until at most {max} remain."),
        Rule::ConflictsWith { other } => format!("Remove either {} or {other}.", err.field()),
        Rule::NotAccepted { .. } => format!("Remove {} from the payload.", err.field()),
    }
}
