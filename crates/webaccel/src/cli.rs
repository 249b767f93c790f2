//! Clap derive structures for the `webaccel` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// webaccel -- manage web accelerator (CDN) sites
#[derive(Debug, Parser)]
#[command(
    name = "webaccel",
    version,
    about = "Manage web accelerator (CDN) sites from the command line",
    long_about = "Administer CDN sites, cache purges, certificates, ACLs and\n\
        origin guard tokens through the web accelerator API.\n\n\
        Site payloads are checked locally before anything is sent.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "WEBACCEL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, env = "WEBACCEL_API_URL", global = true)]
    pub api_url: Option<String>,

    /// API access token
    #[arg(long, env = "WEBACCEL_ACCESS_TOKEN", global = true, hide_env = true)]
    pub access_token: Option<String>,

    /// API access token secret
    #[arg(
        long,
        env = "WEBACCEL_ACCESS_TOKEN_SECRET",
        global = true,
        hide_env_values = true
    )]
    pub access_token_secret: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "WEBACCEL_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "WEBACCEL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Additional CA certificate (PEM) to trust
    #[arg(long, env = "WEBACCEL_CA_CERT", global = true)]
    pub ca_cert: Option<PathBuf>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage CDN sites
    #[command(alias = "s")]
    Sites(SitesArgs),

    /// Purge cached content
    Cache(CacheArgs),

    /// Manage a site's TLS certificate
    Cert(CertArgs),

    /// Manage a site's IP access control list
    Acl(AclArgs),

    /// Manage origin guard tokens
    #[command(alias = "og")]
    OriginGuard(OriginGuardArgs),

    /// Inspect CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SITES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SitesArgs {
    #[command(subcommand)]
    pub command: SitesCommand,
}

#[derive(Debug, Subcommand)]
pub enum SitesCommand {
    /// List sites
    #[command(alias = "ls")]
    List,

    /// Show one site
    Get {
        /// Site ID
        id: String,
    },

    /// Create a site from a JSON payload
    Create {
        /// JSON file with the site fields (wire names, e.g. "OriginType")
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },

    /// Update a site from a JSON payload
    Update {
        /// Site ID
        id: String,

        /// JSON file with the fields to change
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },

    /// Enable or disable a site
    Status {
        /// Site ID
        id: String,

        /// "enabled" or "disabled"
        status: String,
    },

    /// Delete a site
    #[command(alias = "rm")]
    Delete {
        /// Site ID
        id: String,
    },

    /// Check a site payload locally without contacting the API
    Validate {
        /// Which request the payload is for
        #[arg(long, short = 'k', value_enum, default_value = "create")]
        kind: PayloadKind,

        /// JSON file to check
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PayloadKind {
    Create,
    Update,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CACHE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommand,
}

#[derive(Debug, Subcommand)]
pub enum CacheCommand {
    /// Purge everything cached for a domain
    PurgeAll {
        /// Serving domain of the site
        domain: String,
    },

    /// Purge specific URLs
    Purge {
        /// URLs to purge
        #[arg(required = true, num_args = 1..)]
        urls: Vec<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CERTIFICATES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CertArgs {
    #[command(subcommand)]
    pub command: CertCommand,
}

#[derive(Debug, Subcommand)]
pub enum CertCommand {
    /// Upload a certificate chain and private key
    Upload {
        /// Site ID
        id: String,

        /// PEM certificate chain
        #[arg(long)]
        chain: PathBuf,

        /// PEM private key
        #[arg(long)]
        key: PathBuf,

        /// Replace an existing certificate instead of adding one
        #[arg(long)]
        replace: bool,
    },

    /// Remove the site's certificate
    Delete {
        /// Site ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ACL
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AclArgs {
    #[command(subcommand)]
    pub command: AclCommand,
}

#[derive(Debug, Subcommand)]
pub enum AclCommand {
    /// Show the ACL
    Get {
        /// Site ID
        id: String,
    },

    /// Replace the ACL
    Set {
        /// Site ID
        id: String,

        /// File with one rule per line (e.g. "deny 192.0.2.0/24")
        #[arg(long, short = 'F', conflicts_with = "rule")]
        from_file: Option<PathBuf>,

        /// A single rule; repeat for several
        #[arg(long, short = 'r')]
        rule: Vec<String>,
    },

    /// Remove the ACL
    Delete {
        /// Site ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ORIGIN GUARD
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct OriginGuardArgs {
    #[command(subcommand)]
    pub command: OriginGuardCommand,
}

#[derive(Debug, Subcommand)]
pub enum OriginGuardCommand {
    /// Show the current and pending tokens
    Get {
        /// Site ID
        id: String,
    },

    /// Issue a new token, replacing the current one
    Create {
        /// Site ID
        id: String,
    },

    /// Stage the next token for rotation
    Next {
        /// Site ID
        id: String,
    },

    /// Discard the staged next token
    DiscardNext {
        /// Site ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG / COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Display the loaded configuration with secrets redacted
    Show,

    /// Store the access token secret in the system keyring
    SetSecret {
        /// Profile to store it for (defaults to the active profile)
        #[arg(long)]
        profile: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
