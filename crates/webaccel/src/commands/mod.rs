//! Command dispatch: bridges CLI args -> client calls -> output formatting.

pub mod acl;
pub mod cache;
pub mod cert;
pub mod config_cmd;
pub mod origin_guard;
pub mod sites;
pub mod util;

use webaccel_api::WebAccelClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::{CliError, Target};

/// What every API-bound handler needs.
pub struct Ctx<'a> {
    pub client: &'a WebAccelClient,
    pub global: &'a GlobalOpts,
    pub profile: &'a str,
}

impl Ctx<'_> {
    /// Map a client error, attributing 404s to `target` when given.
    pub fn api_err(&self, target: Option<Target>) -> impl FnOnce(webaccel_api::Error) -> CliError {
        let profile = self.profile.to_owned();
        move |err| CliError::from_api(err, target.as_ref(), &profile)
    }

    /// Print a status line to stderr unless `--quiet`.
    pub fn note(&self, msg: &str) {
        if !self.global.quiet {
            eprintln!("{msg}");
        }
    }
}

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, ctx: &Ctx<'_>) -> Result<(), CliError> {
    match cmd {
        Command::Sites(args) => sites::handle(args, ctx).await,
        Command::Cache(args) => cache::handle(args, ctx).await,
        Command::Cert(args) => cert::handle(args, ctx).await,
        Command::Acl(args) => acl::handle(args, ctx).await,
        Command::OriginGuard(args) => origin_guard::handle(args, ctx).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
