//! Origin guard token handlers.
//!
//! `next` stages a pending token so the origin can accept both before the
//! current one is replaced.

use webaccel_api::OriginGuardTokenResponse;

use crate::cli::{OriginGuardArgs, OriginGuardCommand};
use crate::error::{CliError, Target};
use crate::output;

use super::{Ctx, util};

fn detail(t: &OriginGuardTokenResponse) -> String {
    output::detail_block(&[
        ("Current", t.current().unwrap_or("(none)").to_owned()),
        ("Next", t.next().unwrap_or("(none)").to_owned()),
    ])
}

fn print_tokens(tokens: &OriginGuardTokenResponse, ctx: &Ctx<'_>) -> Result<(), CliError> {
    let out = output::render_single(&ctx.global.output, tokens, detail, |t| {
        t.current().unwrap_or_default().to_owned()
    })?;
    output::print_output(&out, ctx.global.quiet);
    Ok(())
}

pub async fn handle(args: OriginGuardArgs, ctx: &Ctx<'_>) -> Result<(), CliError> {
    let client = ctx.client;

    match args.command {
        OriginGuardCommand::Get { id } => {
            let tokens = client
                .read_origin_guard_token(&id)
                .await
                .map_err(ctx.api_err(Some(Target::on_site("origin guard token", &id))))?;
            print_tokens(&tokens, ctx)
        }

        OriginGuardCommand::Create { id } => {
            if !util::confirm(
                &format!("Replace the origin guard token of site '{id}'?"),
                "origin-guard create",
                ctx.global.yes,
            )? {
                return Ok(());
            }
            let tokens = client
                .create_origin_guard_token(&id)
                .await
                .map_err(ctx.api_err(Some(Target::site(&id))))?;
            print_tokens(&tokens, ctx)
        }

        OriginGuardCommand::Next { id } => {
            let tokens = client
                .create_next_origin_guard_token(&id)
                .await
                .map_err(ctx.api_err(Some(Target::site(&id))))?;
            ctx.note("Next token staged; configure the origin to accept it before promoting.");
            print_tokens(&tokens, ctx)
        }

        OriginGuardCommand::DiscardNext { id } => {
            client
                .delete_next_origin_guard_token(&id)
                .await
                .map_err(ctx.api_err(Some(Target::on_site(
                    "staged origin guard token",
                    &id,
                ))))?;
            ctx.note(&format!("Staged token discarded for site {id}"));
            Ok(())
        }
    }
}
