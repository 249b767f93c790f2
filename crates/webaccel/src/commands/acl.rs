//! ACL handlers.

use webaccel_api::AclResult;

use crate::cli::{AclArgs, AclCommand};
use crate::error::{CliError, Target};
use crate::output;

use super::{Ctx, util};

fn print_acl(acl: &AclResult, ctx: &Ctx<'_>) -> Result<(), CliError> {
    let out = output::render_single(
        &ctx.global.output,
        acl,
        |a| a.entries().collect::<Vec<_>>().join("\n"),
        |a| a.entries().collect::<Vec<_>>().join("\n"),
    )?;
    output::print_output(&out, ctx.global.quiet);
    Ok(())
}

pub async fn handle(args: AclArgs, ctx: &Ctx<'_>) -> Result<(), CliError> {
    match args.command {
        AclCommand::Get { id } => {
            let acl = ctx
                .client
                .read_acl(&id)
                .await
                .map_err(ctx.api_err(Some(Target::on_site("ACL", &id))))?;
            print_acl(&acl, ctx)
        }

        AclCommand::Set {
            id,
            from_file,
            rule,
        } => {
            let text = match from_file {
                Some(path) => util::read_text_file(&path, "from-file")?,
                None if rule.is_empty() => {
                    return Err(CliError::Validation {
                        field: "rule".into(),
                        reason: "pass --from-file or at least one --rule".into(),
                    });
                }
                None => rule.join("\n"),
            };
            let acl = ctx
                .client
                .upsert_acl(&id, &AclResult::new(text))
                .await
                .map_err(ctx.api_err(Some(Target::site(&id))))?;
            ctx.note(&format!(
                "ACL for site {id} set ({} rule(s))",
                acl.entries().count()
            ));
            print_acl(&acl, ctx)
        }

        AclCommand::Delete { id } => {
            if !util::confirm(
                &format!("Remove the ACL from site '{id}'?"),
                "acl delete",
                ctx.global.yes,
            )? {
                return Ok(());
            }
            ctx.client
                .delete_acl(&id)
                .await
                .map_err(ctx.api_err(Some(Target::on_site("ACL", &id))))?;
            ctx.note(&format!("ACL removed from site {id}"));
            Ok(())
        }
    }
}
