//! Certificate handlers.

use webaccel_api::CreateOrUpdateCertificateRequest;

use crate::cli::{CertArgs, CertCommand};
use crate::error::{CliError, Target};

use super::{Ctx, util};

pub async fn handle(args: CertArgs, ctx: &Ctx<'_>) -> Result<(), CliError> {
    match args.command {
        CertCommand::Upload {
            id,
            chain,
            key,
            replace,
        } => {
            let chain = util::read_text_file(&chain, "chain")?;
            let key = util::read_text_file(&key, "key")?;
            let req = CreateOrUpdateCertificateRequest::new(chain, key);

            let call = if replace {
                ctx.client.update_certificate(&id, &req).await
            } else {
                ctx.client.create_certificate(&id, &req).await
            };
            call.map_err(ctx.api_err(Some(Target::site(&id))))?;

            ctx.note(&format!(
                "Certificate {} for site {id}",
                if replace { "replaced" } else { "uploaded" }
            ));
            Ok(())
        }

        CertCommand::Delete { id } => {
            if !util::confirm(
                &format!("Remove the certificate from site '{id}'?"),
                "cert delete",
                ctx.global.yes,
            )? {
                return Ok(());
            }
            ctx.client
                .delete_certificate(&id)
                .await
                .map_err(ctx.api_err(Some(Target::on_site("certificate", &id))))?;
            ctx.note(&format!("Certificate removed from site {id}"));
            Ok(())
        }
    }
}
