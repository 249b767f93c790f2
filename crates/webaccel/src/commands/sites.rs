//! Site command handlers.

use std::path::Path;

use tabled::Tabled;

use webaccel_api::{
    CreateSiteRequest, Site, SiteFields, UpdateSiteRequest, UpdateSiteStatusRequest,
    validate_create, validate_update,
};

use crate::cli::{GlobalOpts, PayloadKind, SitesArgs, SitesCommand};
use crate::error::{CliError, Target};
use crate::output;

use super::{Ctx, util};

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Origin")]
    origin: String,
    #[tabled(rename = "Cert")]
    cert: String,
}

fn row(s: &Site) -> SiteRow {
    SiteRow {
        id: s.id.clone(),
        name: s.name.clone(),
        domain: s.serving_domain().to_owned(),
        status: s.status.clone(),
        origin: s.origin_summary(),
        cert: if s.has_certificate { "yes" } else { "-" }.into(),
    }
}

fn detail(s: &Site) -> String {
    let ttl = match s.default_cache_ttl() {
        Ok(Some(ttl)) => ttl.to_string(),
        Ok(None) => String::new(),
        Err(e) => e.to_string(),
    };
    output::detail_block(&[
        ("ID", s.id.clone()),
        ("Name", s.name.clone()),
        ("Status", s.status.clone()),
        ("Domain type", s.domain_type.clone()),
        ("Domain", s.domain.clone()),
        ("Subdomain", s.subdomain.clone()),
        ("Origin", s.origin_summary()),
        ("Host header", s.host_header.clone()),
        ("Request protocol", s.request_protocol.clone()),
        ("Origin protocol", s.origin_protocol.clone()),
        ("Cache TTL", ttl),
        ("Vary support", s.vary_support.clone()),
        ("Normalize AE", s.normalize_ae.clone()),
        ("CORS rules", s.cors_rules.len().to_string()),
        ("Certificate", if s.has_certificate { "yes" } else { "no" }.into()),
        ("Created", s.created_at.clone().unwrap_or_default()),
    ])
}

fn print_site(site: &Site, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(&global.output, site, detail, |s| s.id.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle(args: SitesArgs, ctx: &Ctx<'_>) -> Result<(), CliError> {
    let client = ctx.client;
    let global = ctx.global;

    match args.command {
        SitesCommand::List => {
            let list = client.list_sites().await.map_err(ctx.api_err(None))?;
            let out = output::render_list(&global.output, &list.sites, row, |s| s.id.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SitesCommand::Get { id } => {
            let site = client
                .read_site(&id)
                .await
                .map_err(ctx.api_err(Some(Target::site(&id))))?;
            print_site(&site, global)
        }

        SitesCommand::Create { from_file } => {
            let fields: SiteFields = util::read_json_file(&from_file)?;
            let req = CreateSiteRequest::try_from(fields)?;
            let site = client.create_site(&req).await.map_err(ctx.api_err(None))?;
            ctx.note(&format!("Site created: {}", site.id));
            print_site(&site, global)
        }

        SitesCommand::Update { id, from_file } => {
            let fields: SiteFields = util::read_json_file(&from_file)?;
            let req = UpdateSiteRequest::try_from(fields)?;
            let site = client
                .update_site(&id, &req)
                .await
                .map_err(ctx.api_err(Some(Target::site(&id))))?;
            ctx.note(&format!("Site updated: {id}"));
            print_site(&site, global)
        }

        SitesCommand::Status { id, status } => {
            let req = UpdateSiteStatusRequest::try_from(status.as_str())?;
            let site = client
                .update_site_status(&id, &req)
                .await
                .map_err(ctx.api_err(Some(Target::site(&id))))?;
            ctx.note(&format!("Site {id} is now {}", site.status));
            Ok(())
        }

        SitesCommand::Delete { id } => {
            if !util::confirm(
                &format!("Delete site '{id}'? This is destructive."),
                "sites delete",
                global.yes,
            )? {
                return Ok(());
            }
            client
                .delete_site(&id)
                .await
                .map_err(ctx.api_err(Some(Target::site(&id))))?;
            ctx.note(&format!("Site deleted: {id}"));
            Ok(())
        }

        // Handled offline before a client is built
        SitesCommand::Validate { kind, file } => validate(kind, &file, global),
    }
}

/// Check a payload file against the create or update rules.
pub fn validate(kind: PayloadKind, file: &Path, global: &GlobalOpts) -> Result<(), CliError> {
    let fields: SiteFields = util::read_json_file(file)?;
    match kind {
        PayloadKind::Create => validate_create(&fields)?,
        PayloadKind::Update => validate_update(&fields)?,
    }
    tracing::debug!(?kind, file = %file.display(), "payload accepted");
    output::print_output(
        &format!("{}: valid {} payload", file.display(), kind_name(kind)),
        global.quiet,
    );
    Ok(())
}

fn kind_name(kind: PayloadKind) -> &'static str {
    match kind {
        PayloadKind::Create => "create",
        PayloadKind::Update => "update",
    }
}
