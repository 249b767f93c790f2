//! Cache purge handlers.

use tabled::Tabled;

use webaccel_api::{DeleteAllCacheRequest, DeleteCacheRequest, DeleteCacheResult};

use crate::cli::{CacheArgs, CacheCommand};
use crate::error::CliError;
use crate::output;

use super::Ctx;

#[derive(Tabled)]
struct PurgeRow {
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "Status")]
    status: i32,
    #[tabled(rename = "Result")]
    result: String,
}

fn row(r: &DeleteCacheResult) -> PurgeRow {
    PurgeRow {
        url: r.url.clone(),
        status: r.status,
        result: r.result.clone(),
    }
}

pub async fn handle(args: CacheArgs, ctx: &Ctx<'_>) -> Result<(), CliError> {
    match args.command {
        CacheCommand::PurgeAll { domain } => {
            ctx.client
                .delete_all_cache(&DeleteAllCacheRequest::new(domain.as_str()))
                .await
                .map_err(ctx.api_err(None))?;
            ctx.note(&format!("Purge requested for everything under {domain}"));
            Ok(())
        }

        CacheCommand::Purge { urls } => {
            let results = ctx
                .client
                .delete_cache(&DeleteCacheRequest::new(urls))
                .await
                .map_err(ctx.api_err(None))?;

            let out = output::render_list(&ctx.global.output, &results, row, |r| {
                format!("{}\t{}", r.url, r.status)
            })?;
            output::print_output(&out, ctx.global.quiet);

            let failed = results.iter().filter(|r| !r.is_success()).count();
            if failed > 0 {
                return Err(CliError::PartialPurge {
                    failed,
                    total: results.len(),
                });
            }
            Ok(())
        }
    }
}
