use std::sync::Arc;
use std::time::Duration;

use action_primitives::DomPort;
use anyhow::{Context, Result};
use cdp_adapter::CdpSession;
use clap::Args;
use envelope_relay::ClipboardChannel;
use tracing::{debug, info};

use crate::cli::context::CliContext;
use crate::notify::ConsoleNotifier;
use crate::paste::StdinPaste;
use crate::pipeline::Pipeline;

#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    /// Use the first tab whose URL starts with this instead of the first web tab
    #[arg(long)]
    pub url: Option<String>,

    /// Never prompt for a pasted record when the clipboard is refused
    #[arg(long)]
    pub no_paste: bool,
}

pub async fn cmd_run(args: RunArgs, ctx: &CliContext) -> Result<()> {
    let config = ctx.config().clone();
    debug!(config = %ctx.config_path().display(), "Using configuration");

    let session = CdpSession::connect(&config.browser)
        .await
        .with_context(|| format!("Failed to attach to browser at {}", config.browser.debugger_url))?;
    let page = session
        .active_page(args.url.as_deref())
        .await
        .context("Failed to select a browser tab")?;
    let dom: Arc<dyn DomPort> = Arc::new(page);

    let clipboard = ClipboardChannel::with_hold(Duration::from_secs(config.clipboard_hold_secs));
    let mut pipeline = Pipeline::new(config, Arc::new(ConsoleNotifier));
    if !args.no_paste {
        pipeline = pipeline.with_paste_fallback(Arc::new(StdinPaste));
    }

    let outcome = pipeline.handle(dom, &clipboard).await;
    session.shutdown();
    let outcome = outcome?;
    info!(outcome = %outcome, "Run finished");
    Ok(())
}
