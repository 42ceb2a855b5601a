pub mod datetime;
pub mod editor;
pub mod error;
pub mod gateway;
pub mod list;
pub mod notice;
pub mod validate;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod commands;
#[cfg(feature = "cli")]
pub mod config;
#[cfg(feature = "cli")]
pub mod http;
#[cfg(feature = "cli")]
pub mod render;

pub use editor::{EditorOutcome, ItemEditor, SubmitError};
pub use error::GatewayError;
pub use gateway::{Gateway, Transport};
pub use list::{ListOrchestrator, LoadOutcome, PageLoad};
pub use notice::{Mutation, Notice, NoticeKind};

#[cfg(feature = "cli")]
use std::ffi::OsString;

#[cfg(feature = "cli")]
use anyhow::Context;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use tracing::{
  debug,
  info
};

#[cfg(feature = "cli")]
#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let cli =
    cli::GlobalCli::parse_from(raw_args);

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting todo CLI"
  );

  let mut cfg = config::Config::load(
    cli.todorc.as_deref()
  )?;
  cfg.apply_overrides(
    cli
      .rc_overrides
      .iter()
      .map(|kv| {
        (kv.key.clone(), kv.value.clone())
      })
  );
  debug!(files = ?cfg.loaded_files, "configuration loaded");

  let api_url = cli
    .api
    .clone()
    .unwrap_or_else(|| cfg.api_url());
  let gateway = Gateway::new(
    &api_url,
    http::ReqwestTransport::new()
  )
  .with_context(|| {
    format!(
      "failed to set up the todo \
       service client for {api_url}"
    )
  })?;

  let page_size = match cli.size {
    | Some(size) => size,
    | None => cfg.page_size()?
  };
  let status = match cli.status {
    | Some(status) => status,
    | None => cfg.default_status()?
  };
  let mut list =
    ListOrchestrator::with_view(
      status, cli.page, page_size
    );
  let renderer =
    render::Renderer::new(&cfg)?;

  let runtime =
    tokio::runtime::Builder::new_current_thread()
      .enable_all()
      .build()
      .context(
        "failed to start async \
         runtime"
      )?;

  let command = cli
    .command
    .unwrap_or(cli::Command::List);
  let mut out = std::io::stdout().lock();
  runtime.block_on(commands::dispatch(
    &gateway,
    &mut list,
    &renderer,
    &mut out,
    command,
    commands::confirm_on_stdin
  ))?;

  info!("done");
  Ok(())
}
