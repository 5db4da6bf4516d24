use std::path::PathBuf;

use clap::Args;
use gita::AppState;
use gita_core::GitaConfig;

/// Overrides for the `[server]` section.
#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long)]
    bind: Option<String>,
    /// Port to listen on
    #[arg(long, short = 'p')]
    port: Option<u16>,
    /// PEM certificate; enables TLS together with --tls-key
    #[arg(long)]
    tls_cert: Option<PathBuf>,
    /// PEM private key
    #[arg(long)]
    tls_key: Option<PathBuf>,
}

pub async fn serve(mut config: GitaConfig, args: ServeArgs) -> anyhow::Result<()> {
    let server = &mut config.server;
    if let Some(bind) = args.bind {
        server.bind = bind;
    }
    if let Some(port) = args.port {
        server.port = port;
    }
    if args.tls_cert.is_some() {
        server.tls_cert = args.tls_cert;
    }
    if args.tls_key.is_some() {
        server.tls_key = args.tls_key;
    }

    let state = AppState::load(&config).await?;
    let stored = state.store.count().await?;
    tracing::info!(stored, database = %config.database.path.display(), "database ready");

    gita::serve(gita::router(state, &config.server), &config.server).await?;
    Ok(())
}
