use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use axum::Router;
use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;
use gita_core::ServerConfig;
use tokio::net::TcpListener;

use crate::error::ServeError;

const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Serve `app` until Ctrl-C.
///
/// TLS is used when both `tls_cert` and `tls_key` are configured; a missing
/// or unreadable file fails before anything is bound.
pub async fn serve(app: Router, server: &ServerConfig) -> Result<(), ServeError> {
    bind(server).await?.run(app, shutdown_signal()).await
}

/// A bound listener, with the TLS settings it will serve under.
pub struct Listening {
    listener: std::net::TcpListener,
    addr: SocketAddr,
    tls: Option<RustlsConfig>,
}

/// Load TLS material, then bind the configured address.
pub async fn bind(server: &ServerConfig) -> Result<Listening, ServeError> {
    let tls = match server.tls_files() {
        Some((cert, key)) => Some(load_tls(cert, key).await?),
        None if server.tls_cert.is_some() || server.tls_key.is_some() => {
            return Err(ServeError::TlsIncomplete);
        }
        None => None,
    };

    let requested = resolve(&server.bind, server.port).await?;
    let bind_error = |source| ServeError::Bind {
        addr: requested.to_string(),
        source,
    };
    let listener = std::net::TcpListener::bind(requested).map_err(bind_error)?;
    listener.set_nonblocking(true).map_err(bind_error)?;
    let addr = listener.local_addr().map_err(bind_error)?;

    Ok(Listening { listener, addr, tls })
}

impl Listening {
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Serve until `shutdown` resolves, then drain open connections.
    pub async fn run<F>(self, app: Router, shutdown: F) -> Result<(), ServeError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Self { listener, addr, tls } = self;
        let service = app.into_make_service_with_connect_info::<SocketAddr>();

        match tls {
            Some(tls) => {
                let handle = Handle::new();
                let trigger = handle.clone();
                tokio::spawn(async move {
                    shutdown.await;
                    trigger.graceful_shutdown(Some(SHUTDOWN_GRACE));
                });

                tracing::info!(%addr, "listening on https");
                axum_server::from_tcp_rustls(listener, tls)
                    .handle(handle)
                    .serve(service)
                    .await
                    .map_err(ServeError::Io)
            }
            None => {
                let listener = TcpListener::from_std(listener).map_err(|e| ServeError::Bind {
                    addr: addr.to_string(),
                    source: e,
                })?;

                tracing::info!(%addr, "listening on http");
                axum::serve(listener, service)
                    .with_graceful_shutdown(shutdown)
                    .await
                    .map_err(ServeError::Io)
            }
        }
    }
}

async fn load_tls(cert: &Path, key: &Path) -> Result<RustlsConfig, ServeError> {
    RustlsConfig::from_pem_file(cert, key)
        .await
        .map_err(|e| ServeError::Tls {
            cert: cert.to_path_buf(),
            key: key.to_path_buf(),
            source: e,
        })
}

async fn resolve(host: &str, port: u16) -> Result<SocketAddr, ServeError> {
    let bind_error = |source| ServeError::Bind {
        addr: format!("{host}:{port}"),
        source,
    };
    tokio::net::lookup_host((host, port))
        .await
        .map_err(bind_error)?
        .next()
        .ok_or_else(|| {
            bind_error(std::io::Error::new(
                std::io::ErrorKind::AddrNotAvailable,
                "address resolved to nothing",
            ))
        })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C; shutdown signal disabled");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
