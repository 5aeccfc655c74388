pub mod api;
pub mod websocket;

use crate::cli::Args;
use crate::AppContext;
use self::websocket::handle_connection;
use log::{ error, info };
use rustls::pki_types::{ CertificateDer, PrivateKeyDer };
use rustls::ServerConfig;
use rustls_pemfile::{ certs, pkcs8_private_keys };
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{ AsyncRead, AsyncWrite };
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use tokio_tungstenite::accept_async;

pub struct Server {
    addr: String,
    ctx: Arc<AppContext>,
    args: Args,
}

pub(crate) fn load_tls_config(
    cert_path: &str,
    key_path: &str
) -> Result<Arc<ServerConfig>, Box<dyn Error + Send + Sync>> {
    let cert_file = File::open(cert_path).map_err(|e|
        format!("Failed to open TLS certificate file '{}': {}", cert_path, e)
    )?;
    let key_file = File::open(key_path).map_err(|e|
        format!("Failed to open TLS key file '{}': {}", key_path, e)
    )?;

    let mut cert_reader = BufReader::new(cert_file);
    let mut key_reader = BufReader::new(key_file);
    let cert_chain: Vec<CertificateDer<'static>> = certs(&mut cert_reader)
        .collect::<Result<_, _>>()
        .map_err(|e| format!("Failed to read certificate(s): {}", e))?;

    let mut keys = pkcs8_private_keys(&mut key_reader);
    let key = match keys.next() {
        Some(Ok(k)) => PrivateKeyDer::Pkcs8(k),
        Some(Err(e)) => {
            return Err(format!("Error reading private key: {}", e).into());
        }
        None => {
            return Err("No PKCS8 private key found in key file".into());
        }
    };

    let config = ServerConfig::builder_with_provider(
        Arc::new(rustls::crypto::ring::default_provider())
    )
        .with_safe_default_protocol_versions()?
        .with_no_client_auth()
        .with_single_cert(cert_chain, key)?;

    Ok(Arc::new(config))
}

/// Resolves the TLS flags into cert/key paths, or `None` for plain transport.
pub(crate) fn tls_paths(args: &Args) -> Result<Option<(String, String)>, Box<dyn Error + Send + Sync>> {
    if !args.enable_tls {
        return Ok(None);
    }
    match (&args.tls_cert_path, &args.tls_key_path) {
        (Some(cert_path), Some(key_path)) => Ok(Some((cert_path.clone(), key_path.clone()))),
        (Some(_), None) | (None, Some(_)) => {
            error!("Both --tls-cert-path and --tls-key-path must be provided to enable TLS.");
            Err("Missing TLS certificate or key path".into())
        }
        (None, None) => {
            error!("--enable-tls was set but no certificate/key paths provided.");
            Err("TLS enabled without cert/key".into())
        }
    }
}

impl Server {
    pub fn new(addr: String, ctx: Arc<AppContext>, args: Args) -> Self {
        Self { addr, ctx, args }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let tls_acceptor = match tls_paths(&self.args)? {
            Some((cert_path, key_path)) => {
                info!("TLS enabled. Loading certificate from '{}' and key from '{}'", cert_path, key_path);
                Some(TlsAcceptor::from(load_tls_config(&cert_path, &key_path)?))
            }
            None => {
                info!("TLS not enabled. Running plain WebSocket (WS) server.");
                None
            }
        };

        if let Some(http_port) = self.args.http_port {
            api::start_http_server(http_port, Arc::clone(&self.ctx), self.args.clone()).await?;
        }

        let listener = TcpListener::bind(&self.addr).await?;
        let protocol = if tls_acceptor.is_some() { "wss" } else { "ws" };
        info!("{} server listening on: {}", protocol.to_uppercase(), self.addr);

        loop {
            let (stream, peer) = listener.accept().await?;
            info!("Incoming connection from: {}", peer);
            let ctx = Arc::clone(&self.ctx);
            let tls_acceptor_clone = tls_acceptor.clone();

            tokio::spawn(async move {
                let process_result = if let Some(acceptor) = tls_acceptor_clone {
                    match acceptor.accept(stream).await {
                        Ok(tls_stream) => {
                            info!("TLS handshake successful for {}", peer);
                            Self::process_connection(peer, tls_stream, ctx).await
                        }
                        Err(e) => {
                            error!("TLS handshake error for {}: {}", peer, e);
                            Err(Box::new(e) as Box<dyn Error + Send + Sync>)
                        }
                    }
                } else {
                    Self::process_connection(peer, stream, ctx).await
                };

                if let Err(e) = process_result {
                    error!("Failed to process connection for {}: {}", peer, e);
                }
            });
        }
    }

    async fn process_connection<S>(
        peer: SocketAddr,
        stream: S,
        ctx: Arc<AppContext>
    ) -> Result<(), Box<dyn Error + Send + Sync>>
        where S: AsyncRead + AsyncWrite + Unpin + Send + 'static
    {
        match accept_async(stream).await {
            Ok(ws) => {
                handle_connection(peer, ws, ctx).await;
                Ok(())
            }
            Err(e) => {
                error!("Handshake failed for {}: {}", peer, e);
                Err(Box::new(e) as _)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["ceo-assistant", "--chat-api-key", "k"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_tls_disabled_by_default() {
        assert!(tls_paths(&args(&[])).unwrap().is_none());
    }

    #[test]
    fn test_tls_requires_both_paths() {
        let a = args(&["--enable-tls", "--tls-cert-path", "cert.pem"]);
        assert!(tls_paths(&a).is_err());
        let a = args(&["--enable-tls"]);
        assert!(tls_paths(&a).is_err());
        let a = args(&["--enable-tls", "--tls-cert-path", "c.pem", "--tls-key-path", "k.pem"]);
        assert_eq!(tls_paths(&a).unwrap(), Some(("c.pem".to_string(), "k.pem".to_string())));
    }

    #[test]
    fn test_missing_certificate_file_is_reported() {
        let err = load_tls_config("/nope/cert.pem", "/nope/key.pem").unwrap_err();
        assert!(err.to_string().contains("/nope/cert.pem"));
    }
}
