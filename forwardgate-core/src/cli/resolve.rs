use crate::conf::types::{DEFAULT_FOR_HEADER, DEFAULT_PROTO_HEADER, DEFAULT_TRUSTED_NETWORKS};
use crate::conf::{ForwardedSpec, load_config, validate_config};
use crate::ctx::RequestCtx;
use crate::resolver::{Handler, PeerState, TrustResolver, handler_fn};
use anyhow::{Context, anyhow};
use clap::Args;
use http::{HeaderName, HeaderValue};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Run one synthetic request through the trust gate.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Peer address of the connection (`ip`, `ip:port`, `[ipv6]:port` or `@`)
    #[arg(long)]
    pub peer: String,

    /// The connection itself arrived over TLS
    #[arg(long)]
    pub secure: bool,

    /// Request header as `Name: value`, repeatable and kept in order
    #[arg(short = 'H', long = "header", value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Load resolver options from a config file instead of flags
    #[arg(long, conflicts_with_all = ["trusted", "allow_empty_source", "forwarded", "for_header", "proto_header"])]
    pub config: Option<PathBuf>,

    /// Comma-separated trusted networks
    #[arg(long, default_value = DEFAULT_TRUSTED_NETWORKS)]
    pub trusted: String,

    /// Trust peers without a numeric address
    #[arg(long)]
    pub allow_empty_source: bool,

    /// Parse the RFC 7239 Forwarded header
    #[arg(long)]
    pub forwarded: bool,

    /// Legacy client address header, empty to disable
    #[arg(long, default_value = DEFAULT_FOR_HEADER)]
    pub for_header: String,

    /// Legacy protocol header, empty to disable
    #[arg(long, default_value = DEFAULT_PROTO_HEADER)]
    pub proto_header: String,
}

impl ResolveArgs {
    fn resolver(&self) -> anyhow::Result<Arc<TrustResolver>> {
        let cfg = match &self.config {
            Some(path) => load_config(path)?,
            None => validate_config(ForwardedSpec {
                trusted_networks: self.trusted.clone(),
                allow_empty_source: self.allow_empty_source,
                use_forwarded: self.forwarded,
                for_header: self.for_header.clone(),
                proto_header: self.proto_header.clone(),
            })?,
        };
        Ok(cfg.resolver)
    }

    fn request(&self) -> anyhow::Result<RequestCtx> {
        let mut ctx = RequestCtx::new(self.peer.as_str()).with_secure(self.secure);
        for raw in &self.headers {
            let (name, value) = parse_header(raw)?;
            ctx.append_header(name, value);
        }
        Ok(ctx)
    }
}

pub fn run(args: ResolveArgs) -> anyhow::Result<()> {
    let resolver = args.resolver()?;
    let mut ctx = args.request()?;
    let before = ctx.peer_state();

    let gate = resolver.wrap(handler_fn(|ctx: &mut RequestCtx| {
        let after = ctx.peer_state();
        info!(peer_addr = %after.peer_addr, secure = after.secure, "downstream handler reached");
        after
    }));

    let after = gate.handle(&mut ctx);
    print_outcome(
        &before,
        &after,
        gate.resolver().is_trusted_source(&before.peer_addr),
    );
    Ok(())
}

fn print_outcome(before: &PeerState, after: &PeerState, trusted: bool) {
    println!("peer:      {}", before.peer_addr);
    println!("trusted:   {}", trusted);
    println!("peer_addr: {}", after.peer_addr);
    println!("secure:    {}", after.secure);
    if before == after {
        println!("(unchanged)");
    }
}

pub(crate) fn parse_header(raw: &str) -> anyhow::Result<(HeaderName, HeaderValue)> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| anyhow!("header '{raw}' must look like 'Name: value'"))?;

    let name = HeaderName::from_bytes(name.trim().as_bytes())
        .with_context(|| format!("invalid header name in '{raw}'"))?;
    let value = HeaderValue::from_str(value.trim())
        .with_context(|| format!("invalid header value in '{raw}'"))?;

    Ok((name, value))
}
