use anyhow::Context;
use clap::Parser;
use pm_logger::Logger;
use pm_server::Server;
use powermatch::domain::config::ApiConfig;
use powermatch::kernel::config::load_config;
use powermatch::kernel::fault::install_panic_hook;
use std::path::PathBuf;

/// PowerMatch game server.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Configuration file (extension optional).
    #[arg(short, long, default_value = "server")]
    config: PathBuf,

    /// Overrides `server.port`.
    #[arg(short, long)]
    port: Option<u16>,
}

#[pm_runtime::main(high_performance)]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let _log = Logger::builder().name(env!("CARGO_PKG_NAME")).init()?;
    install_panic_hook();

    let cfg: ApiConfig =
        load_config(Some(&args.config)).context("Critical: Configuration is malformed")?;

    let mut builder = Server::builder().config(cfg);
    if let Some(port) = args.port {
        builder = builder.port(port);
    }

    builder.build().await?.run().await
}
