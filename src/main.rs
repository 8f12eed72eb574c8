use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use plainwiki::logger::Logger;
use plainwiki::{build_router, AppState, Config, PageStore, TemplateSet, WikiError};

#[derive(Parser, Debug)]
#[command(name = "plainwiki", about = "Plain-text wiki server")]
struct Cli {
    /// YAML settings file
    #[arg(short, long, default_value = "settings.yaml")]
    config: PathBuf,

    /// Override the port from the settings file
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    let cli = Cli::parse();
    if let Err(e) = Logger::init() {
        eprintln!("Failed to install logger: {}", e);
    }

    let mut config = Config::load(&cli.config)?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config.validate()?;

    let doc_root = config.server.doc_root.clone();
    let templates = TemplateSet::bootstrap(&doc_root, config.server.template_dir.as_deref())?;
    let state = AppState::new(PageStore::new(doc_root.clone()), templates);
    let app = build_router(state);

    let addr = config.socket_addr()?;
    log::info!("Wiki serving {:?} on http://{}", doc_root, addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await.map_err(WikiError::from)
}
