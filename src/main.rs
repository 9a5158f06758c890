//! Webdesk binary entry point.

use tracing::info;
use webdesk::api::{self, AppState};
use webdesk::cli;
use webdesk::config::Config;
use webdesk::logging;
use webdesk::shell::PathResolver;

#[tokio::main]
async fn main() {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Try 'webdesk --help' for usage.");
            std::process::exit(2);
        }
    };

    if args.help {
        cli::print_help();
        return;
    }
    if args.version {
        cli::print_version();
        return;
    }

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    logging::init_with_filter(config.log_filter());

    info!("webdesk v{}", env!("CARGO_PKG_VERSION"));

    let resolver = match build_resolver(&config) {
        Ok(resolver) => resolver,
        Err(e) => {
            eprintln!("error: invalid web root '{}': {}", config.shell.root, e);
            std::process::exit(1);
        }
    };
    info!("web root: {}", resolver.root().display());

    let state = AppState::with_resolver(resolver);

    let server_config = match config.to_server_config() {
        Ok(server_config) => server_config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = api::serve(server_config, state).await {
        tracing::error!("server error: {}", e);
        std::process::exit(1);
    }
}

fn build_resolver(config: &Config) -> std::io::Result<PathResolver> {
    let resolver = PathResolver::new(&config.shell.root)?;
    Ok(match &config.shell.root_label {
        Some(label) => resolver.with_label(label),
        None => resolver,
    })
}
