use std::{net::SocketAddr, path::Path, sync::Arc, time::Duration};

use clap::Parser;
use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use waf_fixture::{
    FileSystemAdapter, HttpHandler,
    config::{ServerConfigValidator, loader::load_config, models::ServerConfig},
    tracing_setup,
    utils::graceful_shutdown::GracefulShutdown,
};

#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    #[clap(subcommand)]
    command: Option<Commands>,

    #[clap(short, long, default_value = "config.toml")]
    config: String,
}

impl Args {
    /// Resolve the subcommand and the config path it should use
    fn resolve(self) -> (Command, String) {
        match self.command {
            Some(Commands::Validate { config }) => {
                (Command::Validate, config.unwrap_or(self.config))
            }
            Some(Commands::Init { config }) => (Command::Init, config.unwrap_or(self.config)),
            Some(Commands::Serve { config }) => (Command::Serve, config.unwrap_or(self.config)),
            None => (Command::Serve, self.config),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Validate,
    Init,
    Serve,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Validate configuration file
    Validate {
        /// Configuration file to validate
        #[clap(short, long)]
        config: Option<String>,
    },
    /// Initialize a new configuration file
    Init {
        /// Output path for the new config file
        #[clap(short, long)]
        config: Option<String>,
    },
    /// Start the fixture server (default)
    Serve {
        /// Configuration file to use
        #[clap(short, long)]
        config: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    // A subcommand's own --config wins over the top-level one
    let (command, config_path) = args.resolve();
    match command {
        Command::Validate => return validate_config_command(&config_path).await,
        Command::Init => return init_config_command(&config_path).await,
        Command::Serve => {}
    }

    let config: ServerConfig = load_config(&config_path)
        .await
        .with_context(|| format!("Failed to load config from {config_path}"))?;
    ServerConfigValidator::validate(&config).map_err(|e| eyre!("Invalid configuration: {e}"))?;

    tracing_setup::init_tracing_with_config(&config.logging.level, config.logging.json)
        .map_err(|e| eyre!("Failed to initialize tracing: {}", e))?;

    tracing::info!("Loaded configuration from {config_path}");

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .context("Failed to parse listen address")?;
    let drain_timeout = Duration::from_secs(config.shutdown_timeout_secs);
    let config = Arc::new(config);

    let graceful_shutdown = Arc::new(GracefulShutdown::with_timeout(drain_timeout));
    let signal_handler_shutdown = graceful_shutdown.clone();
    tokio::spawn(async move {
        signal_handler_shutdown.run_signal_handler().await;
    });

    let app = HttpHandler::new(config.clone(), Arc::new(FileSystemAdapter::new())).router();

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    tracing::info!(
        "Starting WAF fixture on {} (static root: {}, CORS: {})",
        addr,
        config.static_files.root,
        config.cors.enabled
    );
    println!("WAF fixture listening on http://{addr}");

    let server_shutdown = graceful_shutdown.clone();
    let serve = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        server_shutdown.wait_for_shutdown_signal().await;
    });
    let mut server = tokio::spawn(serve.into_future());

    tokio::select! {
        result = &mut server => {
            result.context("Server task failed")?.context("Server error")?;
            return Ok(());
        }
        reason = graceful_shutdown.wait_for_shutdown_signal() => {
            tracing::info!(
                "Shutdown signal received: {:?}, draining in-flight requests (timeout {:?})",
                reason,
                graceful_shutdown.drain_timeout()
            );
        }
    }

    match tokio::time::timeout(graceful_shutdown.drain_timeout(), server).await {
        Ok(result) => {
            result.context("Server task failed")?.context("Server error")?;
            tracing::info!("Graceful shutdown completed");
        }
        Err(_) => {
            tracing::warn!("Drain timeout elapsed, closing remaining connections");
        }
    }

    Ok(())
}

/// Validate configuration file and exit
async fn validate_config_command(config_path: &str) -> Result<()> {
    println!("🔍 Validating configuration file: {config_path}");

    if !Path::new(config_path).exists() {
        eprintln!("❌ Error: Configuration file '{config_path}' not found");
        std::process::exit(1);
    }

    let config = match load_config(config_path).await {
        Ok(config) => {
            println!("✅ Configuration parsing: OK");
            config
        }
        Err(e) => {
            eprintln!("❌ Configuration parsing failed:");
            eprintln!("   {e}");
            std::process::exit(1);
        }
    };

    match ServerConfigValidator::validate(&config) {
        Ok(()) => {
            println!("✅ Configuration validation: OK");
            println!();
            println!("📋 Configuration Summary:");
            println!("   • Listen Address: {}", config.listen_addr);
            println!("   • Static Root: {}", config.static_files.root);
            println!("   • Index File: {}", config.static_files.index_file);
            println!("   • Log Level: {}", config.logging.level);
            println!("   • JSON Logs: {}", config.logging.json);
            println!("   • CORS Enabled: {}", config.cors.enabled);
            println!("   • Shutdown Timeout: {}s", config.shutdown_timeout_secs);
            println!();
            println!("🎉 Configuration is valid and ready to use!");
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Configuration validation failed:");
            eprintln!("{e}");
            println!();
            println!("💡 Common fixes:");
            println!("   • Verify listen address format (e.g., '127.0.0.1:8080')");
            println!("   • Keep index_file a bare file name inside the static root");
            println!("   • Use a valid log filter (e.g., 'info' or 'waf_fixture=debug')");
            std::process::exit(1);
        }
    }
}

/// Initialize a new configuration file
async fn init_config_command(config_path: &str) -> Result<()> {
    let path = Path::new(config_path);
    if path.exists() {
        eprintln!("❌ Error: Configuration file '{config_path}' already exists");
        std::process::exit(1);
    }

    let default_config = r#"# WAF fixture configuration

# The address to listen on
listen_addr = "0.0.0.0:8080"

# Seconds to wait for in-flight requests after SIGINT / SIGTERM
shutdown_timeout_secs = 30

# Landing page and other static assets
[static_files]
root = "./static"
index_file = "index.html"

# RUST_LOG overrides `level` when set
[logging]
level = "info"
json = true

# Allow any origin, method and header
[cors]
enabled = true
"#;

    tokio::fs::write(path, default_config)
        .await
        .context("Failed to write config file")?;
    println!("✅ Created default configuration at: {config_path}");
    println!("   Run 'waf-fixture serve --config {config_path}' to start the server");
    Ok(())
}
