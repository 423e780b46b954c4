//! Sandüich Republic site server - main entry point
//!
//! Loads configuration, wires the EmailJS gateways and the site, then serves
//! MCP over stdio.

use anyhow::Result;
use sanduich_site::client::{EmailJsClient, EmailJsGateway, NotificationGateway};
use sanduich_site::partners::{
    AnalyticsHandle, LinkOpener, LogOnlyOpener, SystemBrowser, TracingAnalytics,
};
use sanduich_site::{Config, Menu, Metrics, Site, SiteDeps, SiteMcpServer};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration first so LOG_LEVEL can seed the filter
    let config = Config::from_env();

    let default_level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Logging goes to stderr; stdout carries the MCP protocol
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting site server with EmailJS API URL: {}",
        config.emailjs_api_url
    );

    let menu = match &config.menu_path {
        Some(path) => Menu::from_path(path)?,
        None => Menu::bundled()?,
    };
    info!(
        "Menu loaded: {} categories, {} items",
        menu.categories.len(),
        menu.item_count()
    );

    let metrics = Metrics::new();
    let client = Arc::new(EmailJsClient::new(&config).with_metrics(metrics.clone()));
    let contact_gateway = Arc::new(EmailJsGateway::new(
        client.clone(),
        &config.emailjs_template_id,
    )) as Arc<dyn NotificationGateway>;
    let newsletter_gateway = Arc::new(EmailJsGateway::new(
        client,
        &config.emailjs_newsletter_template_id,
    )) as Arc<dyn NotificationGateway>;

    let opener: Arc<dyn LinkOpener> = if config.open_in_browser {
        Arc::new(SystemBrowser)
    } else {
        Arc::new(LogOnlyOpener)
    };

    let site = Site::new(SiteDeps {
        contact_gateway,
        newsletter_gateway,
        analytics: AnalyticsHandle::new(Arc::new(TracingAnalytics)),
        opener,
        menu,
        recipient_name: config.recipient_name.clone(),
        status_display: config.status_display(),
        metrics,
    });

    info!(
        "Banner display window: {} seconds",
        config.status_display_secs
    );

    let server = SiteMcpServer::new(Arc::new(site));

    info!("Starting MCP server with stdio transport");
    sanduich_site::server::run_server(server).await?;

    info!("Site server shutdown complete");
    Ok(())
}
