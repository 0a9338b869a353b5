//! Bazar BEG shell
//!
//! Terminal front end for the client core: logs in, shows the screen set
//! the role gets, loads the catalog once and logs out.

use bazar_client::{api, app, bus, catalog, config, router, session};

use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so its log filter can seed the subscriber
    let config = config::load_config()?;

    // Initialize logging
    let fallback_filter = config.log_filter.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Starting Bazar BEG shell v{} ({})",
        env!("BAZAR_VERSION"),
        env!("BAZAR_GIT_SHA")
    );
    tracing::info!(
        auth = %config.auth_url,
        catalog = %config.catalog_url,
        "Configuration loaded"
    );

    // Create event bus and log everything published on it
    let bus = bus::create_bus();
    let mut events = bus.subscribe();
    let event_logger = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => tracing::debug!(?event, "App event"),
                Err(RecvError::Lagged(n)) => tracing::warn!("Event logger lagged by {}", n),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let client = Arc::new(api::ApiClient::from_config(&config)?);
    let mut app = app::AppController::new(client.clone(), bus.clone());

    let credentials = read_credentials().await?;
    if let Err(e) = app.login(&credentials).await {
        println!("Login failed: {}", e);
        event_logger.abort();
        return Ok(());
    }

    println!("{}", app.navigator().title());
    println!("Screens: {:?}", app.screen_set().screens());

    if let Some(loader) = app.catalog_loader() {
        println!("Loading...");
        match loader.load().await {
            catalog::LoadState::Loaded(snapshot) => {
                print_snapshot(&client, &snapshot, app.screen_set());
                open_first_category(&mut app, &snapshot);
            }
            catalog::LoadState::Error(message) => println!("{}", message),
            catalog::LoadState::Loading => {}
        }
    }

    app.logout();
    println!("Screens: {:?}", app.screen_set().screens());

    event_logger.abort();
    Ok(())
}

/// Credentials from BAZAR_EMAIL/BAZAR_PASSWORD, prompting for whatever is unset
async fn read_credentials() -> Result<session::Credentials> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let email = match std::env::var("BAZAR_EMAIL") {
        Ok(email) => email,
        Err(_) => prompt(&mut lines, "Email: ").await?,
    };
    let password = match std::env::var("BAZAR_PASSWORD") {
        Ok(password) => password,
        Err(_) => prompt(&mut lines, "Password: ").await?,
    };

    Ok(session::Credentials::new(email, password))
}

async fn prompt<R>(lines: &mut tokio::io::Lines<R>, label: &str) -> Result<String>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    let mut stdout = tokio::io::stdout();
    stdout.write_all(label.as_bytes()).await?;
    stdout.flush().await?;
    Ok(lines.next_line().await?.unwrap_or_default())
}

fn print_snapshot(
    client: &api::ApiClient,
    snapshot: &bazar_client::models::CatalogSnapshot,
    screens: router::ScreenSet,
) {
    println!("Categories ({})", snapshot.categories.len());
    for category in &snapshot.categories {
        let image = category
            .id
            .map(|id| client.category_image(id).url)
            .unwrap_or_else(|| api::placeholder_url(category.display_name()));
        println!("  {:<24} {}", category.display_name(), image);
    }

    println!("Products ({})", snapshot.products.len());
    for product in &snapshot.products {
        println!(
            "  {:<24} {:>10}  stock {}",
            product.display_name(),
            product.display_price(),
            product.stock
        );
        if screens == router::ScreenSet::Admin {
            println!("    {}", product.display_description());
        }
    }
}

/// Exercise admin detail navigation on the first category, if any.
fn open_first_category(
    app: &mut app::AppController,
    snapshot: &bazar_client::models::CatalogSnapshot,
) {
    let Some(category) = snapshot.categories.first() else {
        return;
    };
    let Some(nav) = app.navigator_mut().admin() else {
        return;
    };

    match nav.open_category(category.clone()) {
        Ok(()) => {
            println!("> {}", nav.current().title());
            nav.back();
        }
        Err(e) => println!("{}", e),
    }
}
