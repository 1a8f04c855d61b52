use anyhow::{Context, Result};
use crm_backend::{
    build_router,
    config::AppConfig,
    models::{Campaign, Contact, Params, User},
    state::AppState,
};
use serde_json::json;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env().context("failed to load application configuration")?;

    let state = AppState::in_memory();
    if config.demo_seed {
        seed_demo_data(&state)
            .await
            .context("failed to seed demo data")?;
    }

    let app = build_router(state);

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(address = %addr, "crm backend started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("crm_backend=debug,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn seed_demo_data(state: &AppState) -> Result<()> {
    for (id, username) in [(1, "ann"), (2, "bob"), (3, "cid")] {
        state
            .users
            .insert(User {
                id,
                username: username.to_string(),
                email: format!("{username}@example.com"),
            })
            .await?;
    }

    for (first_name, last_name, email) in [
        ("Joe", "Spec", "joe@example.com"),
        ("Jane", "Doe", "jane@example.com"),
    ] {
        let params = contact_params(first_name, last_name, email);
        state.contacts.insert(Contact::from_params(&params)).await?;
    }

    let campaign = state
        .campaigns
        .insert(Campaign {
            uuid: Uuid::new_v4(),
            name: "Autumn launch".to_string(),
            persisted: true,
        })
        .await?;

    info!(campaign_uuid = %campaign.uuid, "demo data seeded");
    Ok(())
}

fn contact_params(first_name: &str, last_name: &str, email: &str) -> Params {
    json!({
        "first_name": first_name,
        "last_name": last_name,
        "email": email,
    })
    .as_object()
    .expect("literal is an object")
    .clone()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install Ctrl+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
