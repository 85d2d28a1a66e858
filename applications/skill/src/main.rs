/// PCO Skill - voice skill that plays songs from upcoming Planning Center plans
use clap::{Parser, Subcommand};
use pco_client::PlanningCenterClient;
use pco_core::UserId;
use pco_skill::{
    api, services::playlist::build_playlist, AppState, AttributesManager, SkillConfig,
};
use pco_storage::SqliteAttributesStore;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pco-skill")]
#[command(about = "Planning Center song-player voice skill", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Forget a user's playlist, settings and progress
    ResetUser {
        /// Voice-platform user id
        #[arg(short, long)]
        user_id: String,
    },
    /// Print a user's stored session attributes
    ShowUser {
        /// Voice-platform user id
        #[arg(short, long)]
        user_id: String,
    },
    /// List service types, confirmed plans and their streamable songs
    Songs {
        /// Planning Center OAuth access token
        #[arg(short, long, env = "PCO_SKILL_ACCESS_TOKEN")]
        access_token: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pco_skill=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = SkillConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Serve => {
            serve(config).await?;
        }
        Commands::ResetUser { user_id } => {
            reset_user(&config, &user_id).await?;
        }
        Commands::ShowUser { user_id } => {
            show_user(&config, &user_id).await?;
        }
        Commands::Songs { access_token } => {
            list_songs(&config, &access_token).await?;
        }
    }

    Ok(())
}

async fn serve(config: SkillConfig) -> anyhow::Result<()> {
    tracing::info!("Starting PCO Skill");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let attributes = open_attributes(&config).await?;
    tracing::info!("Database connected");

    let client = PlanningCenterClient::new(config.client_config())?;
    tracing::info!("Planning Center API: {}", client.base_url());

    if config.skill.application_id.is_none() {
        tracing::warn!("No application id configured, accepting requests for any skill");
    }

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    let app_state = AppState::new(attributes, Arc::new(client), Arc::new(config));
    let app = api::create_router(app_state);

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn open_attributes(config: &SkillConfig) -> anyhow::Result<Arc<AttributesManager>> {
    let pool = pco_storage::create_pool(&config.storage.database_url).await?;
    pco_storage::run_migrations(&pool).await?;

    let store = SqliteAttributesStore::new(pool);
    Ok(Arc::new(AttributesManager::new(Arc::new(store))))
}

async fn reset_user(config: &SkillConfig, user_id: &str) -> anyhow::Result<()> {
    let attributes = open_attributes(config).await?;

    if attributes.reset(&UserId::new(user_id)).await? {
        println!("Reset session for {}", user_id);
    } else {
        println!("No session stored for {}", user_id);
    }

    Ok(())
}

async fn show_user(config: &SkillConfig, user_id: &str) -> anyhow::Result<()> {
    let attributes = open_attributes(config).await?;

    match attributes.get(&UserId::new(user_id)).await? {
        Some(stored) => println!("{}", serde_json::to_string_pretty(&stored)?),
        None => println!("No session stored for {}", user_id),
    }

    Ok(())
}

async fn list_songs(config: &SkillConfig, access_token: &str) -> anyhow::Result<()> {
    let client = PlanningCenterClient::new(config.client_config())?;
    let services = client.services(access_token)?;

    let me = services.current_user().await?;
    println!("Signed in as {} {}", me.first_name, me.last_name);

    println!("Service types:");
    for service_type in services.service_types().await? {
        println!("  {} - {}", service_type.id, service_type.name);
    }

    let plans = services.my_plans().await?;
    println!(
        "Plans: {} confirmed, {} unconfirmed or declined",
        plans.confirmed.len(),
        plans.not_confirmed_count()
    );
    for plan in &plans.confirmed {
        println!(
            "  {} - {} ({})",
            plan.id,
            plan.title.as_deref().unwrap_or("Untitled"),
            plan.dates.as_deref().unwrap_or("no dates")
        );
    }

    let attachments = services.streamable_attachments(&plans.confirmed).await?;
    let songs = build_playlist(&attachments);
    println!("Songs:");
    for (index, song) in songs.iter().enumerate() {
        println!("  {}. {}", index + 1, song.title);
    }

    Ok(())
}
