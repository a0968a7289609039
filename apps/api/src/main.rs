mod auth;
mod candidates;
mod config;
mod db;
mod errors;
mod interviews;
mod jobs;
mod llm_client;
mod matching;
mod models;
mod routes;
mod screening;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use axum::http::HeaderValue;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, ExtractorBackend};
use crate::db::connect_and_migrate;
use crate::interviews::repository::PgInterviewRepository;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::screening::cache::CachedSkillExtractor;
use crate::screening::extractor::{KeywordSkillExtractor, LlmSkillExtractor, SkillExtractor};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Screener API v{}", env!("CARGO_PKG_VERSION"));

    let db = connect_and_migrate(&config.database_url).await?;
    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        auth::repository::seed_admin(&db, email, password)
            .await
            .context("Failed to seed admin account")?;
    }

    let redis = redis::Client::open(config.redis_url.clone())?;
    info!("Redis client initialized");

    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    let skill_extractor = build_skill_extractor(&config, redis)?;

    let state = AppState {
        db: db.clone(),
        s3,
        config: config.clone(),
        skill_extractor,
        interviews: Arc::new(PgInterviewRepository::new(db)),
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(build_cors(&config)?),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Selected backend wrapped in the Redis cache.
fn build_skill_extractor(config: &Config, redis: redis::Client) -> Result<Arc<dyn SkillExtractor>> {
    let inner: Arc<dyn SkillExtractor> = match config.skill_extractor {
        ExtractorBackend::Keyword => Arc::new(KeywordSkillExtractor::new()),
        ExtractorBackend::Llm => {
            let llm = LlmClient::new(config.anthropic_api_key.clone())
                .context("Failed to build LLM client")?;
            info!("LLM skill extraction enabled (model: {})", llm_client::MODEL);
            Arc::new(LlmSkillExtractor(llm))
        }
    };
    info!("Skill extractor: {}", inner.backend());
    Ok(Arc::new(CachedSkillExtractor::new(inner, redis)))
}

fn build_cors(config: &Config) -> Result<CorsLayer> {
    match &config.cors_origin {
        Some(origin) => {
            let origin: HeaderValue = origin
                .parse()
                .with_context(|| format!("Invalid CORS_ORIGIN '{origin}'"))?;
            Ok(CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any))
        }
        None => Ok(CorsLayer::permissive()),
    }
}

/// S3 client for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "screener-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    let s3_config = aws_sdk_s3::config::Builder::from(&s3_config)
        .force_path_style(true)
        .build();
    aws_sdk_s3::Client::from_conf(s3_config)
}
