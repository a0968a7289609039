use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::interviews::repository::InterviewRepository;
use crate::screening::extractor::SkillExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Resume uploads land in `config.s3_bucket`.
    pub s3: S3Client,
    pub config: Config,
    /// Keyword or LLM backend, behind the Redis cache. Chosen by SKILL_EXTRACTOR.
    pub skill_extractor: Arc<dyn SkillExtractor>,
    pub interviews: Arc<dyn InterviewRepository>,
}
