use anyhow::{bail, Context, Result};

/// Which `SkillExtractor` backend the screening pipeline uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorBackend {
    Keyword,
    Llm,
}

impl ExtractorBackend {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "keyword" => Ok(ExtractorBackend::Keyword),
            "llm" => Ok(ExtractorBackend::Llm),
            other => bail!("SKILL_EXTRACTOR must be 'keyword' or 'llm', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub anthropic_api_key: String,
    pub jwt_secret: String,
    /// Lifetime of tokens issued at login.
    pub jwt_ttl_secs: i64,
    /// Bootstrap admin created at startup when both are set.
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub skill_extractor: ExtractorBackend,
    pub cors_origin: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            jwt_secret: require_env("JWT_SECRET")?,
            jwt_ttl_secs: parse_ttl_hours(std::env::var("JWT_TTL_HOURS").ok().as_deref())?,
            admin_email: optional_env("ADMIN_EMAIL").map(|e| e.trim().to_lowercase()),
            admin_password: optional_env("ADMIN_PASSWORD"),
            skill_extractor: ExtractorBackend::parse(
                &std::env::var("SKILL_EXTRACTOR").unwrap_or_else(|_| "keyword".to_string()),
            )?,
            cors_origin: optional_env("CORS_ORIGIN"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}

const DEFAULT_TTL_HOURS: i64 = 24;

fn parse_ttl_hours(raw: Option<&str>) -> Result<i64> {
    let hours = match raw {
        None => DEFAULT_TTL_HOURS,
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .context("JWT_TTL_HOURS must be a whole number of hours")?,
    };
    if !(1..=24 * 30).contains(&hours) {
        bail!("JWT_TTL_HOURS must be between 1 and 720, got {hours}");
    }
    Ok(hours * 3600)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extractor_backend_parse() {
        assert_eq!(ExtractorBackend::parse("keyword").unwrap(), ExtractorBackend::Keyword);
        assert_eq!(ExtractorBackend::parse(" LLM ").unwrap(), ExtractorBackend::Llm);
        assert!(ExtractorBackend::parse("gemini").is_err());
    }

    #[test]
    fn test_ttl_hours() {
        assert_eq!(parse_ttl_hours(None).unwrap(), 24 * 3600);
        assert_eq!(parse_ttl_hours(Some(" 8 ")).unwrap(), 8 * 3600);
        assert!(parse_ttl_hours(Some("0")).is_err());
        assert!(parse_ttl_hours(Some("forever")).is_err());
    }
}
