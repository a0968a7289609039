//! Runs text extraction, skill extraction and matching for each uploaded
//! resume.
//!
//! Files are processed concurrently (one tokio task each) but reported in the
//! order they were submitted. A file that fails, or whose task panics, gets a
//! `Failed` outcome; its siblings are unaffected.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::matching::{compute_matches_for_all_jobs, JobRequirements, MatchResult, SkillSet};
use crate::screening::document::{extract_text, ResumeFile};
use crate::screening::extractor::{ExtractionError, SkillExtractor};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScreeningOutcome {
    Screened {
        extracted_skills: SkillSet,
        matches: Vec<MatchResult>,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeScreening {
    pub file_name: String,
    #[serde(flatten)]
    pub outcome: ScreeningOutcome,
}

impl ResumeScreening {
    pub fn is_screened(&self) -> bool {
        matches!(self.outcome, ScreeningOutcome::Screened { .. })
    }

    /// Demotes a screened file whose later steps (storage) did not succeed.
    pub fn mark_failed(&mut self, error: impl Into<String>) {
        self.outcome = ScreeningOutcome::Failed {
            error: error.into(),
        };
    }
}

/// Union of every job's required skills, in job order. Handed to extractors
/// as hints.
pub fn requirement_hints(jobs: &[JobRequirements]) -> SkillSet {
    jobs.iter()
        .fold(SkillSet::new(), |acc, job| acc.union(&job.required_skills))
}

async fn screen_one(
    extractor: &dyn SkillExtractor,
    file: &ResumeFile,
    jobs: &[JobRequirements],
    hints: &SkillSet,
) -> Result<(SkillSet, Vec<MatchResult>), ExtractionError> {
    let text = extract_text(file).await?;
    let extracted = extractor.extract_skills(&text, hints).await?;
    let matches = compute_matches_for_all_jobs(&extracted, jobs);
    Ok((extracted, matches))
}

pub async fn screen_resumes(
    extractor: Arc<dyn SkillExtractor>,
    files: Vec<ResumeFile>,
    jobs: Arc<Vec<JobRequirements>>,
) -> Vec<ResumeScreening> {
    let hints = Arc::new(requirement_hints(&jobs));
    info!(
        "Screening {} resume(s) against {} job(s) with '{}' extractor",
        files.len(),
        jobs.len(),
        extractor.backend()
    );

    let mut tasks = Vec::with_capacity(files.len());
    for file in files {
        let file_name = file.file_name.clone();
        let extractor = Arc::clone(&extractor);
        let jobs = Arc::clone(&jobs);
        let hints = Arc::clone(&hints);
        let handle = tokio::spawn(async move {
            screen_one(extractor.as_ref(), &file, &jobs, &hints).await
        });
        tasks.push((file_name, handle));
    }

    // Await in submission order; completion order does not matter.
    let mut results = Vec::with_capacity(tasks.len());
    for (file_name, handle) in tasks {
        let outcome = match handle.await {
            Ok(Ok((extracted_skills, matches))) => ScreeningOutcome::Screened {
                extracted_skills,
                matches,
            },
            Ok(Err(e)) => {
                warn!(file = %file_name, "Resume could not be screened: {e}");
                ScreeningOutcome::Failed {
                    error: e.to_string(),
                }
            }
            Err(join_err) => {
                warn!(file = %file_name, "Screening task aborted: {join_err}");
                ScreeningOutcome::Failed {
                    error: ExtractionError::Task(join_err.to_string()).to_string(),
                }
            }
        };
        results.push(ResumeScreening { file_name, outcome });
    }

    let screened = results.iter().filter(|r| r.is_screened()).count();
    info!("Screening finished: {screened}/{} succeeded", results.len());
    results
}
