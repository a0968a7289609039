//! Partitions a job's required skills into matched and missing against a
//! candidate's extracted skills and scores the overlap as a whole percentage.
//!
//! Pure and synchronous. Comparison is exact string equality.

use serde::{Deserialize, Serialize};

use crate::matching::skill_set::SkillSet;

/// Score reported when a job declares no required skills: every requirement
/// (of which there are none) is satisfied.
pub const EMPTY_REQUIREMENTS_PERCENTAGE: u8 = 100;

/// The part of a job the matcher looks at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequirements {
    pub title: String,
    pub required_skills: SkillSet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub job_title: String,
    pub match_percentage: u8, // 0 – 100
    pub matched_skills: SkillSet,
    pub missing_skills: SkillSet,
}

pub fn compute_match(candidate_skills: &SkillSet, job: &JobRequirements) -> MatchResult {
    let matched_skills = job.required_skills.intersection(candidate_skills);
    let missing_skills: SkillSet = job
        .required_skills
        .iter()
        .filter(|skill| !matched_skills.contains(skill))
        .collect();

    MatchResult {
        job_title: job.title.clone(),
        match_percentage: match_percentage(matched_skills.len(), job.required_skills.len()),
        matched_skills,
        missing_skills,
    }
}

/// One result per job, in the order the jobs were given.
pub fn compute_matches_for_all_jobs(
    candidate_skills: &SkillSet,
    jobs: &[JobRequirements],
) -> Vec<MatchResult> {
    jobs.iter()
        .map(|job| compute_match(candidate_skills, job))
        .collect()
}

/// round(100 * matched / required), half rounds up. Integer-only so 0.5
/// boundaries (e.g. 1/8 = 12.5) never wobble on float error.
fn match_percentage(matched: usize, required: usize) -> u8 {
    if required == 0 {
        return EMPTY_REQUIREMENTS_PERCENTAGE;
    }
    let pct = (200 * matched + required) / (2 * required);
    pct.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(items: &[&str]) -> SkillSet {
        items.iter().copied().collect()
    }

    fn job(title: &str, required: &[&str]) -> JobRequirements {
        JobRequirements {
            title: title.to_string(),
            required_skills: skills(required),
        }
    }

    fn software_engineer() -> JobRequirements {
        job(
            "Software Engineer",
            &["JavaScript", "React", "Node.js", "TypeScript", "MongoDB"],
        )
    }

    #[test]
    fn test_frontend_candidate_against_fullstack_job_is_60() {
        let candidate = skills(&["JavaScript", "React", "TypeScript", "HTML", "CSS"]);
        let result = compute_match(&candidate, &software_engineer());

        assert_eq!(result.job_title, "Software Engineer");
        assert_eq!(result.match_percentage, 60);
        assert_eq!(
            result.matched_skills,
            skills(&["JavaScript", "React", "TypeScript"])
        );
        assert_eq!(result.missing_skills, skills(&["Node.js", "MongoDB"]));
    }

    #[test]
    fn test_matched_and_missing_keep_job_order() {
        let candidate = skills(&["TypeScript", "JavaScript"]);
        let result = compute_match(&candidate, &software_engineer());
        assert_eq!(
            result.matched_skills.as_slice(),
            &["JavaScript".to_string(), "TypeScript".to_string()]
        );
        assert_eq!(
            result.missing_skills.as_slice(),
            &[
                "React".to_string(),
                "Node.js".to_string(),
                "MongoDB".to_string()
            ]
        );
    }

    #[test]
    fn test_empty_candidate_scores_zero() {
        let result = compute_match(&SkillSet::new(), &job("UI/UX Designer", &["Figma", "Adobe XD"]));
        assert_eq!(result.match_percentage, 0);
        assert!(result.matched_skills.is_empty());
        assert_eq!(result.missing_skills, skills(&["Figma", "Adobe XD"]));
    }

    #[test]
    fn test_empty_requirements_is_vacuous_full_match() {
        let result = compute_match(&skills(&["Python"]), &job("Generalist", &[]));
        assert_eq!(result.match_percentage, EMPTY_REQUIREMENTS_PERCENTAGE);
        assert_eq!(result.match_percentage, 100);
        assert!(result.matched_skills.is_empty());
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_case_differences_do_not_match() {
        let result = compute_match(&skills(&["react"]), &job("Frontend", &["React"]));
        assert_eq!(result.match_percentage, 0);
        assert_eq!(result.missing_skills, skills(&["React"]));
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 1/8 = 12.5 → 13, 1/3 = 33.3 → 33, 2/3 = 66.7 → 67
        assert_eq!(match_percentage(1, 8), 13);
        assert_eq!(match_percentage(1, 3), 33);
        assert_eq!(match_percentage(2, 3), 67);
        assert_eq!(match_percentage(3, 3), 100);
    }

    #[test]
    fn test_partition_invariant_holds() {
        let candidates = [
            skills(&[]),
            skills(&["MongoDB"]),
            skills(&["JavaScript", "Go", "Node.js"]),
            skills(&["JavaScript", "React", "Node.js", "TypeScript", "MongoDB", "Rust"]),
        ];
        let job = software_engineer();

        for candidate in &candidates {
            let result = compute_match(candidate, &job);
            assert!(result
                .matched_skills
                .intersection(&result.missing_skills)
                .is_empty());
            assert_eq!(
                result.matched_skills.union(&result.missing_skills),
                job.required_skills
            );
            assert!(result.match_percentage <= 100);
        }
    }

    #[test]
    fn test_adding_a_skill_never_lowers_score() {
        let job = software_engineer();
        let mut candidate = SkillSet::new();
        let mut previous = compute_match(&candidate, &job).match_percentage;

        for extra in ["HTML", "React", "React", "Node.js", "CSS", "MongoDB"] {
            candidate.insert(extra);
            let current = compute_match(&candidate, &job).match_percentage;
            assert!(current >= previous, "{current} < {previous} after adding {extra}");
            previous = current;
        }
    }

    #[test]
    fn test_compute_match_is_idempotent() {
        let candidate = skills(&["React", "Figma"]);
        let job = software_engineer();
        assert_eq!(compute_match(&candidate, &job), compute_match(&candidate, &job));
    }

    #[test]
    fn test_all_jobs_preserves_input_order() {
        let jobs = vec![
            job("UI Designer", &["Figma", "Adobe XD"]),
            job("Backend Dev", &["Rust", "PostgreSQL"]),
        ];
        let results = compute_matches_for_all_jobs(&skills(&["Rust"]), &jobs);

        let titles: Vec<_> = results.iter().map(|r| r.job_title.as_str()).collect();
        assert_eq!(titles, vec!["UI Designer", "Backend Dev"]);
        assert_eq!(results[0].match_percentage, 0);
        assert_eq!(results[1].match_percentage, 50);
    }

    #[test]
    fn test_all_jobs_with_no_jobs_is_empty() {
        assert!(compute_matches_for_all_jobs(&skills(&["Rust"]), &[]).is_empty());
    }
}
