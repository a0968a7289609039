// Skill matching core: SkillSet value type and the pure Matcher.

pub mod matcher;
pub mod skill_set;

pub use matcher::{compute_matches_for_all_jobs, JobRequirements, MatchResult};
pub use skill_set::{SkillSet, SkillSetError};
