//! A set of distinct, case-sensitive skill names.
//!
//! Insertion order is kept so matched/missing skills render in the order a
//! recruiter declared them, but equality is set equality. No normalization is
//! applied: `"React"` and `"react"` are different skills.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkillSetError {
    #[error("duplicate skill '{0}'")]
    Duplicate(String),

    #[error("skill names cannot be blank")]
    Blank,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct SkillSet {
    skills: Vec<String>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict constructor for untrusted input (request bodies, job forms).
    /// Rejects duplicates and blank names instead of silently fixing them.
    pub fn try_from_vec(skills: Vec<String>) -> Result<Self, SkillSetError> {
        let mut seen = HashSet::with_capacity(skills.len());
        for skill in &skills {
            if skill.trim().is_empty() {
                return Err(SkillSetError::Blank);
            }
            if !seen.insert(skill.as_str()) {
                return Err(SkillSetError::Duplicate(skill.clone()));
            }
        }
        Ok(Self { skills })
    }

    /// Parses a comma-separated skill list, trimming each entry.
    pub fn parse_csv(raw: &str) -> Result<Self, SkillSetError> {
        let skills = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        Self::try_from_vec(skills)
    }

    /// Adds a skill. Returns false if it was already present.
    pub fn insert(&mut self, skill: impl Into<String>) -> bool {
        let skill = skill.into();
        if self.contains(&skill) {
            return false;
        }
        self.skills.push(skill);
        true
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(String::as_str)
    }

    pub fn union(&self, other: &SkillSet) -> SkillSet {
        let mut merged = self.clone();
        for skill in other.iter() {
            merged.insert(skill);
        }
        merged
    }

    pub fn intersection(&self, other: &SkillSet) -> SkillSet {
        self.iter().filter(|s| other.contains(s)).collect()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.skills
    }
}

impl PartialEq for SkillSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|s| other.contains(s))
    }
}

impl Eq for SkillSet {}

/// Lenient collection: duplicates are dropped, first occurrence wins.
/// Used for trusted sources such as extractor output and stored rows.
impl<S: Into<String>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for skill in iter {
            set.insert(skill);
        }
        set
    }
}

impl TryFrom<Vec<String>> for SkillSet {
    type Error = SkillSetError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::try_from_vec(value)
    }
}

impl From<SkillSet> for Vec<String> {
    fn from(value: SkillSet) -> Self {
        value.skills
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_vec_rejects_duplicates() {
        let err = SkillSet::try_from_vec(vec!["Rust".into(), "Go".into(), "Rust".into()])
            .unwrap_err();
        assert_eq!(err, SkillSetError::Duplicate("Rust".to_string()));
    }

    #[test]
    fn test_try_from_vec_rejects_blank() {
        let err = SkillSet::try_from_vec(vec!["Rust".into(), "  ".into()]).unwrap_err();
        assert_eq!(err, SkillSetError::Blank);
    }

    #[test]
    fn test_case_variants_are_distinct_skills() {
        let set = SkillSet::try_from_vec(vec!["React".into(), "react".into()]).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("React"));
        assert!(!set.contains("REACT"));
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: SkillSet = ["Figma", "Adobe XD"].into_iter().collect();
        let b: SkillSet = ["Adobe XD", "Figma"].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_iter_dedups_keeping_first() {
        let set: SkillSet = ["SQL", "Java", "SQL"].into_iter().collect();
        assert_eq!(set.as_slice(), &["SQL".to_string(), "Java".to_string()]);
    }

    #[test]
    fn test_parse_csv_trims_entries() {
        let set = SkillSet::parse_csv(" JavaScript, React ,Node.js,, ").unwrap();
        assert_eq!(
            set.as_slice(),
            &[
                "JavaScript".to_string(),
                "React".to_string(),
                "Node.js".to_string()
            ]
        );
    }

    #[test]
    fn test_deserialize_rejects_duplicate_entries() {
        let result: Result<SkillSet, _> = serde_json::from_str(r#"["Go", "Go"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let set: SkillSet = ["Kafka", "Rust"].into_iter().collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["Kafka","Rust"]"#);
    }

    #[test]
    fn test_union_and_intersection() {
        let a: SkillSet = ["Rust", "Go"].into_iter().collect();
        let b: SkillSet = ["Go", "Python"].into_iter().collect();
        assert_eq!(a.union(&b).len(), 3);
        assert_eq!(a.intersection(&b).as_slice(), &["Go".to_string()]);
        let c: SkillSet = ["Kafka"].into_iter().collect();
        assert!(a.intersection(&c).is_empty());
    }
}
