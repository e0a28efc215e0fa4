//! Saved learning plans, per user, in a single JSON file.
//!
//! The file maps user id to that user's plans in save order:
//! `{"<user id>": [LearningPlan, ...]}`. A missing file is an empty store.

use catalog::LearningPlan;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

type UserPlans = BTreeMap<String, Vec<LearningPlan>>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on plan store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("plan store {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode plans for {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("user id must not be empty")]
    EmptyUser,
}

/// Whether `save` added a plan or replaced one with the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Inserted,
    Updated,
}

/// File-backed store of saved plans.
#[derive(Debug, Clone)]
pub struct PlanStore {
    path: PathBuf,
}

impl PlanStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save `plan` for `user`, replacing any saved plan with the same id.
    pub fn save(&self, user: &str, plan: &LearningPlan) -> Result<SaveOutcome, StoreError> {
        let user = checked_user(user)?;
        let mut all = self.read_all()?;
        let plans = all.entry(user.to_string()).or_default();

        let outcome = match plans.iter_mut().find(|p| p.id == plan.id) {
            Some(existing) => {
                *existing = plan.clone();
                SaveOutcome::Updated
            }
            None => {
                plans.push(plan.clone());
                SaveOutcome::Inserted
            }
        };

        self.write_all(&all)?;
        tracing::info!("saved plan {} ({:?}) for user {}", plan.id, outcome, user);
        Ok(outcome)
    }

    /// All plans saved by `user`, in save order.
    pub fn list(&self, user: &str) -> Result<Vec<LearningPlan>, StoreError> {
        let user = checked_user(user)?;
        let mut all = self.read_all()?;
        Ok(all.remove(user).unwrap_or_default())
    }

    pub fn get(&self, user: &str, plan_id: &str) -> Result<Option<LearningPlan>, StoreError> {
        Ok(self.list(user)?.into_iter().find(|p| p.id == plan_id))
    }

    /// Delete one plan; returns false when it was not there.
    pub fn delete(&self, user: &str, plan_id: &str) -> Result<bool, StoreError> {
        let user = checked_user(user)?;
        let mut all = self.read_all()?;
        let Some(plans) = all.get_mut(user) else {
            return Ok(false);
        };

        let before = plans.len();
        plans.retain(|p| p.id != plan_id);
        if plans.len() == before {
            return Ok(false);
        }

        self.write_all(&all)?;
        tracing::info!("deleted plan {} for user {}", plan_id, user);
        Ok(true)
    }

    fn read_all(&self) -> Result<UserPlans, StoreError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(UserPlans::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if data.trim().is_empty() {
            return Ok(UserPlans::new());
        }
        serde_json::from_str(&data).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, all: &UserPlans) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(all).map_err(|source| StoreError::Encode {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(io_err)
    }
}

fn checked_user(user: &str) -> Result<&str, StoreError> {
    let user = user.trim();
    if user.is_empty() {
        Err(StoreError::EmptyUser)
    } else {
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{LearningPath, Level, PlanPaths};
    use chrono::{TimeZone, Utc};

    fn path(level: Level) -> LearningPath {
        LearningPath {
            level,
            description: format!("{level} path"),
            steps: vec!["step".to_string()],
            youtube: vec![],
            courses: vec![],
        }
    }

    fn plan(id: &str, topic: &str) -> LearningPlan {
        LearningPlan {
            id: id.to_string(),
            topic: topic.to_string(),
            paths: PlanPaths {
                beginner: path(Level::Beginner),
                intermediate: path(Level::Intermediate),
                advanced: path(Level::Advanced),
            },
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlanStore::new(dir.path().join("plans.json"));
        assert!(store.list("u1").unwrap().is_empty());
        assert!(!store.delete("u1", "x").unwrap());
    }

    #[test]
    fn test_save_insert_then_update() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlanStore::new(dir.path().join("nested").join("plans.json"));

        assert_eq!(store.save("u1", &plan("1", "rust")).unwrap(), SaveOutcome::Inserted);
        assert_eq!(store.save("u1", &plan("2", "go")).unwrap(), SaveOutcome::Inserted);
        assert_eq!(store.save("u1", &plan("1", "rust v2")).unwrap(), SaveOutcome::Updated);

        let plans = store.list("u1").unwrap();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].topic, "rust v2");
        assert_eq!(plans[1].topic, "go");

        assert_eq!(store.get("u1", "2").unwrap().unwrap().topic, "go");
        assert!(store.get("u1", "3").unwrap().is_none());
    }

    #[test]
    fn test_users_are_isolated_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlanStore::new(dir.path().join("plans.json"));

        store.save("alice", &plan("1", "rust")).unwrap();
        store.save("bob", &plan("1", "python")).unwrap();

        assert!(store.delete("alice", "1").unwrap());
        assert!(store.list("alice").unwrap().is_empty());
        assert_eq!(store.list("bob").unwrap()[0].topic, "python");
    }

    #[test]
    fn test_corrupt_file_and_empty_user() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plans.json");
        fs::write(&file, "not json").unwrap();

        let store = PlanStore::new(&file);
        assert!(matches!(store.list("u1"), Err(StoreError::Corrupt { .. })));
        assert!(matches!(store.save(" ", &plan("1", "x")), Err(StoreError::EmptyUser)));
    }

    #[test]
    fn test_encode_error_names_the_write() {
        let source = serde_json::from_str::<u8>("x").unwrap_err();
        let err = StoreError::Encode {
            path: PathBuf::from("plans.json"),
            source,
        };
        let message = err.to_string();
        assert!(message.starts_with("could not encode plans for plans.json"));
        assert!(!message.contains("corrupt"));
    }
}
