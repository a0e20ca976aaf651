use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::models::StoredSurveyRecord;

/// Append-only NDJSON log of accepted survey records.
///
/// The file is opened for each write and closed when the write finishes, so
/// no handle outlives a request. Writers inside this process are serialized
/// by `write_lock`; other processes appending to the same file rely on the
/// filesystem's `O_APPEND` semantics for whole-line writes.
pub struct SurveyStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl SurveyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize `record` and append it as exactly one line.
    pub async fn append(&self, record: &StoredSurveyRecord) -> io::Result<()> {
        let mut line = serde_json::to_vec(record).map_err(io::Error::other)?;
        line.push(b'\n');

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("survey_store_test_{}", Uuid::now_v7().simple()))
            .join(name)
    }

    fn record(age: i64) -> StoredSurveyRecord {
        StoredSurveyRecord {
            email: crate::crypto::sha256_hex("a@b.com"),
            age,
            rating: None,
            comments: Some("line\nbreak".to_string()),
            received_at: Utc::now(),
            ip: "127.0.0.1".to_string(),
        }
    }

    #[tokio::test]
    async fn creates_parent_directory_and_appends_lines() {
        let path = temp_path("nested/survey.ndjson");
        let store = SurveyStore::new(&path);

        store.append(&record(30)).await.unwrap();
        store.append(&record(31)).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.ends_with('\n'));
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: StoredSurveyRecord = serde_json::from_str(lines[0]).unwrap();
        let second: StoredSurveyRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(first.age, 30);
        assert_eq!(second.age, 31);
        assert_eq!(first.comments.as_deref(), Some("line\nbreak"));

        let _ = std::fs::remove_dir_all(path.parent().unwrap().parent().unwrap());
    }

    #[tokio::test]
    async fn absent_optional_fields_are_omitted() {
        let path = temp_path("survey.ndjson");
        let store = SurveyStore::new(&path);
        store.append(&record(40)).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(contents.trim_end()).unwrap();
        assert!(value.get("rating").is_none());
        assert!(value["received_at"].is_string());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn concurrent_appends_produce_whole_lines() {
        let path = temp_path("survey.ndjson");
        let store = std::sync::Arc::new(SurveyStore::new(&path));

        let mut handles = Vec::new();
        for age in 13..63 {
            let store = store.clone();
            handles.push(tokio::spawn(async move { store.append(&record(age)).await }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut ages: Vec<i64> = contents
            .lines()
            .map(|l| serde_json::from_str::<StoredSurveyRecord>(l).unwrap().age)
            .collect();
        ages.sort_unstable();
        assert_eq!(ages, (13..63).collect::<Vec<_>>());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn write_failure_is_reported() {
        // A directory cannot be opened for appending.
        let dir = temp_path("");
        std::fs::create_dir_all(&dir).unwrap();
        let store = SurveyStore::new(&dir);

        assert!(store.append(&record(30)).await.is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
