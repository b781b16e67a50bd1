use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::{auth::repo_types::User, bmi::repo_types::BmiRecord};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    records: Vec<BmiRecord>,
    next_record_id: i64,
}

/// In-process store used by the router tests.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record with an explicit timestamp.
    pub fn insert_record_at(
        &self,
        user_id: Uuid,
        height: f64,
        weight: f64,
        bmi: f64,
        created_at: OffsetDateTime,
    ) -> BmiRecord {
        let mut t = self.tables.lock().unwrap();
        t.next_record_id += 1;
        let record = BmiRecord {
            id: t.next_record_id,
            user_id,
            height,
            weight,
            bmi,
            created_at,
        };
        t.records.push(record.clone());
        record
    }

    pub fn user_count(&self, email: &str) -> usize {
        let t = self.tables.lock().unwrap();
        t.users.iter().filter(|u| u.email == email).count()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(
        &self,
        full_name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        let mut t = self.tables.lock().unwrap();
        if t.users.iter().any(|u| u.email == email) {
            return Err(StoreError::Conflict);
        }
        let user = User {
            id: Uuid::new_v4(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let t = self.tables.lock().unwrap();
        Ok(t.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let t = self.tables.lock().unwrap();
        Ok(t.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create_bmi_record(
        &self,
        user_id: Uuid,
        height: f64,
        weight: f64,
        bmi: f64,
    ) -> Result<BmiRecord, StoreError> {
        Ok(self.insert_record_at(user_id, height, weight, bmi, OffsetDateTime::now_utc()))
    }

    async fn latest_bmi_record(&self, user_id: Uuid) -> Result<Option<BmiRecord>, StoreError> {
        Ok(self.bmi_history(user_id).await?.pop())
    }

    async fn bmi_history(&self, user_id: Uuid) -> Result<Vec<BmiRecord>, StoreError> {
        let t = self.tables.lock().unwrap();
        let mut rows: Vec<BmiRecord> = t
            .records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|r| (r.created_at, r.id));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use time::Duration;

    use super::*;

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let store = MemoryStore::new();
        store.create_user("Ada", "ada@example.com", "h").await.unwrap();
        let err = store
            .create_user("Ada 2", "ada@example.com", "h")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict));
        assert_eq!(store.user_count("ada@example.com"), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_duplicate_registrations_keep_one_row() {
        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .create_user(&format!("User {i}"), "race@example.com", "h")
                    .await
            }));
        }
        let mut ok = 0;
        let mut conflicts = 0;
        for h in handles {
            match h.await.unwrap() {
                Ok(_) => ok += 1,
                Err(StoreError::Conflict) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(conflicts, 15);
        assert_eq!(store.user_count("race@example.com"), 1);
    }

    #[tokio::test]
    async fn history_is_ordered_by_creation_time() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let now = OffsetDateTime::now_utc();
        store.insert_record_at(user, 170.0, 80.0, 27.7, now);
        store.insert_record_at(user, 170.0, 60.0, 20.8, now - Duration::days(2));
        store.insert_record_at(user, 170.0, 70.0, 24.2, now - Duration::days(1));
        store.insert_record_at(Uuid::new_v4(), 170.0, 90.0, 31.1, now);

        let history = store.bmi_history(user).await.unwrap();
        let bmis: Vec<f64> = history.iter().map(|r| r.bmi).collect();
        assert_eq!(bmis, vec![20.8, 24.2, 27.7]);

        let latest = store.latest_bmi_record(user).await.unwrap().unwrap();
        assert_eq!(latest.bmi, 27.7);
    }

    #[tokio::test]
    async fn empty_history_and_no_latest() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        assert!(store.bmi_history(user).await.unwrap().is_empty());
        assert!(store.latest_bmi_record(user).await.unwrap().is_none());
    }
}
