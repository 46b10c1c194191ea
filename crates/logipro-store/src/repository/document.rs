//! # Document Repository
//!
//! The per-user document tree the screens read and write.
//!
//! ## Paths
//! ```text
//! users / {uid} / data / {collection} / {id}
//!   │       │       │         │          │
//!   │       │       │         │          └── document id (uuid on insert)
//!   │       │       │         └── "carriers", "companies", "plannedJobs", ...
//!   │       │       └── fixed segment
//!   │       └── authenticated user id
//!   └── fixed segment
//! ```
//!
//! Each document is one row in `documents`, payload stored as JSON text.
//!
//! ## Operations
//! | Operation | Missing document        | Existing document        |
//! |-----------|-------------------------|--------------------------|
//! | `get`     | `Ok(None)`              | payload                  |
//! | `set`     | created                 | replaced                 |
//! | `update`  | `DbError::NotFound`     | top-level fields merged  |
//! | `remove`  | `Ok(false)`             | deleted, `Ok(true)`      |
//! | `transfer`| `DbError::NotFound`     | removed, target written  |

use chrono::Utc;
use serde_json::{Map, Value};
use sqlx::SqlitePool;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::{DbError, DbResult};

// =============================================================================
// Document Path
// =============================================================================

/// A validated `users/{uid}/data/{collection}/{id}` path.
///
/// ## Example
/// ```rust
/// use logipro_store::DocumentPath;
///
/// let path: DocumentPath = "users/u1/data/carriers/c1".parse().unwrap();
/// assert_eq!(path.collection(), "carriers");
/// assert_eq!(path.to_string(), "users/u1/data/carriers/c1");
///
/// assert!("users/u1/carriers/c1".parse::<DocumentPath>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    user_id: String,
    collection: String,
    doc_id: String,
}

impl DocumentPath {
    /// Builds a path from its variable segments.
    ///
    /// Segments must be non-empty and may not contain `/`.
    pub fn new(
        user_id: impl Into<String>,
        collection: impl Into<String>,
        doc_id: impl Into<String>,
    ) -> DbResult<Self> {
        let path = DocumentPath {
            user_id: user_id.into(),
            collection: collection.into(),
            doc_id: doc_id.into(),
        };

        for segment in [&path.user_id, &path.collection, &path.doc_id] {
            if segment.is_empty() || segment.contains('/') {
                return Err(DbError::InvalidPath(format!(
                    "invalid segment '{}' in {}",
                    segment, path
                )));
            }
        }

        Ok(path)
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn doc_id(&self) -> &str {
        &self.doc_id
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "users/{}/data/{}/{}",
            self.user_id, self.collection, self.doc_id
        )
    }
}

impl FromStr for DocumentPath {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split('/').collect::<Vec<_>>().as_slice() {
            ["users", user_id, "data", collection, doc_id] => {
                DocumentPath::new(*user_id, *collection, *doc_id)
            }
            _ => Err(DbError::InvalidPath(s.to_string())),
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    doc_id: String,
    payload: String,
}

/// Repository for raw JSON documents.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: SqlitePool,
}

impl DocumentRepository {
    /// Creates a new DocumentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DocumentRepository { pool }
    }

    /// Reads one document.
    pub async fn get(&self, path: &DocumentPath) -> DbResult<Option<Value>> {
        let payload: Option<String> =
            sqlx::query_scalar("SELECT payload FROM documents WHERE path = ?1")
                .bind(path.to_string())
                .fetch_optional(&self.pool)
                .await?;

        payload
            .map(|p| serde_json::from_str(&p).map_err(DbError::from))
            .transpose()
    }

    /// Creates or replaces a document.
    ///
    /// The payload must be a JSON object. Replacing keeps the original
    /// `created_at` and the document's position in [`list`](Self::list).
    pub async fn set(&self, path: &DocumentPath, payload: &Value) -> DbResult<()> {
        if !payload.is_object() {
            return Err(DbError::Serialization(format!(
                "document {} must be a JSON object",
                path
            )));
        }

        debug!(path = %path, "Setting document");

        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO documents (path, user_id, collection, doc_id, payload, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(path) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(path.to_string())
        .bind(path.user_id())
        .bind(path.collection())
        .bind(path.doc_id())
        .bind(serde_json::to_string(payload)?)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Merges `fields` into the top level of an existing document.
    ///
    /// ## Example
    /// ```text
    /// stored  { "name": "Ali", "phone": "532..." }
    /// fields  { "phone": "544..." }
    /// result  { "name": "Ali", "phone": "544..." }
    /// ```
    ///
    /// Returns the merged document, or [`DbError::NotFound`] if the path has
    /// never been written.
    pub async fn update(&self, path: &DocumentPath, fields: Map<String, Value>) -> DbResult<Value> {
        debug!(path = %path, fields = fields.len(), "Updating document");

        let key = path.to_string();
        let mut tx = self.pool.begin().await?;

        let payload: Option<String> =
            sqlx::query_scalar("SELECT payload FROM documents WHERE path = ?1")
                .bind(&key)
                .fetch_optional(&mut *tx)
                .await?;

        let payload = payload.ok_or_else(|| DbError::not_found("Document", key.clone()))?;

        let mut document = match serde_json::from_str::<Value>(&payload)? {
            Value::Object(map) => map,
            _ => {
                return Err(DbError::Serialization(format!(
                    "document {} is not a JSON object",
                    key
                )))
            }
        };
        document.extend(fields);
        let merged = Value::Object(document);

        sqlx::query("UPDATE documents SET payload = ?1, updated_at = ?2 WHERE path = ?3")
            .bind(serde_json::to_string(&merged)?)
            .bind(Utc::now())
            .bind(&key)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(merged)
    }

    /// Deletes a document. Returns `false` if it did not exist.
    pub async fn remove(&self, path: &DocumentPath) -> DbResult<bool> {
        debug!(path = %path, "Removing document");

        let result = sqlx::query("DELETE FROM documents WHERE path = ?1")
            .bind(path.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Removes `from` and writes `payload` at `to` in one transaction.
    ///
    /// Either both writes land or neither does. Fails with
    /// [`DbError::NotFound`] when `from` does not exist, leaving `to`
    /// untouched.
    pub async fn transfer(
        &self,
        from: &DocumentPath,
        to: &DocumentPath,
        payload: &Value,
    ) -> DbResult<()> {
        if !payload.is_object() {
            return Err(DbError::Serialization(format!(
                "document {} must be a JSON object",
                to
            )));
        }
        if from == to {
            return Err(DbError::InvalidPath(format!("cannot transfer {} onto itself", to)));
        }

        debug!(from = %from, to = %to, "Transferring document");

        let source = from.to_string();
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM documents WHERE path = ?1")
            .bind(&source)
            .execute(&mut *tx)
            .await?;
        if removed.rows_affected() == 0 {
            return Err(DbError::not_found("Document", source));
        }

        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO documents (path, user_id, collection, doc_id, payload, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(path) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(to.to_string())
        .bind(to.user_id())
        .bind(to.collection())
        .bind(to.doc_id())
        .bind(serde_json::to_string(payload)?)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Lists a collection as `(doc_id, payload)` pairs in insertion order.
    pub async fn list(&self, user_id: &str, collection: &str) -> DbResult<Vec<(String, Value)>> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT doc_id, payload
            FROM documents
            WHERE user_id = ?1 AND collection = ?2
            ORDER BY rowid
            "#,
        )
        .bind(user_id)
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        debug!(user_id, collection, count = rows.len(), "Listed documents");

        rows.into_iter()
            .map(|row| -> DbResult<(String, Value)> {
                Ok((row.doc_id, serde_json::from_str(&row.payload)?))
            })
            .collect()
    }

    /// Counts the documents in a collection.
    pub async fn count(&self, user_id: &str, collection: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM documents WHERE user_id = ?1 AND collection = ?2",
        )
        .bind(user_id)
        .bind(collection)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use serde_json::json;

    async fn repo() -> DocumentRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().documents()
    }

    fn path(id: &str) -> DocumentPath {
        DocumentPath::new("u1", "carriers", id).unwrap()
    }

    #[test]
    fn test_path_rejects_bad_segments() {
        assert!(DocumentPath::new("", "carriers", "c1").is_err());
        assert!(DocumentPath::new("u1", "car/riers", "c1").is_err());
        assert!("users/u1/data/carriers".parse::<DocumentPath>().is_err());
        assert!("accounts/u1/data/carriers/c1".parse::<DocumentPath>().is_err());
    }

    #[tokio::test]
    async fn test_set_get_remove() {
        let repo = repo().await;
        let p = path("c1");

        assert_eq!(repo.get(&p).await.unwrap(), None);

        repo.set(&p, &json!({ "name": "Ali" })).await.unwrap();
        assert_eq!(repo.get(&p).await.unwrap(), Some(json!({ "name": "Ali" })));

        repo.set(&p, &json!({ "name": "Veli" })).await.unwrap();
        assert_eq!(repo.get(&p).await.unwrap(), Some(json!({ "name": "Veli" })));

        assert!(repo.remove(&p).await.unwrap());
        assert!(!repo.remove(&p).await.unwrap());
        assert_eq!(repo.get(&p).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_merges_top_level_fields() {
        let repo = repo().await;
        let p = path("c1");
        repo.set(&p, &json!({ "name": "Ali", "phone": "5321234567" }))
            .await
            .unwrap();

        let mut fields = Map::new();
        fields.insert("phone".to_string(), json!("5441234567"));
        fields.insert("plate".to_string(), json!("34 ABC 123"));

        let merged = repo.update(&p, fields).await.unwrap();
        assert_eq!(
            merged,
            json!({ "name": "Ali", "phone": "5441234567", "plate": "34 ABC 123" })
        );
        assert_eq!(repo.get(&p).await.unwrap(), Some(merged));
    }

    #[tokio::test]
    async fn test_update_missing_document_is_not_found() {
        let repo = repo().await;

        let err = repo.update(&path("nope"), Map::new()).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_is_scoped_and_ordered() {
        let repo = repo().await;

        for id in ["c3", "c1", "c2"] {
            repo.set(&path(id), &json!({ "id": id })).await.unwrap();
        }
        let other_user = DocumentPath::new("u2", "carriers", "x").unwrap();
        repo.set(&other_user, &json!({})).await.unwrap();
        let other_collection = DocumentPath::new("u1", "companies", "y").unwrap();
        repo.set(&other_collection, &json!({})).await.unwrap();

        // Replacing does not move a document.
        repo.set(&path("c3"), &json!({ "id": "c3", "v": 2 })).await.unwrap();

        let ids: Vec<_> = repo
            .list("u1", "carriers")
            .await
            .unwrap()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec!["c3", "c1", "c2"]);
        assert_eq!(repo.count("u1", "carriers").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_set_rejects_non_objects() {
        let repo = repo().await;
        let err = repo.set(&path("c1"), &json!([1, 2])).await.unwrap_err();
        assert!(matches!(err, DbError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_transfer_moves_document() {
        let repo = repo().await;
        let from = DocumentPath::new("u1", "plannedJobs", "p1").unwrap();
        let to = DocumentPath::new("u1", "completedJobs", "d1").unwrap();
        repo.set(&from, &json!({ "cargoType": "Mermer" })).await.unwrap();

        repo.transfer(&from, &to, &json!({ "cargoType": "Mermer", "carrierId": "c1" }))
            .await
            .unwrap();

        assert_eq!(repo.get(&from).await.unwrap(), None);
        assert_eq!(
            repo.get(&to).await.unwrap(),
            Some(json!({ "cargoType": "Mermer", "carrierId": "c1" }))
        );
    }

    #[tokio::test]
    async fn test_transfer_without_source_writes_nothing() {
        let repo = repo().await;
        let from = DocumentPath::new("u1", "plannedJobs", "p1").unwrap();
        let to = DocumentPath::new("u1", "completedJobs", "d1").unwrap();

        let err = repo.transfer(&from, &to, &json!({})).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
        assert_eq!(repo.get(&to).await.unwrap(), None);
        assert_eq!(repo.count("u1", "completedJobs").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_failed_transfer_keeps_source() {
        let repo = repo().await;
        let from = DocumentPath::new("u1", "plannedJobs", "p1").unwrap();
        let to = DocumentPath::new("u1", "completedJobs", "d1").unwrap();
        repo.set(&from, &json!({ "cargoType": "Mermer" })).await.unwrap();

        // The target insert fails after the delete ran inside the transaction.
        sqlx::query(
            "CREATE TRIGGER reject_completed BEFORE INSERT ON documents \
             WHEN NEW.collection = 'completedJobs' BEGIN SELECT RAISE(ABORT, 'rejected'); END",
        )
        .execute(&repo.pool)
        .await
        .unwrap();

        let err = repo.transfer(&from, &to, &json!({})).await.unwrap_err();
        assert!(matches!(err, DbError::QueryFailed(_)));
        assert_eq!(repo.get(&from).await.unwrap(), Some(json!({ "cargoType": "Mermer" })));
        assert_eq!(repo.get(&to).await.unwrap(), None);
    }
}
