//! # Typed Collections
//!
//! [`Collection<T>`] wraps the raw [`DocumentRepository`] for one entity type
//! in one user's tree, so commands work with `Carrier` rather than JSON.
//!
//! ```text
//! db.collection::<Carrier>("u1")
//!        │
//!        ▼
//! users/u1/data/carriers/{id}   (Carrier::COLLECTION)
//! ```

use serde_json::{Map, Value};
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, warn};
use uuid::Uuid;

use logipro_core::Document;

use crate::error::{DbError, DbResult};
use crate::repository::document::{DocumentPath, DocumentRepository};

/// A typed view of `users/{uid}/data/{T::COLLECTION}`.
pub struct Collection<T> {
    docs: DocumentRepository,
    user_id: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Collection {
            docs: self.docs.clone(),
            user_id: self.user_id.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Document> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("user_id", &self.user_id)
            .field("collection", &T::COLLECTION)
            .finish()
    }
}

impl<T: Document> Collection<T> {
    pub fn new(docs: DocumentRepository, user_id: impl Into<String>) -> Self {
        Collection {
            docs,
            user_id: user_id.into(),
            _marker: PhantomData,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    fn path(&self, id: &str) -> DbResult<DocumentPath> {
        DocumentPath::new(self.user_id.as_str(), T::COLLECTION, id)
    }

    /// The stored id is authoritative over any `id` field in the payload.
    fn decode(id: String, payload: Value) -> DbResult<T> {
        let mut item: T = serde_json::from_value(payload)?;
        item.set_id(id);
        Ok(item)
    }

    /// Lists every document in insertion order.
    ///
    /// A document that no longer deserializes fails the whole listing with
    /// [`DbError::Serialization`].
    pub async fn list(&self) -> DbResult<Vec<T>> {
        let docs = self.docs.list(&self.user_id, T::COLLECTION).await?;

        docs.into_iter()
            .map(|(id, payload)| {
                Self::decode(id.clone(), payload).map_err(|e| {
                    warn!(collection = T::COLLECTION, id = %id, error = %e, "Unreadable document");
                    e
                })
            })
            .collect()
    }

    pub async fn get(&self, id: &str) -> DbResult<Option<T>> {
        match self.docs.get(&self.path(id)?).await? {
            Some(payload) => Self::decode(id.to_string(), payload).map(Some),
            None => Ok(None),
        }
    }

    /// Stores a new document, generating an id if the item has none.
    pub async fn insert(&self, mut item: T) -> DbResult<T> {
        if item.id().is_empty() {
            item.set_id(Uuid::new_v4().to_string());
        }

        let path = self.path(item.id())?;
        self.docs.set(&path, &serde_json::to_value(&item)?).await?;

        debug!(collection = T::COLLECTION, id = %item.id(), "Inserted document");
        Ok(item)
    }

    /// Stores `item` as a new document and removes document `source_id` of
    /// collection `S` in the same transaction.
    ///
    /// Fails with [`DbError::NotFound`] when the source is already gone, in
    /// which case nothing is written.
    pub async fn insert_replacing<S: Document>(&self, source_id: &str, mut item: T) -> DbResult<T> {
        if item.id().is_empty() {
            item.set_id(Uuid::new_v4().to_string());
        }

        let source = DocumentPath::new(self.user_id.as_str(), S::COLLECTION, source_id)?;
        let target = self.path(item.id())?;
        self.docs
            .transfer(&source, &target, &serde_json::to_value(&item)?)
            .await
            .map_err(|e| match e {
                DbError::NotFound { .. } => DbError::not_found(S::COLLECTION, source_id),
                other => other,
            })?;

        debug!(
            from = S::COLLECTION,
            to = T::COLLECTION,
            source_id,
            id = %item.id(),
            "Replaced document"
        );
        Ok(item)
    }

    /// Replaces an existing document.
    pub async fn update(&self, item: &T) -> DbResult<()> {
        let path = self.path(item.id())?;

        if self.docs.get(&path).await?.is_none() {
            return Err(DbError::not_found(T::COLLECTION, item.id()));
        }

        self.docs.set(&path, &serde_json::to_value(item)?).await
    }

    /// Merges top-level fields into an existing document and returns it.
    pub async fn patch(&self, id: &str, fields: Map<String, Value>) -> DbResult<T> {
        let merged = self.docs.update(&self.path(id)?, fields).await?;
        Self::decode(id.to_string(), merged)
    }

    /// Deletes a document. Returns `false` if it did not exist.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        self.docs.remove(&self.path(id)?).await
    }

    pub async fn count(&self) -> DbResult<i64> {
        self.docs.count(&self.user_id, T::COLLECTION).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
