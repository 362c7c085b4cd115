//! Media storage adapter.
//!
//! Pet and report photos live in object storage behind the [`MediaStore`]
//! trait: upload returns a public URL plus a storage reference id
//! (`public_id`) used later for deletion. Production uses S3; the in-memory
//! implementation backs local development and tests.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;
use uuid::Uuid;

/// A stored media object: where it is served from and how to delete it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    pub url: String,
    pub public_id: String,
}

/// Errors surfaced by media storage backends.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Upload failed: {0}")]
    Upload(String),
    #[error("Delete failed: {0}")]
    Delete(String),
}

/// Object-storage interface for photo uploads and deletions.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store `bytes` and return its public URL and storage reference id.
    async fn upload(&self, bytes: Vec<u8>, content_type: &str) -> Result<StoredMedia, MediaError>;

    /// Delete a previously uploaded object by its storage reference id.
    /// Deleting an unknown id is not an error.
    async fn delete(&self, public_id: &str) -> Result<(), MediaError>;
}

/// S3-backed media store.
pub struct S3MediaStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3MediaStore {
    /// Build a store from the ambient AWS configuration.
    pub async fn from_env(bucket: String, public_base_url: String) -> Self {
        let aws_config = aws_config::load_from_env().await;
        Self {
            client: aws_sdk_s3::Client::new(&aws_config),
            bucket,
            public_base_url,
        }
    }
}

#[async_trait]
impl MediaStore for S3MediaStore {
    async fn upload(&self, bytes: Vec<u8>, content_type: &str) -> Result<StoredMedia, MediaError> {
        let extension = match content_type {
            "image/png" => "png",
            "image/webp" => "webp",
            _ => "jpg",
        };
        let public_id = format!("photos/{}.{extension}", Uuid::new_v4());

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&public_id)
            .content_type(content_type)
            .body(bytes.into())
            .send()
            .await
            .map_err(|e| MediaError::Upload(e.to_string()))?;

        Ok(StoredMedia {
            url: format!("{}/{public_id}", self.public_base_url),
            public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), MediaError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(public_id)
            .send()
            .await
            .map_err(|e| MediaError::Delete(e.to_string()))?;
        Ok(())
    }
}

/// In-memory media store for local development and tests. Remembers only
/// the ids it has issued.
#[derive(Default)]
pub struct InMemoryMediaStore {
    public_base_url: String,
    stored: Mutex<HashSet<String>>,
}

impl InMemoryMediaStore {
    pub fn new(public_base_url: String) -> Self {
        Self {
            public_base_url,
            stored: Mutex::new(HashSet::new()),
        }
    }

    /// Number of objects currently held. Used by tests to observe cascaded
    /// deletions.
    pub fn object_count(&self) -> usize {
        self.stored.lock().expect("media store lock poisoned").len()
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn upload(&self, _bytes: Vec<u8>, content_type: &str) -> Result<StoredMedia, MediaError> {
        let extension = match content_type {
            "image/png" => "png",
            "image/webp" => "webp",
            _ => "jpg",
        };
        let public_id = format!("photos/{}.{extension}", Uuid::new_v4());
        self.stored
            .lock()
            .expect("media store lock poisoned")
            .insert(public_id.clone());
        Ok(StoredMedia {
            url: format!("{}/{public_id}", self.public_base_url),
            public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), MediaError> {
        self.stored
            .lock()
            .expect("media store lock poisoned")
            .remove(public_id);
        Ok(())
    }
}
