use anyhow::Result;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use std::pin::Pin;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Trait for object store implementations
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store the stream's content under `key`. An existing object with the
    /// same key is silently overwritten.
    async fn put_object(&self, key: &str, reader: Pin<Box<dyn AsyncRead + Send>>) -> Result<()>;

    /// Check if the store is reachable/healthy
    async fn health_check(&self) -> bool;
}

/// S3-backed object store writing into a fixed bucket
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(client: Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait::async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(&self, key: &str, mut reader: Pin<Box<dyn AsyncRead + Send>>) -> Result<()> {
        // Uploads are capped by the request body limit, so buffering the
        // stream before the PUT is acceptable here.
        let mut data = Vec::new();
        reader.read_to_end(&mut data).await?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .send()
            .await?;
        Ok(())
    }

    async fn health_check(&self) -> bool {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok()
    }
}

/// In-memory object store for development/testing
#[derive(Default)]
pub struct InMemoryObjectStore {
    objects: std::sync::Mutex<std::collections::HashMap<String, Bytes>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put_object(&self, key: &str, mut reader: Pin<Box<dyn AsyncRead + Send>>) -> Result<()> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data).await?;
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), Bytes::from(data));
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Object store that fails every upload (for testing failure paths)
pub struct FailingObjectStore;

#[async_trait::async_trait]
impl ObjectStore for FailingObjectStore {
    async fn put_object(&self, key: &str, _reader: Pin<Box<dyn AsyncRead + Send>>) -> Result<()> {
        Err(anyhow::anyhow!("simulated transport fault storing '{}'", key))
    }

    async fn health_check(&self) -> bool {
        false
    }
}
