//! Store doubles shared by the unit tests.

use std::sync::atomic::{AtomicBool, Ordering};

use agrifeed_store::{InMemoryKvStore, KeyValueStore, StoreError, StoreResult};
use async_trait::async_trait;

/// In-memory store whose reads and writes can be made to fail on demand.
#[derive(Debug, Default)]
pub(crate) struct FlakyStore {
    pub inner: InMemoryKvStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check(&self, flag: &AtomicBool) -> StoreResult<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::other("injected failure")));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.check(&self.fail_reads)?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.check(&self.fail_writes)?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.check(&self.fail_writes)?;
        self.inner.remove(key).await
    }

    async fn list_keys(&self) -> StoreResult<Vec<String>> {
        self.check(&self.fail_reads)?;
        self.inner.list_keys().await
    }
}
