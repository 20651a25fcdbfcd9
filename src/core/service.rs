use crate::core::counter::RegionCounter;
use crate::core::locks::ResourceLocks;
use crate::domain::model::CountResult;
use crate::domain::ports::DocumentSource;
use crate::utils::error::{CounterError, Result};
use std::sync::Arc;
use std::time::Instant;

/// Counts one document per request, holding its resource lock throughout.
pub struct CountService {
    counter: Arc<RegionCounter>,
    document: Arc<dyn DocumentSource>,
    locks: ResourceLocks,
    goal: u64,
}

impl CountService {
    pub fn new(
        counter: Arc<RegionCounter>,
        document: Arc<dyn DocumentSource>,
        locks: ResourceLocks,
        goal: u64,
    ) -> Self {
        Self {
            counter,
            document,
            locks,
            goal,
        }
    }

    pub fn goal(&self) -> u64 {
        self.goal
    }

    /// Opens, counts and closes the document while its lock is held.
    ///
    /// The scan runs on the blocking pool. Failures are returned as-is; nothing is retried.
    pub async fn count(&self) -> Result<CountResult> {
        let key = self.document.resource_key();
        let guard = self.locks.acquire(&key).await;

        let counter = Arc::clone(&self.counter);
        let document = Arc::clone(&self.document);
        let started = Instant::now();

        let length = tokio::task::spawn_blocking(move || {
            let _guard = guard;
            let reader = document.open()?;
            counter.count(reader)
        })
        .await
        .map_err(|e| CounterError::ServerError {
            message: format!("counting task failed: {}", e),
        })??;

        tracing::debug!(
            resource = %key,
            length,
            elapsed = ?started.elapsed(),
            "document counted"
        );

        Ok(CountResult {
            length,
            goal: self.goal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    struct StaticDocument(&'static str);

    impl DocumentSource for StaticDocument {
        fn resource_key(&self) -> String {
            "static".to_string()
        }

        fn open(&self) -> Result<Box<dyn Read + Send>> {
            Ok(Box::new(Cursor::new(self.0.as_bytes())))
        }
    }

    struct MissingDocument;

    impl DocumentSource for MissingDocument {
        fn resource_key(&self) -> String {
            "missing".to_string()
        }

        fn open(&self) -> Result<Box<dyn Read + Send>> {
            Err(std::io::Error::from(std::io::ErrorKind::NotFound).into())
        }
    }

    fn service(document: Arc<dyn DocumentSource>, goal: u64) -> CountService {
        CountService::new(
            Arc::new(RegionCounter::default()),
            document,
            ResourceLocks::new(),
            goal,
        )
    }

    #[tokio::test]
    async fn test_count_echoes_goal() {
        let doc = Arc::new(StaticDocument("<<<<<START\nabc\n>>>>>END\n"));
        let result = service(doc, 2000).count().await.unwrap();
        assert_eq!(result, CountResult { length: 3, goal: 2000 });
    }

    #[tokio::test]
    async fn test_open_failure_is_reported() {
        let result = service(Arc::new(MissingDocument), 0).count().await;
        assert!(matches!(result, Err(CounterError::IoError(_))));
    }

    #[tokio::test]
    async fn test_lock_released_after_count() {
        let locks = ResourceLocks::new();
        let service = CountService::new(
            Arc::new(RegionCounter::default()),
            Arc::new(StaticDocument("")),
            locks.clone(),
            0,
        );

        service.count().await.unwrap();
        assert!(locks.lock_for("static").try_lock().is_ok());
    }
}
