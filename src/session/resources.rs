// ABOUTME: Per-resource FIFO queues so jobs touching the same external resource run one at a time
// Jobs on different resources still run concurrently

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    NetworkInterface,
    TorService,
    ProxychainsConfig,
    Anonsurf,
    Vpn,
    PackageManager,
    HistoryFiles,
}

impl Resource {
    pub const ALL: [Resource; 7] = [
        Resource::NetworkInterface,
        Resource::TorService,
        Resource::ProxychainsConfig,
        Resource::Anonsurf,
        Resource::Vpn,
        Resource::PackageManager,
        Resource::HistoryFiles,
    ];
}

/// tokio's Mutex hands the lock to waiters in arrival order, which makes each one a single-worker queue.
#[derive(Debug)]
pub struct ResourceQueues {
    queues: HashMap<Resource, Arc<Mutex<()>>>,
}

impl Default for ResourceQueues {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceQueues {
    pub fn new() -> Self {
        let queues = Resource::ALL
            .iter()
            .map(|resource| (*resource, Arc::new(Mutex::new(()))))
            .collect();
        Self { queues }
    }

    /// Wait for this job's turn on `resource`. The turn ends when the guard drops.
    pub async fn acquire(&self, resource: Resource) -> OwnedMutexGuard<()> {
        let queue = self
            .queues
            .get(&resource)
            .cloned()
            .unwrap_or_else(|| Arc::new(Mutex::new(())));
        let guard = queue.lock_owned().await;
        debug!("Acquired {:?}", resource);
        guard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_resource_runs_in_arrival_order() {
        let queues = Arc::new(ResourceQueues::new());
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));

        let first = queues.acquire(Resource::ProxychainsConfig).await;

        let mut handles = Vec::new();
        for i in 0..3 {
            let queues = queues.clone();
            let order = order.clone();
            handles.push(tokio::spawn(async move {
                let _turn = queues.acquire(Resource::ProxychainsConfig).await;
                order.lock().unwrap().push(i);
            }));
            // Give each task time to enqueue before the next one.
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        assert!(order.lock().unwrap().is_empty());
        drop(first);

        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_different_resources_do_not_block() {
        let queues = ResourceQueues::new();
        let _iface = queues.acquire(Resource::NetworkInterface).await;
        let tor = tokio::time::timeout(
            Duration::from_millis(100),
            queues.acquire(Resource::TorService),
        )
        .await;
        assert!(tor.is_ok());
    }
}
