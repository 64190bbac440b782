// File: src/platforms/manager.rs

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tracing::{debug, error, info};

use dashbot_common::models::BotInstanceInfo;

use crate::Error;
use crate::platforms::{BotConnection, BotConnector};

const BOT_ID_PREFIX: &str = "bot-";

struct BotInstance {
    seq: u64,
    name: String,
    prefix: String,
    connection: Arc<dyn BotConnection>,
}

/// BotInstanceManager starts and stops secondary bot connections at runtime.
/// Nothing is persisted; a restart begins with an empty map and `bot-1`.
pub struct BotInstanceManager {
    connector: Arc<dyn BotConnector>,
    instances: Arc<DashMap<String, BotInstance>>,
    next_seq: AtomicU64,
}

impl BotInstanceManager {
    pub fn new(connector: Arc<dyn BotConnector>) -> Self {
        Self {
            connector,
            instances: Arc::new(DashMap::new()),
            next_seq: AtomicU64::new(1),
        }
    }

    /// Builds a connection, registers it, and spawns its run loop in the background.
    /// Returns as soon as the task is launched; connect failures only show up in the
    /// log, after which the entry removes itself.
    pub fn start(&self, name: &str, token: &str, prefix: &str) -> Result<String, Error> {
        let token = token.trim();
        if token.is_empty() {
            return Err(Error::InvalidArgument("token must not be empty".into()));
        }

        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let id = format!("{BOT_ID_PREFIX}{seq}");
        let connection = self.connector.build(&id, token, prefix)?;

        self.instances.insert(
            id.clone(),
            BotInstance {
                seq,
                name: name.to_string(),
                prefix: prefix.to_string(),
                connection: Arc::clone(&connection),
            },
        );

        let instances = Arc::clone(&self.instances);
        let task_id = id.clone();
        tokio::spawn(async move {
            match connection.run().await {
                Ok(()) => info!("[{task_id}] Runtime ended."),
                Err(err) => error!("[{task_id}] connect error: {err:?}"),
            }
            // Already gone if stop() got here first.
            if instances.remove(&task_id).is_some() {
                debug!("[{task_id}] removed after its connection ended");
            }
        });

        info!("[{id}] started bot '{name}' with prefix '{prefix}'");
        Ok(id)
    }

    /// Removes the instance and asks its connection to close.
    pub fn stop(&self, id: &str) -> Result<(), Error> {
        let (_, instance) = self
            .instances
            .remove(id)
            .ok_or_else(|| Error::NotFound(format!("bot instance {id}")))?;
        instance.connection.close();
        info!("[{id}] stop requested for bot '{}'", instance.name);
        Ok(())
    }

    /// Snapshot ordered by start order.
    pub fn list(&self) -> Vec<BotInstanceInfo> {
        let mut entries: Vec<(u64, BotInstanceInfo)> = self
            .instances
            .iter()
            .map(|entry| {
                let instance = entry.value();
                (
                    instance.seq,
                    BotInstanceInfo {
                        id: entry.key().clone(),
                        name: instance.name.clone(),
                        prefix: instance.prefix.clone(),
                    },
                )
            })
            .collect();
        entries.sort_by_key(|(seq, _)| *seq);
        entries.into_iter().map(|(_, info)| info).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.instances.contains_key(id)
    }

    pub fn shutdown_all(&self) {
        let ids: Vec<String> = self.instances.iter().map(|e| e.key().clone()).collect();
        for id in ids {
            // A concurrent stop may have won the race; nothing left to do then.
            let _ = self.stop(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platforms::{MockBotConnection, MockBotConnector};

    fn failing_connection() -> Arc<dyn BotConnection> {
        let mut conn = MockBotConnection::new();
        conn.expect_run()
            .returning(|| Err(Error::Platform("Authentication failed".into())));
        conn.expect_close().returning(|| ());
        Arc::new(conn)
    }

    #[tokio::test]
    async fn empty_token_never_reaches_connector() {
        let mut connector = MockBotConnector::new();
        connector.expect_build().times(0);
        let manager = BotInstanceManager::new(Arc::new(connector));

        let err = manager.start("bot", "   ", "!").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(manager.list().is_empty());
    }

    #[tokio::test]
    async fn connector_receives_trimmed_token_and_id() {
        let mut connector = MockBotConnector::new();
        connector
            .expect_build()
            .withf(|label, token, prefix| label == "bot-1" && token == "abc" && prefix == "?")
            .times(1)
            .returning(|_, _, _| Ok(failing_connection()));
        let manager = BotInstanceManager::new(Arc::new(connector));

        assert_eq!(manager.start("helper", "  abc  ", "?").unwrap(), "bot-1");
    }

    #[tokio::test]
    async fn build_error_is_returned_and_nothing_registered() {
        let mut connector = MockBotConnector::new();
        connector
            .expect_build()
            .returning(|_, _, _| Err(Error::InvalidArgument("bad token".into())));
        let manager = BotInstanceManager::new(Arc::new(connector));

        assert!(manager.start("bot", "abc", "!").is_err());
        assert!(manager.list().is_empty());
    }

    #[tokio::test]
    async fn failed_connection_removes_its_entry() {
        let mut connector = MockBotConnector::new();
        connector
            .expect_build()
            .returning(|_, _, _| Ok(failing_connection()));
        let manager = BotInstanceManager::new(Arc::new(connector));

        let id = manager.start("bot", "abc", "!").unwrap();
        for _ in 0..50 {
            if !manager.contains(&id) {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert!(!manager.contains(&id));
        assert!(matches!(manager.stop(&id), Err(Error::NotFound(_))));
    }
}
