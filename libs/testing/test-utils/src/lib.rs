//! Test infrastructure helpers
//!
//! Provides a `TestRedis` wrapper that runs a throwaway Redis container for
//! queue integration tests. The container is stopped and removed when the
//! wrapper is dropped.

use redis::Client;
use redis::aio::MultiplexedConnection;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::redis::Redis;

/// A Redis container for integration tests.
///
/// # Example
///
/// ```no_run
/// use test_utils::TestRedis;
/// use redis::AsyncCommands;
///
/// # async fn example() {
/// let redis = TestRedis::new().await;
/// let mut conn = redis.connection();
///
/// conn.lpush::<_, _, ()>("email_queue", "payload").await.unwrap();
/// let depth: u64 = conn.llen("email_queue").await.unwrap();
/// assert_eq!(depth, 1);
/// # }
/// ```
pub struct TestRedis {
    #[allow(dead_code)]
    container: ContainerAsync<Redis>,
    connection: MultiplexedConnection,
    connection_string: String,
}

impl TestRedis {
    /// Start a fresh Redis container and connect to it.
    pub async fn new() -> Self {
        let container = Redis::default()
            .with_tag("8-alpine")
            .start()
            .await
            .expect("Failed to start Redis container");

        let host_port = container
            .get_host_port_ipv4(6379)
            .await
            .expect("Failed to get Redis port");

        let connection_string = format!("redis://127.0.0.1:{}", host_port);

        let connection = Client::open(connection_string.clone())
            .expect("Failed to create Redis client")
            .get_multiplexed_async_connection()
            .await
            .expect("Failed to connect to Redis");

        tracing::info!(port = host_port, "Test Redis ready");

        Self {
            container,
            connection,
            connection_string,
        }
    }

    /// A cloned raw connection for direct assertions against the store.
    pub fn connection(&self) -> MultiplexedConnection {
        self.connection.clone()
    }

    /// Connection URL for wiring services under test to this container.
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redis::AsyncCommands;

    #[tokio::test]
    async fn test_redis_list_operations() {
        let redis = TestRedis::new().await;
        let mut conn = redis.connection();

        conn.lpush::<_, _, ()>("jobs", "first").await.unwrap();
        conn.lpush::<_, _, ()>("jobs", "second").await.unwrap();

        let len: u64 = conn.llen("jobs").await.unwrap();
        assert_eq!(len, 2);

        // Head-push, tail-pop: FIFO
        let popped: String = conn.rpop("jobs", None).await.unwrap();
        assert_eq!(popped, "first");
    }
}
