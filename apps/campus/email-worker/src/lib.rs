//! Email Worker
//!
//! Consumes email jobs from the two queue lanes and hands them to a
//! delivery handler. The high-priority lane is always polled before the
//! normal lane, which is what gives exam notifications and password resets
//! their head start; the queue itself never interleaves lanes.

pub mod consumer;
pub mod delivery;

pub use consumer::{ConsumerConfig, QueueConsumer};
pub use delivery::{DeliveryHandler, LogDelivery};

use core_config::{Environment, FromEnv};
use tokio::sync::watch;

/// Wire up tracing, config and the store connection, then run the consumer
/// loop until ctrl-c.
pub async fn run() -> eyre::Result<()> {
    core_config::tracing::install_color_eyre();
    let environment = Environment::from_env();
    core_config::tracing::init_tracing(&environment);

    let redis_config = database::redis::RedisConfig::from_env()?;
    let conn = database::redis::connect_with_retry(&redis_config.url, None).await?;

    let consumer = QueueConsumer::new(conn, LogDelivery, ConsumerConfig::default());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });

    consumer.run(shutdown_rx).await?;

    Ok(())
}
