//! Email Worker Service - Entry Point
//!
//! Background worker that delivers email jobs from the Redis queue lanes.

#[tokio::main]
async fn main() -> eyre::Result<()> {
    campus_email_worker::run().await
}
