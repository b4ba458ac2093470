//! CLI command implementations.

pub mod discard;
pub mod flush;
pub mod inspect;
pub mod record;

use std::time::Duration;
use viewstats_delivery::{DeliveryClient, DeliveryConfig, ReqwestClient};

/// Connection settings shared by the commands that talk to a collector.
#[derive(Debug, Clone)]
pub struct CollectorArgs {
    /// Collector URL.
    pub endpoint: String,
    /// Optional bearer token.
    pub token: Option<String>,
    /// Connect timeout in seconds.
    pub connect_timeout: u64,
    /// Read timeout in seconds.
    pub read_timeout: u64,
}

impl CollectorArgs {
    /// Builds a delivery client over reqwest.
    pub fn delivery(&self) -> Result<DeliveryClient<ReqwestClient>, Box<dyn std::error::Error>> {
        let mut config = DeliveryConfig::new(self.endpoint.clone())
            .with_connect_timeout(Duration::from_secs(self.connect_timeout))
            .with_read_timeout(Duration::from_secs(self.read_timeout));
        if let Some(token) = &self.token {
            config = config.with_bearer_token(token.clone());
        }
        let client = ReqwestClient::new(&config)?;
        Ok(DeliveryClient::new(config, client))
    }
}

/// Prints the tracker counters after a command that delivered views.
pub fn print_stats(stats: &viewstats_core::TrackerStats, pending: usize) {
    println!("Restored:  {} events", stats.restored);
    println!("Recorded:  {} events", stats.recorded);
    println!("Flushes:   {}", stats.flushes);
    println!(
        "Outcomes:  {} accepted, {} partial, {} rejected, {} transient",
        stats.accepted, stats.partially_accepted, stats.rejected, stats.transient_failures
    );
    if let Some(outcome) = stats.last_outcome {
        println!("Last:      {outcome}");
    }
    println!("Saved:     {} events", stats.persisted);
    if stats.lost > 0 || stats.dropped > 0 {
        println!("Lost:      {} events ({} dropped)", stats.lost, stats.dropped);
    }
    if pending > 0 {
        println!("Pending:   {pending} events");
    }
}
