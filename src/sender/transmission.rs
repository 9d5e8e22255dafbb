use super::client::HttpClient;
use super::stats::DeliveryStats;
use crate::domain::DispatchError;
use bytes::Bytes;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Single-attempt remote delivery.
///
/// Holds no client when the host is empty; delivery then fails with
/// `HostNotConfigured` before any I/O.
#[derive(Debug, Clone)]
pub struct RecordTransmitter {
    client: Option<HttpClient>,
    stats: Arc<DeliveryStats>,
}

impl RecordTransmitter {
    pub fn new(client: Option<HttpClient>, stats: Arc<DeliveryStats>) -> Self {
        Self { client, stats }
    }

    pub async fn deliver(&self, body: Bytes) -> Result<(), DispatchError> {
        let Some(client) = &self.client else {
            return Err(DispatchError::HostNotConfigured);
        };

        let bytes_sent = body.len();
        let start = Instant::now();
        let result = client.post(body).await;
        let latency = start.elapsed();

        self.stats.record_delivery(result.is_ok(), latency);

        match result {
            Ok(status) => {
                debug!(
                    "Delivered record to {} ({} bytes, HTTP {}) in {:?}",
                    client.endpoint(),
                    bytes_sent,
                    status.as_u16(),
                    latency
                );
                Ok(())
            }
            Err(e) => {
                warn!(
                    "Failed to deliver record to {} after {:?}: {}",
                    client.endpoint(),
                    latency,
                    e
                );
                Err(e)
            }
        }
    }
}
