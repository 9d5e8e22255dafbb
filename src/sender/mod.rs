pub mod client;
pub mod serialization;
pub mod stats;
pub mod transmission;

pub use client::HttpClient;
pub use serialization::encode_record;
pub use stats::{DeliveryStats, DeliveryStatsSnapshot};
pub use transmission::RecordTransmitter;
