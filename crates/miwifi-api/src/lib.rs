// miwifi-api: Async Rust client for the MiWiFi router management API

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod nonce;
pub mod system;
pub mod transport;

pub use client::{MiwifiClient, SessionState};
pub use error::Error;
pub use models::{
    BandwidthResult, CountStat, CpuStat, DeviceStat, HardwareStat, MemStat, StatusSnapshot,
    WanStat,
};
pub use transport::{RetryPolicy, TlsMode, TransportConfig};
