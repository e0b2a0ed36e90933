// miwifi-core: Polling and fan-out layer between miwifi-api and the TUI.

pub mod config;
pub mod error;
pub mod fanout;
pub mod poller;
pub mod router;
pub mod stream;
pub mod task;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::RouterConfig;
pub use error::CoreError;
pub use fanout::FanOut;
pub use poller::spawn_poller;
pub use router::Router;
pub use stream::{LatestReceiver, LatestSender, LatestStream, latest_channel, recv_or_pending};
pub use task::spawn_supervised;

// Re-export wire types so consumers need only this crate.
pub use miwifi_api::{
    BandwidthResult, CountStat, CpuStat, DeviceStat, HardwareStat, MemStat, SessionState,
    StatusSnapshot, WanStat,
};
pub use tokio_util::sync::CancellationToken;
