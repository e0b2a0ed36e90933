// Router status endpoints
//
// Authenticated reads of system status and the bandwidth test result.

use tracing::debug;

use crate::client::MiwifiClient;
use crate::error::Error;
use crate::models::{BandwidthResult, StatusSnapshot};

const STATUS_PATH: &str = "/api/misystem/status";
const BANDWIDTH_PATH: &str = "/api/misystem/bandwidth_test";

impl MiwifiClient {
    /// Get a full status sample: devices, CPU, memory, WAN, hardware.
    ///
    /// `GET /cgi-bin/luci/;stok={token}/api/misystem/status`
    pub async fn status(&self) -> Result<StatusSnapshot, Error> {
        let url = self.session_url(STATUS_PATH)?;
        debug!("fetching status");
        self.get_json(url, &[]).await
    }

    /// Get the WAN bandwidth test result.
    ///
    /// `GET /cgi-bin/luci/;stok={token}/api/misystem/bandwidth_test[?history=1]`
    ///
    /// With `history` the router returns its last cached measurement
    /// instead of running a new (slow) test.
    pub async fn bandwidth_test(&self, history: bool) -> Result<BandwidthResult, Error> {
        let url = self.session_url(BANDWIDTH_PATH)?;
        debug!(history, "fetching bandwidth test");
        let query: &[(&str, &str)] = if history { &[("history", "1")] } else { &[] };
        self.get_json(url, query).await
    }
}
