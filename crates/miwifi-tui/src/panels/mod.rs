//! Concrete panels and the factory that wires them to pollers.

mod cpu;
mod dashboard;
mod dev;
mod info;
mod mem;
mod net;

pub use cpu::CpuPanel;
pub use dashboard::DashboardPanel;
pub use dev::DevPanel;
pub use info::InfoPanel;
pub use mem::MemPanel;
pub use net::NetPanel;

use tokio::task::JoinHandle;

use miwifi_core::{CancellationToken, Router};

use crate::panel::{Panel, PanelKind};

/// Start the pollers `kind` needs and build the panel over them.
///
/// Returns the panel and the poller handles.
pub fn build_panel(
    kind: PanelKind,
    router: &Router,
    cancel: &CancellationToken,
) -> (Box<dyn Panel>, Vec<JoinHandle<()>>) {
    let (status, status_task) = router.poll_status(cancel);

    match kind {
        PanelKind::Dashboard => {
            let (band, band_task) = router.poll_bandwidth(cancel);
            (
                Box::new(DashboardPanel::new(status, band)),
                vec![status_task, band_task],
            )
        }
        PanelKind::Net => {
            let (band, band_task) = router.poll_bandwidth(cancel);
            (
                Box::new(NetPanel::new(status, band)),
                vec![status_task, band_task],
            )
        }
        PanelKind::Cpu => (Box::new(CpuPanel::new(status)), vec![status_task]),
        PanelKind::Dev => (Box::new(DevPanel::new(status)), vec![status_task]),
        PanelKind::Info => (Box::new(InfoPanel::new(status)), vec![status_task]),
        PanelKind::Mem => (Box::new(MemPanel::new(status)), vec![status_task]),
    }
}
