//! Application core: session lifecycle and the render loop.

use std::process::ExitCode;
use std::time::Duration;

use color_eyre::eyre::Result;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use miwifi_core::{CancellationToken, Router};

use crate::action::{self, Action};
use crate::event::{Event, EventReader};
use crate::panel::PanelKind;
use crate::panels::build_panel;
use crate::tui::Tui;

/// Redraw period, independent of data arrival.
const RENDER_RATE: Duration = Duration::from_secs(1);

pub struct App {
    router: Router,
    kind: PanelKind,
}

impl App {
    pub fn new(router: Router, kind: PanelKind) -> Self {
        Self { router, kind }
    }

    /// Log in, run the panel until the user quits, then log out.
    ///
    /// Exits non-zero when login, terminal setup or logout fails.
    pub async fn run(self) -> ExitCode {
        println!("Connecting...");
        if let Err(e) = self.router.connect().await {
            error!(error = %e, "login failed");
            eprintln!("Connection error: {e}");
            return ExitCode::FAILURE;
        }

        let cancel = CancellationToken::new();
        let handles = match self.show(&cancel).await {
            Ok(handles) => handles,
            Err(e) => {
                error!(error = %e, "terminal failure");
                eprintln!("Terminal error: {e}");
                cancel.cancel();
                return ExitCode::FAILURE;
            }
        };

        debug!("stopping background tasks");
        cancel.cancel();
        for handle in handles {
            let _ = handle.await;
        }

        println!("Disconnecting...");
        if let Err(e) = self.router.disconnect().await {
            error!(error = %e, "logout failed");
            eprintln!("Disconnection error: {e}");
            return ExitCode::FAILURE;
        }

        info!("clean shutdown");
        ExitCode::SUCCESS
    }

    /// Own the terminal until the user quits. Returns the handles of every
    /// task started for the panel.
    async fn show(&self, cancel: &CancellationToken) -> Result<Vec<JoinHandle<()>>> {
        let mut tui = Tui::enter()?;

        let (mut panel, mut handles) = build_panel(self.kind, &self.router, cancel);
        debug!(panel = %self.kind, "init panel");
        handles.extend(panel.init(cancel.clone()));

        let mut area = tui.area()?;
        panel.resize(area);
        tui.draw(|frame| panel.render(frame, area))?;

        let mut events = EventReader::new(RENDER_RATE);
        info!("render loop started");

        while let Some(event) = events.next().await {
            let action = match event {
                Event::Key(key) => action::from_key(key),
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                Event::Render => Some(Action::Render),
            };

            match action {
                Some(Action::Quit) => break,
                Some(Action::Resize(w, h)) => {
                    debug!(width = w, height = h, "resize");
                    area = tui.area()?;
                    panel.resize(area);
                    tui.draw(|frame| panel.render(frame, area))?;
                }
                Some(Action::Render) => tui.draw(|frame| panel.render(frame, area))?,
                None => {}
            }
        }

        events.stop();
        tui.exit();
        info!("render loop ended");
        Ok(handles)
    }
}
