// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Monitoring task owning a session's read loop.

use std::sync::Arc;

use tokio::sync::{broadcast, oneshot};
use tokio::task::JoinHandle;

use crate::error::ProtocolError;
use crate::event::{BridgeEvent, EventBus};
use crate::protocol::TelnetSession;

/// Background monitor publishing bridge events to subscribers.
///
/// A `Monitor` consumes a logged-in session, enables monitoring mode and
/// moves the socket into a read loop that parses every pushed line into a
/// [`BridgeEvent`] and publishes it on an [`EventBus`]. The loop runs until
/// the bridge closes the connection or [`stop`](Self::stop) is called; stop
/// sends a best-effort `#MONITORING,255,0` before dropping the socket.
///
/// # Examples
///
/// ```no_run
/// use casetel::event::Monitor;
/// use casetel::protocol::{SessionConfig, TelnetSession};
///
/// # async fn example() -> casetel::Result<()> {
/// let session = TelnetSession::connect(&SessionConfig::new("192.168.1.40")).await?;
/// let monitor = Monitor::start(session).await?;
///
/// let mut events = monitor.subscribe();
/// while let Ok(event) = events.recv().await {
///     println!("{event}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Monitor {
    bus: Arc<EventBus>,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl Monitor {
    /// Enables monitoring on the session and starts the read loop.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the monitoring-enable exchange fails.
    pub async fn start(mut session: TelnetSession) -> Result<Self, ProtocolError> {
        session.enable_monitoring().await?;

        let bus = Arc::new(EventBus::new());
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let task_bus = Arc::clone(&bus);
        let handle = tokio::spawn(async move {
            read_loop(session, &task_bus, shutdown_rx).await;
        });

        Ok(Self {
            bus,
            shutdown: shutdown_tx,
            handle,
        })
    }

    /// Creates a new event subscriber.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<BridgeEvent> {
        self.bus.subscribe()
    }

    /// Stops the read loop, disabling monitoring first where possible.
    pub async fn stop(self) {
        let _ = self.shutdown.send(());
        let _ = self.handle.await;
    }
}

async fn read_loop(
    mut session: TelnetSession,
    bus: &EventBus,
    mut shutdown: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            biased;

            _ = &mut shutdown => {
                if let Err(e) = session.disable_monitoring().await {
                    tracing::debug!(error = %e, "monitoring disable failed on shutdown");
                }
                break;
            }

            line = session.next_line() => match line {
                Ok(Some(line)) => {
                    tracing::debug!(line = %line, "monitor line");
                    if let Some(event) = BridgeEvent::parse(&line) {
                        bus.publish(event);
                    }
                }
                Ok(None) => {
                    tracing::info!("bridge closed the monitoring connection");
                    break;
                }
                Err(e) => {
                    tracing::error!(error = %e, "monitor read failed");
                    break;
                }
            }
        }
    }
}
