//! poller.rs
//!
//! Periodic position polling. Every tick issues a request tagged with an
//! increasing sequence number; requests may overlap, but a response only
//! lands if it is newer than whatever was published last, so a slow old
//! response can never overwrite a fresher one.
//!
//! The poller owns its timer and in-flight requests. Dropping it (or calling
//! [`PositionPoller::shutdown`]) cancels both.

use std::sync::Arc;
use std::time::Duration;

use bevy::log::{debug, info, warn};
use bevy::math::DVec3;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::coords::geo_to_cartesian;
use crate::feed::{IssReport, PositionSource};

/// A published position, mapped onto the display sphere
#[derive(Debug, Clone, PartialEq)]
pub struct PositionFix {
    pub seq: u64,
    pub report: IssReport,
    pub point: DVec3,
}

pub struct PositionPoller {
    shutdown: CancellationToken,
    task: JoinHandle<()>,
    latest: watch::Receiver<Option<PositionFix>>,
}

impl PositionPoller {
    /// Start polling on the current tokio runtime.
    ///
    /// The first request goes out immediately, then one per `interval`.
    pub fn spawn<S: PositionSource>(source: S, interval: Duration, radius: f64) -> Self {
        let (tx, latest) = watch::channel(None);
        let shutdown = CancellationToken::new();

        let task = tokio::spawn(run(
            Arc::new(source),
            interval,
            radius,
            Arc::new(tx),
            shutdown.clone(),
        ));

        Self {
            shutdown,
            task,
            latest,
        }
    }

    /// Most recently published fix, if any poll has succeeded yet
    pub fn latest(&self) -> Option<PositionFix> {
        self.latest.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<PositionFix>> {
        self.latest.clone()
    }

    /// Stop the timer and abandon any request still in flight
    pub fn shutdown(self) {
        drop(self);
    }
}

impl Drop for PositionPoller {
    fn drop(&mut self) {
        self.shutdown.cancel();
        self.task.abort();
    }
}

async fn run<S: PositionSource>(
    source: Arc<S>,
    interval: Duration,
    radius: f64,
    tx: Arc<watch::Sender<Option<PositionFix>>>,
    shutdown: CancellationToken,
) {
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut seq: u64 = 0;
    info!("polling ISS position every {:?}", interval);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = ticker.tick() => {}
        }

        seq += 1;
        tokio::spawn(poll_once(
            source.clone(),
            seq,
            radius,
            tx.clone(),
            shutdown.child_token(),
        ));
    }

    debug!("position poller stopped after {} polls", seq);
}

async fn poll_once<S: PositionSource>(
    source: Arc<S>,
    seq: u64,
    radius: f64,
    tx: Arc<watch::Sender<Option<PositionFix>>>,
    cancel: CancellationToken,
) {
    let result = tokio::select! {
        _ = cancel.cancelled() => return,
        result = source.fetch() => result,
    };

    match result {
        Ok(report) => {
            if !report.position.is_in_range() {
                warn!(
                    "ISS position out of range: {:.4}, {:.4}",
                    report.position.latitude, report.position.longitude
                );
            }

            let point = geo_to_cartesian(report.position, radius);
            let fix = PositionFix { seq, report, point };

            if !publish(&tx, fix) {
                debug!("dropped stale position response #{}", seq);
            }
        }
        Err(e) => {
            // keep showing the previous fix until the next tick
            warn!("failed to fetch ISS position (poll #{}): {}", seq, e);
        }
    }
}

// only newer sequence numbers may replace the published fix
fn publish(tx: &watch::Sender<Option<PositionFix>>, fix: PositionFix) -> bool {
    tx.send_if_modified(|current| match current {
        Some(existing) if existing.seq >= fix.seq => false,
        _ => {
            *current = Some(fix);
            true
        }
    })
}
