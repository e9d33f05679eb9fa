//! The traffic light engine: a background cycle loop plus observer APIs.
//!
//! A [`TrafficLight`] owns the current [`Phase`] and toggles it at
//! randomized intervals on a dedicated tokio task. Each transition is
//! announced twice: once into a shared [`BlockingQueue`] (single-consumer
//! handoff, the `wait_for_phase` path) and once onto a broadcast stream
//! (fan-out for any number of subscribers).

use crate::common::Phase;
use crate::config::CyclerConfig;
use crate::events::{PhaseEvent, SystemEvent};
use crate::queue::BlockingQueue;
use anyhow::{bail, Context, Result};
use rand::Rng;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, trace};

/// A two-phase traffic light driven by a randomized background timer.
///
/// The struct is a cloneable handle to one logical light: clones share the
/// same phase, queue, and event streams. Construct it once, call
/// [`simulate`](TrafficLight::simulate) exactly once, then observe it from
/// as many tasks as needed.
#[derive(Clone)]
pub struct TrafficLight {
    config: Arc<CyclerConfig>,
    phase: Arc<AtomicU8>,
    queue: Arc<BlockingQueue<Phase>>,
    phase_tx: broadcast::Sender<PhaseEvent>,
    system_tx: broadcast::Sender<SystemEvent>,
    shutdown_tx: broadcast::Sender<()>,
    started: Arc<AtomicBool>,
    cycle_task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl TrafficLight {
    /// Creates a new light in the configured initial phase.
    ///
    /// The cycle loop is not running yet; nothing happens until
    /// [`simulate`](TrafficLight::simulate) is called.
    pub fn new(config: CyclerConfig) -> Result<Self> {
        config.validate()?;
        let (phase_tx, _) = broadcast::channel(config.event_capacity);
        let (system_tx, _) = broadcast::channel(config.event_capacity);
        let (shutdown_tx, _) = broadcast::channel(1);
        let initial = config.initial_phase;

        Ok(Self {
            config: Arc::new(config),
            phase: Arc::new(AtomicU8::new(initial as u8)),
            queue: Arc::new(BlockingQueue::new()),
            phase_tx,
            system_tx,
            shutdown_tx,
            started: Arc::new(AtomicBool::new(false)),
            cycle_task: Arc::new(Mutex::new(None)),
        })
    }

    /// Non-blocking read of the phase the light currently displays.
    ///
    /// This is a relaxed read: a result that is stale by one in-flight
    /// transition is acceptable and expected.
    pub fn current_phase(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::Relaxed))
    }

    /// Starts the background cycle loop.
    ///
    /// Must be called at most once per logical light; a second call (on
    /// this handle or any clone) fails fast instead of spawning a second
    /// competing loop.
    pub async fn simulate(&self) -> Result<()> {
        if self.started.swap(true, Ordering::SeqCst) {
            bail!("simulate() was already called on this traffic light");
        }

        let worker = self.clone();
        let shutdown_rx = self.shutdown_tx.subscribe();
        let handle = tokio::spawn(async move { worker.cycle_through_phases(shutdown_rx).await });
        *self.cycle_task.lock().await = Some(handle);

        self.system_tx
            .send(SystemEvent::CyclerStarted {
                timestamp: Instant::now(),
            })
            .ok();
        info!(initial = %self.current_phase(), "traffic light started");
        Ok(())
    }

    /// Suspends until the light transitions into `target`.
    ///
    /// This observes transition *events* pulled from the shared queue,
    /// discarding every non-matching phase along the way, so a transition
    /// that happens between a state read and the wait cannot be missed.
    /// Note that the queue hands each event to exactly one consumer; for
    /// several long-lived observers use
    /// [`subscribe_phases`](TrafficLight::subscribe_phases) instead.
    pub async fn wait_for_phase(&self, target: Phase) {
        loop {
            let phase = self.queue.receive().await;
            if phase == target {
                return;
            }
            trace!(%phase, %target, "discarding non-matching phase event");
        }
    }

    /// Suspends until the light turns green.
    pub async fn wait_for_green(&self) {
        self.wait_for_phase(Phase::Green).await;
    }

    /// Subscribes to the stream of phase transitions.
    ///
    /// Unlike the queue behind [`wait_for_phase`](TrafficLight::wait_for_phase),
    /// every subscriber sees every transition.
    pub fn subscribe_phases(&self) -> broadcast::Receiver<PhaseEvent> {
        self.phase_tx.subscribe()
    }

    /// Subscribes to the light's lifecycle events.
    pub fn subscribe_system_events(&self) -> broadcast::Receiver<SystemEvent> {
        self.system_tx.subscribe()
    }

    /// Stops the cycle loop and waits for it to finish.
    ///
    /// Safe to call more than once; later calls are no-ops.
    pub async fn shutdown(&self) -> Result<()> {
        self.shutdown_tx.send(()).ok();
        let handle = self.cycle_task.lock().await.take();
        if let Some(handle) = handle {
            handle.await.context("cycle loop task panicked")?;
            self.system_tx.send(SystemEvent::CyclerShutdown).ok();
            info!("traffic light shut down");
        }
        Ok(())
    }

    /// The background loop: dwell for a random interval, toggle, announce.
    async fn cycle_through_phases(self, mut shutdown_rx: broadcast::Receiver<()>) {
        let mut cycle: u64 = 0;
        loop {
            let dwell = self.draw_cycle_time();
            debug!(?dwell, "drew phase dwell time");

            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => break,
                _ = tokio::time::sleep(dwell) => {
                    let next = self.current_phase().toggled();
                    self.phase.store(next as u8, Ordering::Relaxed);
                    cycle += 1;

                    self.queue.send(next);
                    self.phase_tx
                        .send(PhaseEvent {
                            phase: next,
                            cycle,
                            at: Instant::now(),
                        })
                        .ok();
                    trace!(phase = %next, cycle, "phase toggled");
                }
            }
        }
        debug!("cycle loop exited");
    }

    /// Draws a dwell time uniformly from the configured range.
    fn draw_cycle_time(&self) -> Duration {
        let millis = rand::thread_rng().gen_range(self.config.min_cycle_ms..=self.config.max_cycle_ms);
        Duration::from_millis(millis)
    }
}
