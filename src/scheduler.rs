use core::cell::Cell;
use core::time::Duration;
use std::rc::Rc;

use crate::{
    config::SimConfig,
    simulation::{RenderSink, Simulation},
};

/// Where the scheduler yields between frames. Input that arrives while
/// suspended is applied to the simulation here, so it only ever changes
/// between two complete frames.
#[allow(async_fn_in_trait)]
pub trait Host: RenderSink {
    async fn suspend(&mut self, simulation: &mut Simulation, interval: Duration);
}

/// Shared flag asking the scheduler to return after the current frame.
#[derive(Clone, Default)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

pub struct Scheduler {
    interval: Duration,
    stop: StopHandle,
}

impl Scheduler {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            interval: config.frame_interval(),
            stop: StopHandle::default(),
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Steps and renders, then suspends for one frame interval, until a stop
    /// is requested.
    pub async fn run<H: Host>(&self, simulation: &mut Simulation, host: &mut H) {
        log::info!(
            "running at {:.1} ms per frame",
            self.interval.as_secs_f64() * 1000.0
        );

        while !self.stop.is_stopped() {
            simulation.step(host);
            host.suspend(simulation, self.interval).await;
        }

        log::info!(
            "stopped after {} frames with {} bodies",
            simulation.frame(),
            simulation.bodies().len()
        );
    }
}
