use clap::Parser;
use macroquad::prelude::*;

mod canvas;
mod config;
mod physics;
mod scheduler;
mod simulation;

const CANVAS_W: i32 = 1280;
const CANVAS_H: i32 = 960;

fn window_conf() -> Conf {
    Conf {
        window_title: "circles".to_string(),
        window_width: CANVAS_W,
        window_height: CANVAS_H,
        window_resizable: true,
        sample_count: 4,
        icon: None,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = config::Args::parse();

    let (config, policy) = match args.resolve() {
        Ok(resolved) => resolved,
        Err(err) => {
            log::error!("invalid configuration: {err:#}");
            return;
        }
    };

    log::info!("starting with {config:?} and {policy:?}");

    let mut sim = simulation::Simulation::new(config);
    let scheduler = scheduler::Scheduler::new(sim.config());
    let mut canvas = canvas::Canvas::new(policy, config.seed, scheduler.stop_handle());

    scheduler.run(&mut sim, &mut canvas).await;
}
