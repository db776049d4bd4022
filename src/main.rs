use gasbox::{LogSink, SimConfig, Simulation};
use log::LevelFilter;

/// Console driver: runs the default gas for a tick budget (first CLI
/// argument, default 10_000) and logs observables every report interval.
fn main() -> gasbox::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Info)
        .init();

    let ticks: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(10_000);

    let mut sim = Simulation::new(SimConfig::default())?;
    sim.run(ticks, &mut LogSink);
    Ok(())
}
