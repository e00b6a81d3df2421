// src/main.rs
// Entry point for the keyboard attractor: reads single keys from the terminal
// and publishes PointStamped navigation targets over ROS 2.

use keyboard_attractor::{
    AttractorConfig, CommandLoop, RawModeGuard, RosTransport, ShutdownSignal, StdinKeys,
};
use log::{error, info};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    if let Err(e) = run() {
        error!("{}", e);
        return Err(e);
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn Error>> {
    info!("Starting keyboard attractor...");

    let config = AttractorConfig::load()?;
    let transport = RosTransport::new(&config)?;
    info!("ROS 2 node {} initialized", config.node_name);

    let mut console = CommandLoop::new(&config, StdinKeys::new(), transport);
    console.print_banner();

    let shutdown = ShutdownSignal::install()?;

    // Dropped on every path out of this function, restoring cooked mode.
    let mut raw_mode = RawModeGuard::enable_stdin()?;
    console.run(&shutdown);
    raw_mode.restore()?;

    info!(
        "Keyboard attractor stopped after {} published targets",
        console.sink().published()
    );
    Ok(())
}
