//! Operator console for the keyboard attractor
//!
//! This module owns the command loop: every tick it polls the keyboard
//! without blocking, applies at most one key to the tunable parameters or
//! turns it into a navigation target, and hands targets to the transport.

mod keymap;
mod params;
mod rate;

pub use keymap::*;
pub use params::*;
pub use rate::*;

use crate::navigation::PendingTarget;
use crate::ros_interface::TargetSink;
use crate::terminal::ShutdownSignal;
use crate::AttractorConfig;
use std::io::Write;

/// Source of single input bytes
pub trait KeySource {
    /// Whether at least one byte can be read without blocking
    fn poll_ready(&mut self) -> bool;
    /// Read exactly one byte, `None` if nothing could be read
    fn read_key(&mut self) -> Option<u8>;
}

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep looping
    Continue,
    /// The quit key was pressed
    Quit,
}

/// Fixed-rate keyboard command loop
pub struct CommandLoop<K: KeySource, S: TargetSink> {
    params: TunableParameters,
    keys: KeyBindings,
    step: f64,
    drain_burst: bool,
    rate: Rate,
    input: K,
    sink: S,
    out: Box<dyn Write>,
}

impl<K: KeySource, S: TargetSink> CommandLoop<K, S> {
    /// Create a command loop printing operator feedback to stdout
    pub fn new(config: &AttractorConfig, input: K, sink: S) -> Self {
        CommandLoop {
            params: TunableParameters::from_config(config),
            keys: config.keys.clone(),
            step: config.step,
            drain_burst: config.drain_burst,
            rate: Rate::new(config.rate_hz),
            input,
            sink,
            out: Box::new(std::io::stdout()),
        }
    }

    /// Redirect operator feedback
    pub fn with_output(mut self, out: Box<dyn Write>) -> Self {
        self.out = out;
        self
    }

    /// Current parameter values
    pub fn params(&self) -> &TunableParameters {
        &self.params
    }

    /// Transport the loop publishes to
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Print the key bindings and the initial parameters
    pub fn print_banner(&mut self) {
        let banner = self.keys.help();
        self.print(&banner);
        self.print_status();
    }

    /// Run until the quit key or a shutdown request
    pub fn run(&mut self, shutdown: &ShutdownSignal) {
        log::info!("Command loop running at {:?} per tick", self.rate.period());

        while !shutdown.is_requested() {
            let outcome = self.tick();
            // The quit tick still finishes: sleep, then spin.
            self.rate.sleep();
            self.sink.spin_once();
            if outcome == TickOutcome::Quit {
                log::info!("Quit key pressed");
                break;
            }
        }

        if shutdown.is_requested() {
            log::info!("Shutdown requested, leaving command loop");
        }
    }

    /// Poll the keyboard once and act on what was read.
    ///
    /// Only one byte is consumed unless burst draining is enabled; remaining
    /// bytes stay queued for later ticks.
    pub fn tick(&mut self) -> TickOutcome {
        loop {
            if !self.input.poll_ready() {
                return TickOutcome::Continue;
            }
            let Some(byte) = self.input.read_key() else {
                return TickOutcome::Continue;
            };

            let outcome = self.handle_byte(byte);
            if outcome == TickOutcome::Quit || !self.drain_burst {
                return outcome;
            }
        }
    }

    fn handle_byte(&mut self, byte: u8) -> TickOutcome {
        let pending = match self.keys.decode(byte, self.step) {
            Some(Key::Tune(parameter, step)) => {
                self.params.adjust(parameter, step);
                self.print_status();
                None
            }
            Some(Key::Command(direction)) => {
                let target = self.params.target(direction);
                self.print(&format!("\n{}", target.confirmation()));
                Some(target)
            }
            Some(Key::Quit) => return TickOutcome::Quit,
            None => {
                log::trace!("Ignoring unbound byte {:#04x}", byte);
                None
            }
        };

        if let Some(target) = pending {
            self.publish(&target);
        }
        TickOutcome::Continue
    }

    fn publish(&mut self, target: &PendingTarget) {
        match self.sink.publish(target) {
            Ok(()) => log::debug!(
                "Published target x={:.3}, y={:.3}, z={:.3}",
                target.x(),
                target.y(),
                target.z()
            ),
            Err(e) => log::warn!("Failed to publish target: {}", e),
        }
    }

    fn print_status(&mut self) {
        let status = self.params.status_line();
        self.print(&status);
    }

    fn print(&mut self, text: &str) {
        let written = writeln!(self.out, "{}", text).and_then(|_| self.out.flush());
        if let Err(e) = written {
            log::debug!("Console output failed: {}", e);
        }
    }
}
