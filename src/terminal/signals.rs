// src/terminal/signals.rs
// Turns SIGINT/SIGTERM/SIGHUP into a shutdown request the command loop polls.

use crate::AttractorError;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

static PROCESS_FLAG: OnceLock<Arc<AtomicBool>> = OnceLock::new();

const HANDLED_SIGNALS: [libc::c_int; 3] = [libc::SIGINT, libc::SIGTERM, libc::SIGHUP];

extern "C" fn on_signal(_signum: libc::c_int) {
    // Only an atomic store: async-signal-safe.
    if let Some(flag) = PROCESS_FLAG.get() {
        flag.store(true, Ordering::SeqCst);
    }
}

/// Shared flag telling the command loop to stop
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    flag: Arc<AtomicBool>,
}

impl ShutdownSignal {
    /// A flag nothing but `request` will raise
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag on SIGINT, SIGTERM and SIGHUP
    pub fn install() -> Result<Self, AttractorError> {
        let flag = PROCESS_FLAG.get_or_init(|| Arc::new(AtomicBool::new(false)));

        for signum in HANDLED_SIGNALS {
            // SAFETY: sigaction is zero-initialisable and the handler only stores an atomic.
            let mut action: libc::sigaction = unsafe { std::mem::zeroed() };
            action.sa_sigaction = on_signal as extern "C" fn(libc::c_int) as libc::sighandler_t;
            action.sa_flags = libc::SA_RESTART;
            unsafe { libc::sigemptyset(&mut action.sa_mask) };

            if unsafe { libc::sigaction(signum, &action, std::ptr::null_mut()) } != 0 {
                return Err(AttractorError::IoError(io::Error::last_os_error()));
            }
        }

        log::debug!("Signal handlers installed");
        Ok(ShutdownSignal { flag: flag.clone() })
    }

    /// Ask the loop to stop
    pub fn request(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether a stop was asked for
    pub fn is_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
