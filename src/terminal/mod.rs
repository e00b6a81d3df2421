//! Terminal handling for the keyboard attractor
//!
//! This module handles the controlling terminal:
//! - Switching stdin between cooked and raw (non-canonical, no echo) mode
//! - Zero-timeout readiness checks and single byte reads on stdin
//! - Shutdown requests coming from process signals

mod signals;

pub use signals::*;

use crate::console::KeySource;
use crate::AttractorError;
use std::io;
use std::os::unix::io::RawFd;

/// Keeps stdin in raw mode for as long as it is alive.
///
/// Cooked mode (canonical input and echo) is restored by `restore` or on drop,
/// whichever comes first, so early returns and panics cannot skip it.
pub struct RawModeGuard {
    fd: RawFd,
    original: libc::termios,
    restored: bool,
}

impl RawModeGuard {
    /// Put stdin in raw mode
    pub fn enable_stdin() -> Result<Self, AttractorError> {
        Self::enable(libc::STDIN_FILENO)
    }

    /// Disable canonical input and echo on `fd`, one byte minimum per read
    pub fn enable(fd: RawFd) -> Result<Self, AttractorError> {
        let original = get_attributes(fd)?;

        let mut raw = original;
        raw.c_lflag &= !(libc::ICANON | libc::ECHO);
        raw.c_cc[libc::VMIN] = 1;
        set_attributes(fd, &raw)?;

        log::debug!("Raw mode enabled on fd {}", fd);
        Ok(RawModeGuard {
            fd,
            original,
            restored: false,
        })
    }

    /// Re-enable canonical input and echo. Later calls do nothing.
    pub fn restore(&mut self) -> Result<(), AttractorError> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        let mut cooked = self.original;
        cooked.c_lflag |= libc::ICANON | libc::ECHO;
        set_attributes(self.fd, &cooked)?;

        log::debug!("Cooked mode restored on fd {}", self.fd);
        Ok(())
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("Failed to restore terminal: {}", e);
        }
    }
}

fn get_attributes(fd: RawFd) -> Result<libc::termios, AttractorError> {
    // SAFETY: termios is plain old data and tcgetattr fully initialises it on success.
    let mut attributes: libc::termios = unsafe { std::mem::zeroed() };
    if unsafe { libc::tcgetattr(fd, &mut attributes) } != 0 {
        return Err(AttractorError::TerminalError(format!(
            "tcgetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    Ok(attributes)
}

fn set_attributes(fd: RawFd, attributes: &libc::termios) -> Result<(), AttractorError> {
    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, attributes) } != 0 {
        return Err(AttractorError::TerminalError(format!(
            "tcsetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    Ok(())
}

/// Whether `fd` has a byte available right now. Never waits.
///
/// A failed check counts as not ready.
pub fn poll_ready(fd: RawFd) -> bool {
    let mut pollfd = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let n = unsafe { libc::poll(&mut pollfd, 1, 0) };
    n > 0 && (pollfd.revents & libc::POLLIN) != 0
}

/// Read exactly one byte from `fd`.
///
/// Goes straight to the descriptor: std's buffered stdin would pull every
/// queued byte out of the kernel and hide them from `poll_ready`.
pub fn read_byte(fd: RawFd) -> io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        let n = unsafe { libc::read(fd, byte.as_mut_ptr() as *mut libc::c_void, 1) };
        if n == 1 {
            return Ok(Some(byte[0]));
        }
        if n == 0 {
            return Ok(None);
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}

/// Keyboard input from stdin
pub struct StdinKeys {
    fd: RawFd,
}

impl StdinKeys {
    /// Read keys from the process's stdin
    pub fn new() -> Self {
        Self::from_fd(libc::STDIN_FILENO)
    }

    /// Read keys from an arbitrary descriptor
    pub fn from_fd(fd: RawFd) -> Self {
        StdinKeys { fd }
    }
}

impl Default for StdinKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySource for StdinKeys {
    fn poll_ready(&mut self) -> bool {
        poll_ready(self.fd)
    }

    fn read_key(&mut self) -> Option<u8> {
        match read_byte(self.fd) {
            Ok(byte) => byte,
            Err(e) => {
                log::warn!("Failed to read key: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipe() -> (RawFd, RawFd) {
        let mut fds = [0 as RawFd; 2];
        assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);
        (fds[0], fds[1])
    }

    fn write_all(fd: RawFd, bytes: &[u8]) {
        let n = unsafe { libc::write(fd, bytes.as_ptr() as *const libc::c_void, bytes.len()) };
        assert_eq!(n as usize, bytes.len());
    }

    fn close(fd: RawFd) {
        unsafe { libc::close(fd) };
    }

    #[test]
    fn test_empty_pipe_is_not_ready() {
        let (read_fd, write_fd) = pipe();

        assert!(!poll_ready(read_fd));

        close(read_fd);
        close(write_fd);
    }

    #[test]
    fn test_reads_one_byte_at_a_time() {
        let (read_fd, write_fd) = pipe();
        write_all(write_fd, b"wq");

        let mut keys = StdinKeys::from_fd(read_fd);
        assert!(keys.poll_ready());
        assert_eq!(keys.read_key(), Some(b'w'));
        assert!(keys.poll_ready());
        assert_eq!(keys.read_key(), Some(b'q'));
        assert!(!keys.poll_ready());

        close(read_fd);
        close(write_fd);
    }

    #[test]
    fn test_closed_writer_reads_nothing() {
        let (read_fd, write_fd) = pipe();
        close(write_fd);

        assert_eq!(read_byte(read_fd).unwrap(), None);

        close(read_fd);
    }

    #[test]
    fn test_invalid_descriptor_is_not_ready() {
        assert!(!poll_ready(-1));
    }

    #[test]
    fn test_raw_mode_on_non_terminal_fails() {
        let (read_fd, write_fd) = pipe();

        let err = RawModeGuard::enable(read_fd).err().unwrap();
        assert!(matches!(err, AttractorError::TerminalError(_)));

        close(read_fd);
        close(write_fd);
    }
}
