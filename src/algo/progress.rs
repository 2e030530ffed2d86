//! Progress reporting for the straightening pipeline.
//!
//! The pipeline reports once before the first island and once after each
//! processed island, so a host can drive a progress bar without knowing
//! how islands are found.
//!
//! ```
//! use seamline::algo::Progress;
//!
//! let progress = Progress::new(|done, total, message| {
//!     eprintln!("[{}/{}] {}", done, total, message);
//! });
//! progress.report(0, 3, "straightening");
//! ```

/// A progress callback.
///
/// The callback receives the number of finished work units, the total
/// number of units and a short description of the current stage.
pub struct Progress {
    callback: Box<dyn Fn(usize, usize, &str) + Send + Sync>,
}

impl Progress {
    /// Create a progress reporter with the given callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(usize, usize, &str) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    /// Forward every update to the `log` facade at debug level.
    pub fn logged() -> Self {
        Self::new(|done, total, message| {
            log::debug!("{}: {}/{}", message, done, total);
        })
    }

    /// A reporter that discards all updates.
    pub fn none() -> Self {
        Self::new(|_, _, _| {})
    }

    /// Report progress.
    #[inline]
    pub fn report(&self, done: usize, total: usize, message: &str) {
        (self.callback)(done, total, message);
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_callback_receives_updates() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let progress = Progress::new(move |done, total, msg| {
            sink.lock().unwrap().push((done, total, msg.to_string()));
        });

        progress.report(1, 4, "island");
        progress.report(4, 4, "island");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1], (4, 4, "island".to_string()));
    }

    #[test]
    fn test_logged_and_silent_reporters() {
        // Neither reporter needs a logger installed
        Progress::logged().report(2, 3, "straightening");
        Progress::none().report(2, 3, "straightening");
        assert_eq!(format!("{:?}", Progress::default()), "Progress { .. }");
    }
}
