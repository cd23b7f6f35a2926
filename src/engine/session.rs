//! Session State Machine
//!
//! Tracks one timed listening session as an explicit value object with the
//! transitions Idle -> Playing -> Paused -> Playing -> Stopped -> Idle.
//! The controller owns the countdown and volume; the actual audio device is
//! a collaborator outside this crate that mirrors these transitions.

use std::fmt;

use log::debug;

use crate::engine::renderer::SessionParams;
use crate::error::Result;

/// Session states for a timed playback run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No session loaded (default state)
    #[default]
    Idle,
    /// Session running, countdown active
    Playing,
    /// Session suspended, countdown frozen
    Paused,
    /// Session ended, by request or by the countdown reaching zero
    Stopped,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "Idle"),
            SessionState::Playing => write!(f, "Playing"),
            SessionState::Paused => write!(f, "Paused"),
            SessionState::Stopped => write!(f, "Stopped"),
        }
    }
}

/// Format whole seconds as `MM:SS` for countdown display
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Manages session state, remaining time and live volume
///
/// Every transition goes through a method; illegal moves are no-ops. The
/// state value is the single source of truth for whether a session is
/// active and how much time it has left.
///
/// # Example
/// ```
/// use entrain::engine::{SessionController, SessionParams, SessionState};
///
/// let mut session = SessionController::new();
/// session.start(&SessionParams::new(200.0, 5.0, 120.0, 0.8)).unwrap();
/// assert!(session.is_playing());
/// assert_eq!(session.formatted_remaining(), "02:00");
///
/// session.pause();
/// assert_eq!(session.state(), SessionState::Paused);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionController {
    /// Current session state
    state: SessionState,

    /// Whole seconds left on the countdown
    remaining_secs: u64,

    /// Live output volume in [0.0, 1.0]
    volume: f32,
}

impl SessionController {
    /// Create a controller with no session loaded
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Start a new session from the given parameters
    ///
    /// State transitions: Idle -> Playing, Stopped -> Playing. A session
    /// that is already Playing or Paused is left untouched; pausing and
    /// resuming go through [`pause`](Self::pause)/[`resume`](Self::resume).
    ///
    /// The countdown starts at `duration_secs` rounded up to whole seconds,
    /// and the live volume is taken from the parameters.
    ///
    /// # Errors
    /// `InvalidParameter` if the parameters fail validation; the controller
    /// state is unchanged in that case.
    pub fn start(&mut self, params: &SessionParams) -> Result<()> {
        params.validate()?;

        match self.state {
            SessionState::Idle | SessionState::Stopped => {
                self.remaining_secs = params.duration_secs.ceil() as u64;
                self.volume = params.volume;
                self.state = SessionState::Playing;
                debug!(
                    "[SESSION] Started: {}s at volume {:.2}",
                    self.remaining_secs, self.volume
                );
            }
            SessionState::Playing | SessionState::Paused => {
                debug!("[SESSION] Start ignored: session already active");
            }
        }

        Ok(())
    }

    /// Suspend a running session
    ///
    /// State transition: Playing -> Paused. The countdown freezes. Any
    /// other state is a no-op.
    pub fn pause(&mut self) {
        match self.state {
            SessionState::Playing => {
                self.state = SessionState::Paused;
                debug!(
                    "[SESSION] Paused with {} remaining",
                    format_time(self.remaining_secs)
                );
            }
            _ => debug!("[SESSION] Pause ignored in state {}", self.state),
        }
    }

    /// Resume a suspended session
    ///
    /// State transition: Paused -> Playing. The countdown continues from
    /// where it froze. Any other state is a no-op.
    pub fn resume(&mut self) {
        match self.state {
            SessionState::Paused => {
                self.state = SessionState::Playing;
                debug!(
                    "[SESSION] Resumed with {} remaining",
                    format_time(self.remaining_secs)
                );
            }
            _ => debug!("[SESSION] Resume ignored in state {}", self.state),
        }
    }

    /// End the session and clear the countdown
    ///
    /// State transitions: Playing -> Stopped, Paused -> Stopped. Idle and
    /// Stopped are no-ops.
    pub fn stop(&mut self) {
        match self.state {
            SessionState::Playing | SessionState::Paused => {
                self.state = SessionState::Stopped;
                self.remaining_secs = 0;
                debug!("[SESSION] Stopped");
            }
            _ => debug!("[SESSION] Stop ignored in state {}", self.state),
        }
    }

    /// Return a finished controller to Idle
    ///
    /// State transition: Stopped -> Idle. Other states are no-ops; an
    /// active session must be stopped first.
    pub fn reset(&mut self) {
        if self.state == SessionState::Stopped {
            self.state = SessionState::Idle;
            self.volume = 0.0;
            debug!("[SESSION] Reset to idle");
        }
    }

    /// Advance the countdown by one second
    ///
    /// Only a Playing session ticks. When the countdown reaches zero the
    /// session transitions to Stopped.
    ///
    /// # Returns
    /// The state after the tick.
    pub fn tick(&mut self) -> SessionState {
        if self.state == SessionState::Playing {
            self.remaining_secs = self.remaining_secs.saturating_sub(1);
            if self.remaining_secs == 0 {
                self.state = SessionState::Stopped;
                debug!("[SESSION] Countdown complete");
            }
        }
        self.state
    }

    /// Adjust the live output volume while a session is active
    ///
    /// Applies immediately when Playing or Paused, clamped to [0.0, 1.0].
    /// Ignored when no session is active; exports always take their volume
    /// from `SessionParams` instead.
    pub fn set_volume(&mut self, volume: f32) {
        match self.state {
            SessionState::Playing | SessionState::Paused => {
                self.volume = volume.clamp(0.0, 1.0);
                debug!("[SESSION] Volume set to {:.2}", self.volume);
            }
            _ => debug!("[SESSION] Volume change ignored in state {}", self.state),
        }
    }

    // ========================================================================
    // State Queries
    // ========================================================================

    /// Get the current session state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Check if a session is currently playing
    pub fn is_playing(&self) -> bool {
        self.state == SessionState::Playing
    }

    /// Check if a session is currently paused
    pub fn is_paused(&self) -> bool {
        self.state == SessionState::Paused
    }

    /// Whole seconds left on the countdown
    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    /// Remaining time formatted as `MM:SS`
    pub fn formatted_remaining(&self) -> String {
        format_time(self.remaining_secs)
    }

    /// Current live volume
    pub fn volume(&self) -> f32 {
        self.volume
    }
}

// ============================================================================
// Tests
// ============================================================================
