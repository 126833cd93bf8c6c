//! Application lifecycle state machine
//!
//! ```text
//! Uninitialized ──► Running ──► ShuttingDown ──► Terminated
//!       │                                            ▲
//!       └────────────── (startup failure) ───────────┘
//! ```

use thiserror::Error;

/// Lifecycle states of the bootstrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Uninitialized,
    Running,
    ShuttingDown,
    Terminated,
}

impl LifecycleState {
    /// Returns true if `next` is a legal successor of this state
    pub fn can_transition_to(self, next: LifecycleState) -> bool {
        use LifecycleState::*;

        match (self, next) {
            (Uninitialized, Running) => true,
            (Uninitialized, Terminated) => true,
            (Running, ShuttingDown) => true,
            (ShuttingDown, Terminated) => true,
            (Uninitialized | Running | ShuttingDown | Terminated, _) => false,
        }
    }

    /// Returns true for the terminal state
    pub fn is_terminal(self) -> bool {
        matches!(self, LifecycleState::Terminated)
    }
}

/// Why the main loop is shutting down
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownReason {
    /// The window manager asked the window to close
    CloseRequested,
    /// The user pressed Escape
    EscapePressed,
    /// The configured frame limit was reached
    FrameLimitReached,
    /// An unrecoverable error occurred
    Fatal(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("invalid lifecycle transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: LifecycleState,
        to: LifecycleState,
    },
}

/// Tracks the current state and the reason for shutting down
#[derive(Debug, Default)]
pub struct Lifecycle {
    state: LifecycleState,
    shutdown_reason: Option<ShutdownReason>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LifecycleState::Running
    }

    pub fn shutdown_reason(&self) -> Option<&ShutdownReason> {
        self.shutdown_reason.as_ref()
    }

    fn transition(&mut self, to: LifecycleState) -> Result<(), LifecycleError> {
        if !self.state.can_transition_to(to) {
            return Err(LifecycleError::InvalidTransition {
                from: self.state,
                to,
            });
        }

        tracing::debug!(from = ?self.state, ?to, "Lifecycle transition");
        self.state = to;
        Ok(())
    }

    /// Startup finished, the loop is live
    pub fn start(&mut self) -> Result<(), LifecycleError> {
        self.transition(LifecycleState::Running)
    }

    /// Begins shutting down; only valid while running
    pub fn request_shutdown(&mut self, reason: ShutdownReason) -> Result<(), LifecycleError> {
        self.transition(LifecycleState::ShuttingDown)?;
        self.shutdown_reason = Some(reason);
        Ok(())
    }

    /// Startup failed before the loop went live
    pub fn abort_startup(&mut self, reason: ShutdownReason) -> Result<(), LifecycleError> {
        if self.state != LifecycleState::Uninitialized {
            return Err(LifecycleError::InvalidTransition {
                from: self.state,
                to: LifecycleState::Terminated,
            });
        }
        self.transition(LifecycleState::Terminated)?;
        self.shutdown_reason = Some(reason);
        Ok(())
    }

    /// Resources are released; no further transitions are possible
    pub fn terminate(&mut self) -> Result<(), LifecycleError> {
        self.transition(LifecycleState::Terminated)
    }
}

/// Lifecycle plus the pending close request
///
/// Close requests only set a flag. The flag is acted on by [`begin_iteration`]
/// at the top of the next loop iteration, so the current frame always finishes.
///
/// [`begin_iteration`]: LoopControl::begin_iteration
#[derive(Debug, Default)]
pub struct LoopControl {
    lifecycle: Lifecycle,
    close_requested: Option<ShutdownReason>,
}

impl LoopControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle.is_running()
    }

    pub fn pending_close(&self) -> Option<&ShutdownReason> {
        self.close_requested.as_ref()
    }

    /// Flags the loop for shutdown; the first reason wins
    ///
    /// Returns false if a close was already pending.
    pub fn request_close(&mut self, reason: ShutdownReason) -> bool {
        if self.close_requested.is_some() {
            return false;
        }
        tracing::debug!(?reason, "Close requested");
        self.close_requested = Some(reason);
        true
    }

    pub fn start(&mut self) -> Result<(), LifecycleError> {
        self.lifecycle.start()
    }

    /// Acts on a pending close request while running
    ///
    /// Returns the reason when the loop must stop; the lifecycle is then
    /// `ShuttingDown`.
    pub fn begin_iteration(&mut self) -> Option<ShutdownReason> {
        if !self.lifecycle.is_running() {
            return None;
        }

        let reason = self.close_requested.take()?;
        match self.lifecycle.request_shutdown(reason.clone()) {
            Ok(()) => Some(reason),
            Err(e) => {
                tracing::warn!(error = %e, "Lifecycle transition rejected");
                None
            }
        }
    }

    /// Records a fatal error in whatever phase the loop is in
    pub fn fail(&mut self, message: impl Into<String>) {
        let reason = ShutdownReason::Fatal(message.into());

        let result = match self.lifecycle.state() {
            LifecycleState::Uninitialized => self.lifecycle.abort_startup(reason),
            LifecycleState::Running => self.lifecycle.request_shutdown(reason),
            LifecycleState::ShuttingDown | LifecycleState::Terminated => Ok(()),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "Lifecycle transition rejected");
        }
    }

    /// The event loop is exiting; ends in `Terminated` unless startup never ran
    pub fn exit(&mut self) {
        let result = match self.lifecycle.state() {
            LifecycleState::ShuttingDown => self.lifecycle.terminate(),
            LifecycleState::Running => {
                let reason = self
                    .close_requested
                    .take()
                    .unwrap_or(ShutdownReason::CloseRequested);
                self.lifecycle
                    .request_shutdown(reason)
                    .and_then(|()| self.lifecycle.terminate())
            }
            LifecycleState::Uninitialized | LifecycleState::Terminated => Ok(()),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "Lifecycle transition rejected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LifecycleState::*;

    const ALL: [LifecycleState; 4] = [Uninitialized, Running, ShuttingDown, Terminated];

    #[test]
    fn test_happy_path() {
        let mut lifecycle = Lifecycle::new();
        assert_eq!(lifecycle.state(), Uninitialized);

        lifecycle.start().unwrap();
        assert!(lifecycle.is_running());

        lifecycle
            .request_shutdown(ShutdownReason::CloseRequested)
            .unwrap();
        assert_eq!(lifecycle.state(), ShuttingDown);
        assert_eq!(
            lifecycle.shutdown_reason(),
            Some(&ShutdownReason::CloseRequested)
        );

        lifecycle.terminate().unwrap();
        assert!(lifecycle.state().is_terminal());
    }

    #[test]
    fn test_shutting_down_only_from_running() {
        for from in ALL {
            assert_eq!(from.can_transition_to(ShuttingDown), from == Running);
        }
    }

    #[test]
    fn test_terminated_is_terminal() {
        for to in ALL {
            assert!(!Terminated.can_transition_to(to));
        }
    }

    #[test]
    fn test_shutdown_before_start_is_rejected() {
        let mut lifecycle = Lifecycle::new();
        let err = lifecycle
            .request_shutdown(ShutdownReason::EscapePressed)
            .unwrap_err();
        assert_eq!(
            err,
            LifecycleError::InvalidTransition {
                from: Uninitialized,
                to: ShuttingDown
            }
        );
        assert!(lifecycle.shutdown_reason().is_none());
    }

    #[test]
    fn test_double_shutdown_keeps_first_reason() {
        let mut lifecycle = Lifecycle::new();
        lifecycle.start().unwrap();
        lifecycle
            .request_shutdown(ShutdownReason::EscapePressed)
            .unwrap();
        assert!(
            lifecycle
                .request_shutdown(ShutdownReason::CloseRequested)
                .is_err()
        );
        assert_eq!(
            lifecycle.shutdown_reason(),
            Some(&ShutdownReason::EscapePressed)
        );
    }

    #[test]
    fn test_abort_startup() {
        let mut lifecycle = Lifecycle::new();
        lifecycle
            .abort_startup(ShutdownReason::Fatal("no adapter".into()))
            .unwrap();
        assert_eq!(lifecycle.state(), Terminated);

        let mut running = Lifecycle::new();
        running.start().unwrap();
        assert!(
            running
                .abort_startup(ShutdownReason::Fatal("late".into()))
                .is_err()
        );
        assert!(running.is_running());
    }

    #[test]
    fn test_cannot_restart() {
        let mut lifecycle = Lifecycle::new();
        lifecycle.start().unwrap();
        assert!(lifecycle.start().is_err());
    }

    fn running() -> LoopControl {
        let mut control = LoopControl::new();
        control.start().unwrap();
        control
    }

    #[test]
    fn test_close_waits_for_next_iteration() {
        let mut control = running();
        assert!(control.request_close(ShutdownReason::CloseRequested));

        // Still running until the loop comes around
        assert!(control.is_running());
        assert_eq!(
            control.pending_close(),
            Some(&ShutdownReason::CloseRequested)
        );

        assert_eq!(
            control.begin_iteration(),
            Some(ShutdownReason::CloseRequested)
        );
        assert_eq!(control.state(), ShuttingDown);
        assert!(control.pending_close().is_none());
        assert_eq!(control.begin_iteration(), None);
    }

    #[test]
    fn test_iteration_without_request_keeps_running() {
        let mut control = running();
        assert_eq!(control.begin_iteration(), None);
        assert!(control.is_running());
    }

    #[test]
    fn test_first_close_reason_wins() {
        let mut control = running();
        assert!(control.request_close(ShutdownReason::EscapePressed));
        assert!(!control.request_close(ShutdownReason::CloseRequested));
        assert!(!control.request_close(ShutdownReason::FrameLimitReached));

        control.begin_iteration();
        assert_eq!(
            control.lifecycle().shutdown_reason(),
            Some(&ShutdownReason::EscapePressed)
        );
    }

    #[test]
    fn test_close_before_start_is_held() {
        let mut control = LoopControl::new();
        control.request_close(ShutdownReason::CloseRequested);
        assert_eq!(control.begin_iteration(), None);
        assert_eq!(control.state(), Uninitialized);

        control.start().unwrap();
        assert_eq!(
            control.begin_iteration(),
            Some(ShutdownReason::CloseRequested)
        );
    }

    #[test]
    fn test_fail_during_startup_terminates() {
        let mut control = LoopControl::new();
        control.fail("no adapter");
        assert_eq!(control.state(), Terminated);
        assert_eq!(
            control.lifecycle().shutdown_reason(),
            Some(&ShutdownReason::Fatal("no adapter".into()))
        );

        // Exiting afterwards is a no-op
        control.exit();
        assert_eq!(control.state(), Terminated);
    }

    #[test]
    fn test_fail_while_running_shuts_down() {
        let mut control = running();
        control.fail("out of memory");
        assert_eq!(control.state(), ShuttingDown);

        control.exit();
        assert_eq!(control.state(), Terminated);
        assert_eq!(
            control.lifecycle().shutdown_reason(),
            Some(&ShutdownReason::Fatal("out of memory".into()))
        );
    }

    #[test]
    fn test_fail_after_close_keeps_close_reason() {
        let mut control = running();
        control.request_close(ShutdownReason::EscapePressed);
        control.begin_iteration();
        control.fail("late");
        assert_eq!(
            control.lifecycle().shutdown_reason(),
            Some(&ShutdownReason::EscapePressed)
        );
    }

    #[test]
    fn test_exit_while_running_terminates() {
        let mut control = running();
        control.exit();
        assert_eq!(control.state(), Terminated);
        assert_eq!(
            control.lifecycle().shutdown_reason(),
            Some(&ShutdownReason::CloseRequested)
        );

        let mut control = running();
        control.request_close(ShutdownReason::FrameLimitReached);
        control.exit();
        assert_eq!(
            control.lifecycle().shutdown_reason(),
            Some(&ShutdownReason::FrameLimitReached)
        );
    }

    #[test]
    fn test_exit_before_start_stays_uninitialized() {
        let mut control = LoopControl::new();
        control.exit();
        assert_eq!(control.state(), Uninitialized);
    }
}
