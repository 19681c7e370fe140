//! Dictation recorder state machine.
//!
//! [`DictationRecorder`] owns the Idle / Recording / Paused lifecycle and
//! the captured clip URI; the platform audio work sits behind
//! [`RecorderBackend`]. Invalid transitions are silent no-ops, stopping
//! always lands in Idle, and a denied microphone permission is terminal
//! for the recorder's lifetime.

use thiserror::Error;

/// Recorder lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecorderState {
    #[default]
    Idle,
    Recording,
    Paused,
}

/// Microphone permission as the backend reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permission {
    #[default]
    Undetermined,
    Granted,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecorderError {
    #[error("microphone permission denied")]
    PermissionDenied,
    #[error("recording failed: {0}")]
    Capture(String),
}

/// Platform audio capture under the recorder.
pub trait RecorderBackend {
    fn permission(&self) -> Permission;
    /// Ask the platform for microphone access. Called at most once per
    /// recorder; afterwards [`permission`](RecorderBackend::permission)
    /// reports the settled answer.
    fn request_permission(&mut self) -> Permission;
    fn begin(&mut self) -> Result<(), String>;
    fn pause(&mut self);
    fn resume(&mut self);
    /// Finalize the capture and return the clip URI.
    fn finish(&mut self) -> Result<String, String>;
    /// Tear the capture down without producing a clip.
    fn discard(&mut self);
}

/// Drives one dictation session for the modal.
pub struct DictationRecorder<B: RecorderBackend> {
    backend: B,
    state: RecorderState,
    clip: Option<String>,
}

impl<B: RecorderBackend> DictationRecorder<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: RecorderState::Idle,
            clip: None,
        }
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    /// URI of the last completed clip, until a new recording starts.
    pub fn clip(&self) -> Option<&str> {
        self.clip.as_deref()
    }

    /// Begin a new recording. Any previously held clip is discarded
    /// without confirmation. No-op when already recording or paused.
    ///
    /// Permission is requested once if still undetermined; a denial
    /// leaves the recorder in Idle and fails every later `start` without
    /// asking again.
    pub fn start(&mut self) -> Result<(), RecorderError> {
        if self.state != RecorderState::Idle {
            return Ok(());
        }
        let permission = match self.backend.permission() {
            Permission::Undetermined => self.backend.request_permission(),
            settled => settled,
        };
        if permission != Permission::Granted {
            return Err(RecorderError::PermissionDenied);
        }
        self.clip = None;
        self.backend.begin().map_err(RecorderError::Capture)?;
        self.state = RecorderState::Recording;
        Ok(())
    }

    /// No-op unless currently recording.
    pub fn pause(&mut self) {
        if self.state == RecorderState::Recording {
            self.backend.pause();
            self.state = RecorderState::Paused;
        }
    }

    /// No-op unless currently paused.
    pub fn resume(&mut self) {
        if self.state == RecorderState::Paused {
            self.backend.resume();
            self.state = RecorderState::Recording;
        }
    }

    /// Stop and keep the clip. Always lands in Idle; the returned URI is
    /// the signal that a clip is ready. `None` when there was nothing to
    /// stop or the backend failed to finalize.
    pub fn stop(&mut self) -> Option<String> {
        if self.state == RecorderState::Idle {
            return None;
        }
        self.state = RecorderState::Idle;
        match self.backend.finish() {
            Ok(uri) => {
                self.clip = Some(uri.clone());
                Some(uri)
            }
            Err(e) => {
                tracing::error!("failed to finalize recording: {e}");
                None
            }
        }
    }

    /// Forced cleanup, e.g. the modal being dismissed mid-recording:
    /// lands in Idle with no clip and no ready signal. Idle is a no-op.
    pub fn abort(&mut self) {
        if self.state != RecorderState::Idle {
            self.backend.discard();
            self.state = RecorderState::Idle;
            self.clip = None;
        }
    }

    /// Drop a held clip without recording a new one.
    pub fn discard_clip(&mut self) {
        self.clip = None;
    }
}

/// Backend that records nothing and returns in-memory clip URIs. Used in
/// tests and on platforms built without the `microphone` feature.
#[derive(Debug, Default)]
pub struct StubRecorder {
    permission: Permission,
    grant_on_request: bool,
    pub permission_requests: u32,
    pub active: bool,
    clips: u32,
}

impl StubRecorder {
    /// Permission undetermined; the first request grants it.
    pub fn granting() -> Self {
        Self {
            grant_on_request: true,
            ..Self::default()
        }
    }

    /// Permission undetermined; the first request denies it.
    pub fn denying() -> Self {
        Self::default()
    }
}

impl RecorderBackend for StubRecorder {
    fn permission(&self) -> Permission {
        self.permission
    }

    fn request_permission(&mut self) -> Permission {
        self.permission_requests += 1;
        self.permission = if self.grant_on_request {
            Permission::Granted
        } else {
            Permission::Denied
        };
        self.permission
    }

    fn begin(&mut self) -> Result<(), String> {
        self.clips += 1;
        self.active = true;
        Ok(())
    }

    fn pause(&mut self) {}

    fn resume(&mut self) {}

    fn finish(&mut self) -> Result<String, String> {
        self.active = false;
        Ok(format!("memory://dictation/{}.wav", self.clips))
    }

    fn discard(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> DictationRecorder<StubRecorder> {
        DictationRecorder::new(StubRecorder::granting())
    }

    #[test]
    fn test_full_cycle_ends_idle_with_clip() {
        let mut rec = recorder();
        assert_eq!(rec.state(), RecorderState::Idle);

        rec.start().unwrap();
        assert_eq!(rec.state(), RecorderState::Recording);

        rec.pause();
        assert_eq!(rec.state(), RecorderState::Paused);

        rec.resume();
        assert_eq!(rec.state(), RecorderState::Recording);

        let uri = rec.stop();
        assert_eq!(rec.state(), RecorderState::Idle);
        assert_eq!(uri.as_deref(), Some("memory://dictation/1.wav"));
        assert_eq!(rec.clip(), Some("memory://dictation/1.wav"));
    }

    #[test]
    fn test_stop_when_idle_is_a_no_op() {
        let mut rec = recorder();
        assert_eq!(rec.stop(), None);
        assert_eq!(rec.state(), RecorderState::Idle);
        assert_eq!(rec.clip(), None);
    }

    #[test]
    fn test_stop_from_paused_still_produces_clip() {
        let mut rec = recorder();
        rec.start().unwrap();
        rec.pause();
        assert!(rec.stop().is_some());
        assert_eq!(rec.state(), RecorderState::Idle);
    }

    #[test]
    fn test_pause_resume_outside_valid_states_are_no_ops() {
        let mut rec = recorder();
        rec.pause();
        rec.resume();
        assert_eq!(rec.state(), RecorderState::Idle);

        rec.start().unwrap();
        rec.resume();
        assert_eq!(rec.state(), RecorderState::Recording);

        rec.pause();
        rec.pause();
        assert_eq!(rec.state(), RecorderState::Paused);
    }

    #[test]
    fn test_denied_permission_is_terminal_and_asked_once() {
        let mut rec = DictationRecorder::new(StubRecorder::denying());

        assert_eq!(rec.start(), Err(RecorderError::PermissionDenied));
        assert_eq!(rec.state(), RecorderState::Idle);

        // A second attempt fails again without a new permission prompt.
        assert_eq!(rec.start(), Err(RecorderError::PermissionDenied));
        assert_eq!(rec.backend.permission_requests, 1);
        assert!(!rec.backend.active);
    }

    #[test]
    fn test_permission_requested_once_when_granted() {
        let mut rec = recorder();
        rec.start().unwrap();
        rec.stop();
        rec.start().unwrap();
        assert_eq!(rec.backend.permission_requests, 1);
    }

    #[test]
    fn test_new_recording_discards_prior_clip() {
        let mut rec = recorder();
        rec.start().unwrap();
        let first = rec.stop().unwrap();

        rec.start().unwrap();
        // The old clip is gone as soon as the new recording starts.
        assert_eq!(rec.clip(), None);

        let second = rec.stop().unwrap();
        assert_ne!(first, second);
        assert_eq!(rec.clip(), Some(second.as_str()));
    }

    #[test]
    fn test_abort_lands_idle_without_clip() {
        let mut rec = recorder();
        rec.start().unwrap();
        rec.abort();

        assert_eq!(rec.state(), RecorderState::Idle);
        assert_eq!(rec.clip(), None);
        assert!(!rec.backend.active);
    }

    #[test]
    fn test_abort_when_idle_keeps_held_clip() {
        let mut rec = recorder();
        rec.start().unwrap();
        rec.stop().unwrap();

        rec.abort();
        assert!(rec.clip().is_some());
    }

    #[test]
    fn test_discard_clip() {
        let mut rec = recorder();
        rec.start().unwrap();
        rec.stop().unwrap();
        rec.discard_clip();
        assert_eq!(rec.clip(), None);
    }
}
