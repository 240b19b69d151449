use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RecordingStatus {
    #[default]
    NeverStarted,
    Recording,
    Stopped,
    Playing,
}

impl RecordingStatus {
    pub fn label(self) -> &'static str {
        match self {
            RecordingStatus::NeverStarted => "Never Started",
            RecordingStatus::Recording => "Recording",
            RecordingStatus::Stopped => "Stopped",
            RecordingStatus::Playing => "Playing",
        }
    }

    fn is_busy(self) -> bool {
        matches!(self, RecordingStatus::Recording | RecordingStatus::Playing)
    }

    pub fn can_start_recording(self) -> bool {
        !self.is_busy()
    }

    pub fn can_stop_recording(self) -> bool {
        self == RecordingStatus::Recording
    }

    pub fn can_start_playback(self) -> bool {
        !self.is_busy()
    }

    pub fn can_stop_playback(self) -> bool {
        self == RecordingStatus::Playing
    }
}

/// Body of `GET /recording/status`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingState {
    pub status: RecordingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recording_blocks_playback() {
        let status = RecordingStatus::Recording;
        assert!(!status.can_start_playback());
        assert!(!status.can_start_recording());
        assert!(status.can_stop_recording());
        assert!(!status.can_stop_playback());
    }

    #[test]
    fn test_playing_blocks_recording() {
        let status = RecordingStatus::Playing;
        assert!(!status.can_start_recording());
        assert!(!status.can_start_playback());
        assert!(status.can_stop_playback());
        assert!(!status.can_stop_recording());
    }

    #[test]
    fn test_idle_states_allow_both_starts() {
        for status in [RecordingStatus::NeverStarted, RecordingStatus::Stopped] {
            assert!(status.can_start_recording());
            assert!(status.can_start_playback());
            assert!(!status.can_stop_recording());
            assert!(!status.can_stop_playback());
        }
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let parsed = serde_json::from_value::<RecordingState>(json!({"status": "Paused"}));
        assert!(parsed.is_err());

        let parsed: RecordingState =
            serde_json::from_value(json!({"status": "Recording", "targetUrl": "http://api"}))
                .unwrap();
        assert_eq!(parsed.status, RecordingStatus::Recording);
        assert_eq!(parsed.target_url.as_deref(), Some("http://api"));
    }
}
