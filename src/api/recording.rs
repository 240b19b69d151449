use super::AdminClient;
use crate::error::ApiResult;
use crate::model::RecordingState;
use reqwest::Method;

impl AdminClient {
    pub async fn recording_status(&self) -> ApiResult<RecordingState> {
        self.get_json("/recording/status", "Failed to fetch recording status")
            .await
    }

    pub async fn start_recording(&self, target_url: &str) -> ApiResult<()> {
        let builder = self
            .request(Method::POST, "/recording/start")
            .query(&[("targetUrl", target_url)]);
        self.send(builder, "Failed to start recording").await?;
        Ok(())
    }

    pub async fn stop_recording(&self) -> ApiResult<()> {
        self.send_empty(Method::POST, "/recording/stop", "Failed to stop recording")
            .await
    }

    pub async fn start_playback(&self) -> ApiResult<()> {
        self.send_empty(
            Method::POST,
            "/recording/playback/start",
            "Failed to start playback",
        )
        .await
    }

    pub async fn stop_playback(&self) -> ApiResult<()> {
        self.send_empty(
            Method::POST,
            "/recording/playback/stop",
            "Failed to stop playback",
        )
        .await
    }
}
