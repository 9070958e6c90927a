//! Client configuration

/// Channel profile requested from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMode {
    /// Communication profile: every participant publishes and subscribes
    Rtc,
    /// Broadcast profile: hosts publish, the audience only subscribes
    Live,
}

/// Preferred video codec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoCodec {
    /// H.264/AVC
    H264,
    /// VP8
    Vp8,
}

/// Configuration for one RTC client instance
///
/// The `app_id` is the fixed application credential the client is bound to.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Application credential string
    pub app_id: String,

    /// Channel profile
    pub mode: ChannelMode,

    /// Preferred video codec
    pub codec: VideoCodec,
}

impl ClientConfig {
    /// Create a config with the default profile (`Rtc`, H.264)
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            mode: ChannelMode::Rtc,
            codec: VideoCodec::H264,
        }
    }

    /// Set the channel profile
    pub fn mode(mut self, mode: ChannelMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the preferred video codec
    pub fn codec(mut self, codec: VideoCodec) -> Self {
        self.codec = codec;
        self
    }
}

/// Description of the locally captured stream to publish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalStreamSpec {
    /// Capture microphone audio
    pub audio: bool,

    /// Capture camera video
    pub video: bool,

    /// Capture the screen instead of a camera
    pub screen: bool,
}

impl Default for LocalStreamSpec {
    fn default() -> Self {
        Self::audio_only()
    }
}

impl LocalStreamSpec {
    /// Microphone only, no video
    pub fn audio_only() -> Self {
        Self {
            audio: true,
            video: false,
            screen: false,
        }
    }

    /// Enable or disable video capture
    pub fn video(mut self, video: bool) -> Self {
        self.video = video;
        self
    }

    /// Enable or disable screen capture
    pub fn screen(mut self, screen: bool) -> Self {
        self.screen = screen;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::new("app-1");

        assert_eq!(config.app_id, "app-1");
        assert_eq!(config.mode, ChannelMode::Rtc);
        assert_eq!(config.codec, VideoCodec::H264);
    }

    #[test]
    fn test_builder_chaining() {
        let config = ClientConfig::new("app-1")
            .mode(ChannelMode::Live)
            .codec(VideoCodec::Vp8);

        assert_eq!(config.mode, ChannelMode::Live);
        assert_eq!(config.codec, VideoCodec::Vp8);
    }

    #[test]
    fn test_stream_spec_defaults() {
        let spec = LocalStreamSpec::default();

        assert!(spec.audio);
        assert!(!spec.video);
        assert!(!spec.screen);
    }

    #[test]
    fn test_stream_spec_builder() {
        let spec = LocalStreamSpec::audio_only().video(true).screen(true);

        assert!(spec.video);
        assert!(spec.screen);
    }
}
