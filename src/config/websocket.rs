//! WebSocket transport configuration

use serde::Deserialize;

use super::error::ValidationError;

/// WebSocket transport configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WebSocketConfig {
    /// Hard cap on inbound frame size in bytes
    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,

    /// Chat messages longer than this are truncated (in characters)
    #[serde(default = "default_max_chat_chars")]
    pub max_chat_chars: usize,
}

impl WebSocketConfig {
    /// Validate WebSocket configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_frame_bytes == 0 {
            return Err(ValidationError::InvalidFrameSize);
        }
        if self.max_chat_chars == 0 {
            return Err(ValidationError::InvalidChatLength);
        }
        Ok(())
    }
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            max_frame_bytes: default_max_frame_bytes(),
            max_chat_chars: default_max_chat_chars(),
        }
    }
}

fn default_max_frame_bytes() -> usize {
    64 * 1024
}

fn default_max_chat_chars() -> usize {
    512
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = WebSocketConfig::default();
        assert_eq!(config.max_frame_bytes, 64 * 1024);
        assert_eq!(config.max_chat_chars, 512);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_frame_size_fails_validation() {
        let config = WebSocketConfig {
            max_frame_bytes: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_chat_length_fails_validation() {
        let config = WebSocketConfig {
            max_chat_chars: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
