use crate::buffer::RGBA_CHANNELS;
use crate::grayscale::GrayscaleMode;
use crate::kernel::KernelPreset;

/// Configuration for a full transform pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Geometry
    pub flip_x: bool,            // default false
    pub flip_y: bool,            // default false

    /// Tone, in percent (0-100)
    pub darken: u32,             // default 0
    pub lighten: u32,            // default 0

    /// Grayscale
    pub grayscale: Option<GrayscaleMode>, // default Some(Luma)
    pub split_count: usize,      // 1 = sequential, default 5

    /// Convolution
    pub kernel: Option<KernelPreset>,     // default Some(SobelX)
    pub channels: Vec<usize>,    // channels to filter, default [0, 1, 2]
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            // Geometry
            flip_x: false,
            flip_y: false,

            // Tone
            darken: 0,
            lighten: 0,

            // Grayscale
            grayscale: Some(GrayscaleMode::Luma),
            split_count: 5,

            // Convolution
            kernel: Some(KernelPreset::SobelX),
            channels: vec![0, 1, 2],
        }
    }
}

impl PipelineConfig {
    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.darken > 100 {
            return Err(format!("darken must be between 0 and 100, got {}", self.darken));
        }
        if self.lighten > 100 {
            return Err(format!("lighten must be between 0 and 100, got {}", self.lighten));
        }
        if self.split_count == 0 {
            return Err("split_count must be at least 1".to_string());
        }
        if let Some(&channel) = self.channels.iter().find(|&&c| c >= RGBA_CHANNELS) {
            return Err(format!(
                "channel must be below {}, got {}",
                RGBA_CHANNELS, channel
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_percentages() {
        let mut config = PipelineConfig::default();
        config.darken = 101;
        assert!(config.validate().is_err());

        config.darken = 0;
        config.lighten = 150;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_split_count() {
        let config = PipelineConfig {
            split_count: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_channel() {
        let config = PipelineConfig {
            channels: vec![0, 4],
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err("channel must be below 4, got 4".to_string())
        );
    }
}
