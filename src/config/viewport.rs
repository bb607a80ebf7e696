use crate::config::ConfigError;
use crate::domain::core::Insets;
use crate::domain::viewport::ViewportBand;
use serde::Deserialize;

/// User-facing configuration for the "in view" band
///
/// Each inset is a fraction of the viewport removed from that side. The
/// default removes the bottom half, so a section becomes active once its
/// leading edge crosses into the top half of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewportConfig {
    pub top_inset: f64,
    pub right_inset: f64,
    pub bottom_inset: f64,
    pub left_inset: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            top_inset: 0.0,
            right_inset: 0.0,
            bottom_inset: Self::DEFAULT_BOTTOM_INSET,
            left_inset: 0.0,
        }
    }
}

impl ViewportConfig {
    pub const DEFAULT_BOTTOM_INSET: f64 = 0.5;
    pub const MAX_INSET: f64 = 0.95;
    /// Smallest share of the viewport the band may keep on either axis
    pub const MIN_BAND: f64 = 0.05;

    pub fn sanitize_inset(value: f64) -> f64 {
        if value.is_nan() {
            return 0.0;
        }
        value.clamp(0.0, Self::MAX_INSET)
    }

    /// Clamps every inset into range and checks the band is not collapsed
    pub fn sanitized(&self) -> Result<Self, ConfigError> {
        let sanitized = Self {
            top_inset: Self::sanitize_inset(self.top_inset),
            right_inset: Self::sanitize_inset(self.right_inset),
            bottom_inset: Self::sanitize_inset(self.bottom_inset),
            left_inset: Self::sanitize_inset(self.left_inset),
        };

        let vertical = 1.0 - sanitized.top_inset - sanitized.bottom_inset;
        if vertical < Self::MIN_BAND {
            return Err(ConfigError::InvalidBand {
                axis: "vertical",
                remaining: vertical,
            });
        }
        let horizontal = 1.0 - sanitized.left_inset - sanitized.right_inset;
        if horizontal < Self::MIN_BAND {
            return Err(ConfigError::InvalidBand {
                axis: "horizontal",
                remaining: horizontal,
            });
        }

        Ok(sanitized)
    }

    pub fn band(&self) -> Result<ViewportBand, ConfigError> {
        let cfg = self.sanitized()?;
        Ok(ViewportBand::new(Insets::new(
            cfg.top_inset,
            cfg.right_inset,
            cfg.bottom_inset,
            cfg.left_inset,
        )))
    }
}
