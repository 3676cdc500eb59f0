//! Bake settings and their TOML loader.

use serde::{Deserialize, Serialize};
use voxbake_shared::{OrthoBasis, DEFAULT_SIDE_VERTEX_TOLERANCE, ORTHOGONAL_BASIS_COUNT};

use crate::error::{BakeError, BakeResult};

/// Settings for one bake.
///
/// Every field has a default, so a config file only lists what it changes
/// (unknown keys are rejected):
///
/// ```toml
/// rotation_index = 16
/// side_cutout_enabled = true
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BakeConfig {
    /// Index into the 24 orthogonal bases. 0 is no rotation.
    pub rotation_index: u8,
    /// Distance from a cube face within which a vertex counts as lying on it.
    pub side_vertex_tolerance: f32,
    /// Whether side geometry may be culled partially against neighbors.
    pub side_cutout_enabled: bool,
    /// Whether tangents are baked.
    pub tangents_enabled: bool,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            rotation_index: 0,
            side_vertex_tolerance: DEFAULT_SIDE_VERTEX_TOLERANCE,
            side_cutout_enabled: false,
            tangents_enabled: true,
        }
    }
}

impl BakeConfig {
    /// Parses and validates a TOML config.
    ///
    /// # Errors
    ///
    /// [`BakeError::InvalidConfig`] on a parse error or a non-finite tolerance,
    /// [`BakeError::InvalidRotationIndex`] on a rotation index past 23.
    pub fn from_toml_str(source: &str) -> BakeResult<Self> {
        let mut config: Self =
            toml::from_str(source).map_err(|e| BakeError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        config.side_vertex_tolerance = config.side_vertex_tolerance.max(0.0);
        Ok(config)
    }

    /// Checks field ranges.
    ///
    /// # Errors
    ///
    /// See [`BakeConfig::from_toml_str`].
    pub fn validate(&self) -> BakeResult<()> {
        if usize::from(self.rotation_index) >= ORTHOGONAL_BASIS_COUNT {
            return Err(BakeError::InvalidRotationIndex(self.rotation_index));
        }
        if !self.side_vertex_tolerance.is_finite() {
            return Err(BakeError::InvalidConfig(format!(
                "side_vertex_tolerance must be finite, found {}",
                self.side_vertex_tolerance
            )));
        }
        Ok(())
    }

    /// Sets the rotation index.
    #[must_use]
    pub const fn with_rotation_index(mut self, index: u8) -> Self {
        self.rotation_index = index;
        self
    }

    /// Sets the side tolerance, clamped to be non-negative.
    #[must_use]
    pub fn with_side_vertex_tolerance(mut self, tolerance: f32) -> Self {
        self.side_vertex_tolerance = tolerance.max(0.0);
        self
    }

    /// Enables or disables side cutout.
    #[must_use]
    pub const fn with_side_cutout(mut self, enabled: bool) -> Self {
        self.side_cutout_enabled = enabled;
        self
    }

    /// Enables or disables tangent baking.
    #[must_use]
    pub const fn with_tangents(mut self, enabled: bool) -> Self {
        self.tangents_enabled = enabled;
        self
    }

    /// The configured rotation, or `None` if the index is out of range.
    #[must_use]
    pub const fn ortho_basis(&self) -> Option<OrthoBasis> {
        OrthoBasis::from_index(self.rotation_index)
    }

    /// Tolerance as used by the classifier.
    #[inline]
    #[must_use]
    pub fn effective_tolerance(&self) -> f32 {
        self.side_vertex_tolerance.max(0.0)
    }
}
