use serde::{Deserialize, Serialize};
use trellis_core::ParseOptions;
use trellis_layout::LayoutKind;
use trellis_render::{RenderOptions, SceneStyle, SvgRenderOptions, ViewportOptions};

/// Everything a host can tune about a viewer session, loadable from JSON.
///
/// Every field has a default, so `{}` is a complete configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Layout used for the first render, by name (`force-directed`, `grid`, `concentric`,
    /// `layered` or one of their aliases).
    pub layout: String,
    pub viewport: ViewportOptions,
    pub style: SceneStyle,
    pub raster: RasterConfig,
    pub allow_dtd: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            layout: LayoutKind::default().as_str().to_string(),
            viewport: ViewportOptions::default(),
            style: SceneStyle::default(),
            raster: RasterConfig::default(),
            allow_dtd: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterConfig {
    pub scale: f32,
    /// CSS-ish color (`white`, `#rgb`, `#rrggbb`, ...). `None` exports with a transparent
    /// background.
    pub background: Option<String>,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
        }
    }
}

impl ViewerConfig {
    pub fn from_json(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            allow_dtd: self.allow_dtd,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            style: self.style.clone(),
            viewport: self.viewport.clone(),
            ..RenderOptions::default()
        }
    }

    pub fn svg_options(&self) -> SvgRenderOptions {
        SvgRenderOptions {
            background: self.raster.background.clone(),
            ..SvgRenderOptions::default()
        }
    }

    #[cfg(feature = "raster")]
    pub fn raster_options(&self) -> crate::raster::RasterOptions {
        crate::raster::RasterOptions {
            scale: self.raster.scale,
            background: self.raster.background.clone(),
            ..crate::raster::RasterOptions::default()
        }
    }
}
