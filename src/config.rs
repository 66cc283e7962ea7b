//! Canvas construction options
//!
//! Options can be built in code or loaded from JSON; every field has a
//! default so partial documents are accepted.

use serde::{Deserialize, Serialize};
use std::ops::BitOr;
use std::path::Path;

use crate::color::Color;
use crate::error::CanvasResult;
use crate::types::CanvasSize;

/// Default inset, in canvas units, on every canvas edge
pub const DEFAULT_BORDER: u32 = 100;

/// Construction flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanvasFlags(pub u32);

impl CanvasFlags {
    pub const NONE: CanvasFlags = CanvasFlags(0);
    /// Map the region onto the full canvas with no border inset
    pub const OMIT_BORDERS: CanvasFlags = CanvasFlags(1);
    /// Real space is Y-up; flip it onto the Y-down canvas
    pub const FLIP_Y: CanvasFlags = CanvasFlags(2);

    pub fn contains(self, other: CanvasFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for CanvasFlags {
    type Output = CanvasFlags;

    fn bitor(self, rhs: CanvasFlags) -> CanvasFlags {
        CanvasFlags(self.0 | rhs.0)
    }
}

/// Enclosing document around the SVG content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostFrame {
    /// Standalone SVG file
    Svg,
    /// SVG embedded in a minimal HTML page
    Html,
}

impl HostFrame {
    /// Pick the frame from the destination's extension (`.html`/`.htm` wrap)
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm") => HostFrame::Html,
            _ => HostFrame::Svg,
        }
    }
}

/// Options fixed at canvas construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub canvas_size: CanvasSize,
    pub background: Color,
    pub border: u32,
    pub flags: CanvasFlags,
    /// `None` lets the destination decide (file extension, or bare SVG for writers)
    pub frame: Option<HostFrame>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            canvas_size: CanvasSize::default(),
            background: Color::default(),
            border: DEFAULT_BORDER,
            flags: CanvasFlags::NONE,
            frame: None,
        }
    }
}

impl CanvasConfig {
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn with_canvas_size(mut self, width: u32, height: u32) -> Self {
        self.canvas_size = CanvasSize::new(width, height);
        self
    }

    pub fn with_background(mut self, background: impl Into<Color>) -> Self {
        self.background = background.into();
        self
    }

    pub fn with_border(mut self, border: u32) -> Self {
        self.border = border;
        self
    }

    pub fn with_flags(mut self, flags: CanvasFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_frame(mut self, frame: HostFrame) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Border actually applied, honoring `OMIT_BORDERS`
    pub fn effective_border(&self) -> u32 {
        if self.flags.contains(CanvasFlags::OMIT_BORDERS) {
            0
        } else {
            self.border
        }
    }

    pub fn flip_y(&self) -> bool {
        self.flags.contains(CanvasFlags::FLIP_Y)
    }
}
