//! Crop region for image export.
//!
//! The region is described by pixel insets from each edge of the rendered
//! table. Insets never go below zero.

use serde::{Deserialize, Serialize};

/// Name reported when the insets match no preset
pub const CUSTOM_PRESET: &str = "Custom";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CropInsets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl CropInsets {
    pub const fn uniform(px: f64) -> Self {
        Self {
            top: px,
            right: px,
            bottom: px,
            left: px,
        }
    }

    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    fn floored(self) -> Self {
        Self {
            top: self.top.max(0.0),
            right: self.right.max(0.0),
            bottom: self.bottom.max(0.0),
            left: self.left.max(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CropSettings {
    #[serde(flatten)]
    pub insets: CropInsets,
    pub enabled: bool,
}

/// A named set of margins offered to the user
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginPreset {
    pub name: &'static str,
    pub insets: CropInsets,
}

pub const MARGIN_PRESETS: &[MarginPreset] = &[
    MarginPreset {
        name: "No Margin",
        insets: CropInsets::uniform(0.0),
    },
    MarginPreset {
        name: "Small (10px)",
        insets: CropInsets::uniform(10.0),
    },
    MarginPreset {
        name: "Medium (20px)",
        insets: CropInsets::uniform(20.0),
    },
    MarginPreset {
        name: "Large (40px)",
        insets: CropInsets::uniform(40.0),
    },
    MarginPreset {
        name: "Extra Large (60px)",
        insets: CropInsets::uniform(60.0),
    },
    MarginPreset {
        name: "Tall (20px sides, 40px top/bottom)",
        insets: CropInsets::new(40.0, 20.0, 40.0, 20.0),
    },
    MarginPreset {
        name: "Wide (40px sides, 20px top/bottom)",
        insets: CropInsets::new(20.0, 40.0, 20.0, 40.0),
    },
];

impl CropSettings {
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    /// Apply a preset by name, keeping the enabled flag. Unknown names are ignored.
    pub fn apply_preset(&mut self, name: &str) -> bool {
        match MARGIN_PRESETS.iter().find(|p| p.name == name) {
            Some(preset) => {
                self.insets = preset.insets;
                true
            }
            None => false,
        }
    }

    /// Name of the preset matching the current insets, or "Custom"
    pub fn current_preset_name(&self) -> &'static str {
        MARGIN_PRESETS
            .iter()
            .find(|p| p.insets == self.insets)
            .map_or(CUSTOM_PRESET, |p| p.name)
    }

    /// Start dragging a handle or the whole region. Nothing can be dragged
    /// while cropping is disabled.
    pub fn begin_drag(&self, target: DragTarget, x: f64, y: f64) -> Option<CropDrag> {
        if !self.enabled {
            return None;
        }
        Some(CropDrag {
            target,
            start_x: x,
            start_y: y,
            initial: self.insets,
        })
    }
}

/// One of the eight resize handles around the crop region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CropHandle {
    Top,
    Right,
    Bottom,
    Left,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl CropHandle {
    pub const ALL: [CropHandle; 8] = [
        CropHandle::Top,
        CropHandle::Right,
        CropHandle::Bottom,
        CropHandle::Left,
        CropHandle::TopLeft,
        CropHandle::TopRight,
        CropHandle::BottomLeft,
        CropHandle::BottomRight,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CropHandle::Top => "top",
            CropHandle::Right => "right",
            CropHandle::Bottom => "bottom",
            CropHandle::Left => "left",
            CropHandle::TopLeft => "top-left",
            CropHandle::TopRight => "top-right",
            CropHandle::BottomLeft => "bottom-left",
            CropHandle::BottomRight => "bottom-right",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.name() == name)
    }

    /// Which insets this handle moves
    fn edges(&self) -> Edges {
        let (top, right, bottom, left) = match self {
            CropHandle::Top => (true, false, false, false),
            CropHandle::Right => (false, true, false, false),
            CropHandle::Bottom => (false, false, true, false),
            CropHandle::Left => (false, false, false, true),
            CropHandle::TopLeft => (true, false, false, true),
            CropHandle::TopRight => (true, true, false, false),
            CropHandle::BottomLeft => (false, false, true, true),
            CropHandle::BottomRight => (false, true, true, false),
        };
        Edges {
            top,
            right,
            bottom,
            left,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Edges {
    top: bool,
    right: bool,
    bottom: bool,
    left: bool,
}

/// What the pointer grabbed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "handle", rename_all = "camelCase")]
pub enum DragTarget {
    /// The whole region
    Move,
    Resize(CropHandle),
}

impl DragTarget {
    /// Per-inset multipliers applied to a pointer delta `(dx, dy)`.
    ///
    /// Moving the pointer right grows the left inset and shrinks the right
    /// one; moving it down grows the top inset and shrinks the bottom one.
    pub fn resize_vector(&self, dx: f64, dy: f64) -> CropInsets {
        let edges = match self {
            DragTarget::Move => Edges {
                top: true,
                right: true,
                bottom: true,
                left: true,
            },
            DragTarget::Resize(handle) => handle.edges(),
        };
        let pick = |on: bool, v: f64| if on { v } else { 0.0 };
        CropInsets {
            top: pick(edges.top, dy),
            right: pick(edges.right, -dx),
            bottom: pick(edges.bottom, -dy),
            left: pick(edges.left, dx),
        }
    }
}

/// An in-progress drag, anchored at the pointer position where it began
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropDrag {
    pub target: DragTarget,
    start_x: f64,
    start_y: f64,
    initial: CropInsets,
}

impl CropDrag {
    /// Insets for the pointer now at `(x, y)`
    pub fn insets_at(&self, x: f64, y: f64) -> CropInsets {
        let delta = self.target.resize_vector(x - self.start_x, y - self.start_y);
        CropInsets {
            top: self.initial.top + delta.top,
            right: self.initial.right + delta.right,
            bottom: self.initial.bottom + delta.bottom,
            left: self.initial.left + delta.left,
        }
        .floored()
    }

    /// Update the settings for the pointer now at `(x, y)`
    pub fn apply(&self, settings: &mut CropSettings, x: f64, y: f64) {
        settings.insets = self.insets_at(x, y);
    }
}
