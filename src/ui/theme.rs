//! UI Theme - Shared colors and styling constants

use macroquad::prelude::Color;

// =============================================================================
// Base UI Colors
// =============================================================================

/// Window background (#111827)
pub const BG_COLOR: Color = Color::new(0.067, 0.094, 0.153, 1.0);

/// Header/toolbar background
pub const HEADER_COLOR: Color = Color::new(0.122, 0.161, 0.216, 1.0);

/// Panel background
pub const PANEL_BG: Color = Color::new(0.043, 0.063, 0.106, 1.0);

/// Panel border (#374151)
pub const BORDER_COLOR: Color = Color::new(0.216, 0.255, 0.318, 1.0);

pub const TEXT_COLOR: Color = Color::new(0.898, 0.906, 0.922, 1.0);
pub const TEXT_DIM: Color = Color::new(0.612, 0.639, 0.686, 1.0);

/// Active buttons and focused rows (#2563eb)
pub const ACCENT_COLOR: Color = Color::new(0.145, 0.388, 0.922, 1.0);
pub const BUTTON_BG: Color = Color::new(0.165, 0.208, 0.275, 1.0);
pub const BUTTON_HOVER: Color = Color::new(0.216, 0.267, 0.345, 1.0);

pub const ERROR_COLOR: Color = Color::new(0.937, 0.267, 0.267, 1.0);

// =============================================================================
// Annotation colors
// =============================================================================

/// Focused box outline (#10b981)
pub const BOX_COLOR: Color = Color::new(0.063, 0.725, 0.506, 1.0);

/// Unfocused box outline
pub const BOX_DIM: Color = Color::new(0.063, 0.725, 0.506, 0.45);

/// Box outline while an edge is hovered or dragged
pub const BOX_ACTIVE: Color = Color::new(0.996, 0.941, 0.541, 1.0);

/// Preview of an uncommitted resize or draw
pub const PREVIEW_COLOR: Color = Color::new(0.961, 0.620, 0.043, 0.9);

/// Points inside the box rectangle (#f59e0b)
pub const POINT_INNER: Color = Color::new(0.961, 0.620, 0.043, 1.0);

/// Points in view but outside the box (#64748b)
pub const POINT_OUTER: Color = Color::new(0.392, 0.455, 0.545, 0.8);

/// Ground grid lines
pub const GRID_COLOR: Color = Color::new(0.216, 0.255, 0.318, 0.5);
pub const GRID_AXIS: Color = Color::new(0.392, 0.455, 0.545, 0.9);

// =============================================================================
// Font Sizes
// =============================================================================

pub const FONT_SIZE_HEADER: f32 = 14.0;
pub const FONT_SIZE_CONTENT: f32 = 12.0;
