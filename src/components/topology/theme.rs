//! Colors and visual style for the topology canvas.

/// Label font size in pixels before value-based scaling.
pub const DEFAULT_FONT_SIZE: f64 = 14.0;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red.
	pub r: u8,
	/// Green.
	pub g: u8,
	/// Blue.
	pub b: u8,
	/// Alpha in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Build an opaque color from a `0xRRGGBB` literal.
	pub const fn hex(rgb: u32) -> Self {
		Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
	}

	/// Same color with another alpha.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Hex for opaque colors, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Edge colors for the three interaction states.
#[derive(Clone, Debug)]
pub struct EdgeColors {
	/// Edges at rest.
	pub color: Color,
	/// Edges attached to the selected node.
	pub highlight: Color,
	/// Edges attached to the hovered node.
	pub hover: Color,
}

/// Label font settings.
#[derive(Clone, Debug)]
pub struct FontStyle {
	/// Base size in pixels.
	pub size: f64,
	/// Font family.
	pub face: &'static str,
	/// Label color.
	pub color: Color,
}

impl FontStyle {
	/// CSS font shorthand at the given pixel size.
	pub fn css(&self, size: f64) -> String {
		format!("{}px {}", size, self.face)
	}
}

/// Tooltip box drawn next to a hovered node.
#[derive(Clone, Debug)]
pub struct TooltipStyle {
	/// Box fill.
	pub background: Color,
	/// Box outline.
	pub border: Color,
	/// Tooltip text.
	pub text: Color,
	/// CSS font shorthand.
	pub font: &'static str,
	/// Inner padding in pixels.
	pub padding: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Canvas fill.
	pub background: Color,
	/// Edge colors.
	pub edge: EdgeColors,
	/// Node labels.
	pub font: FontStyle,
	/// Node drop shadow.
	pub shadow: Color,
	/// Hover tooltip.
	pub tooltip: TooltipStyle,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: Color::rgb(255, 255, 255),
			edge: EdgeColors {
				color: Color::hex(0x7F8C8D),
				highlight: Color::hex(0x3498DB),
				hover: Color::hex(0x2ECC71),
			},
			font: FontStyle {
				size: DEFAULT_FONT_SIZE,
				face: "Arial",
				color: Color::hex(0x343434),
			},
			shadow: Color::rgba(0, 0, 0, 0.5),
			tooltip: TooltipStyle {
				background: Color::hex(0xF5F4ED),
				border: Color::hex(0x808074),
				text: Color::rgb(0, 0, 0),
				font: "14px Arial",
				padding: 5.0,
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hex_literals_expand_to_channels() {
		assert_eq!(Color::hex(0x4A90E2), Color::rgb(0x4A, 0x90, 0xE2));
		assert_eq!(Color::hex(0x4A90E2).to_css(), "#4a90e2");
	}

	#[test]
	fn translucent_colors_render_as_rgba() {
		assert_eq!(Color::rgb(1, 2, 3).with_alpha(0.5).to_css(), "rgba(1, 2, 3, 0.5)");
	}
}
