//! Device classification and the fixed group → shape/color table.

use super::theme::Color;

/// Equipment category used for styling and statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceGroup {
	/// Diamond.
	Router,
	/// Box.
	Switch,
	/// Ellipse.
	Server,
	/// Triangle.
	Firewall,
	/// Dot.
	AccessPoint,
	/// Missing, empty or unrecognized group.
	Other,
}

impl DeviceGroup {
	/// Classify a raw group string. Only exact matches are recognized.
	pub fn from_name(name: Option<&str>) -> Self {
		match name {
			Some("router") => Self::Router,
			Some("switch") => Self::Switch,
			Some("server") => Self::Server,
			Some("firewall") => Self::Firewall,
			Some("access_point") => Self::AccessPoint,
			_ => Self::Other,
		}
	}

	/// Shape and colors for this group.
	pub fn style(self) -> NodeStyle {
		match self {
			Self::Router => NodeStyle::new(NodeShape::Diamond, 0x4A90E2, 0x2C3E50, 0x5D9CEC, 0x3498DB),
			Self::Switch => NodeStyle::new(NodeShape::Box, 0x50E3C2, 0x27AE60, 0x58EBC9, 0x2ECC71),
			Self::Server => NodeStyle::new(NodeShape::Ellipse, 0x7ED321, 0x2ECC71, 0x87DC2A, 0x58D68D),
			Self::Firewall => {
				NodeStyle::new(NodeShape::Triangle, 0xD0021B, 0xC0392B, 0xE74C3C, 0xD98880)
			}
			Self::AccessPoint => NodeStyle::new(NodeShape::Dot, 0xF5A623, 0xE67E22, 0xF7B84B, 0xF39C12),
			Self::Other => NodeStyle::new(NodeShape::Box, 0xBDC3C7, 0x95A5A6, 0xD5DBDB, 0xBFC9CA),
		}
	}
}

/// Outline drawn for a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeShape {
	/// Square rotated 45 degrees.
	Diamond,
	/// Rounded rectangle around the label.
	Box,
	/// Ellipse around the label.
	Ellipse,
	/// Upward-pointing triangle.
	Triangle,
	/// Filled circle.
	Dot,
}

impl NodeShape {
	/// Box and ellipse grow around their label; the others draw the label below.
	pub fn label_inside(self) -> bool {
		matches!(self, Self::Box | Self::Ellipse)
	}
}

/// Derived per-node styling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeStyle {
	/// Outline drawn for the group.
	pub shape: NodeShape,
	/// Fill in the resting state.
	pub background: Color,
	/// Outline in the resting state.
	pub border: Color,
	/// Fill while hovered or selected.
	pub highlight_background: Color,
	/// Outline while hovered or selected.
	pub highlight_border: Color,
}

impl NodeStyle {
	const fn new(shape: NodeShape, background: u32, border: u32, hl_bg: u32, hl_border: u32) -> Self {
		Self {
			shape,
			background: Color::hex(background),
			border: Color::hex(border),
			highlight_background: Color::hex(hl_bg),
			highlight_border: Color::hex(hl_border),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn known_groups_use_table_entries() {
		let cases = [
			("router", NodeShape::Diamond, 0x4A90E2, 0x2C3E50),
			("switch", NodeShape::Box, 0x50E3C2, 0x27AE60),
			("server", NodeShape::Ellipse, 0x7ED321, 0x2ECC71),
			("firewall", NodeShape::Triangle, 0xD0021B, 0xC0392B),
			("access_point", NodeShape::Dot, 0xF5A623, 0xE67E22),
		];
		for (name, shape, background, border) in cases {
			let style = DeviceGroup::from_name(Some(name)).style();
			assert_eq!(style.shape, shape, "{name}");
			assert_eq!(style.background, Color::hex(background), "{name}");
			assert_eq!(style.border, Color::hex(border), "{name}");
		}
	}

	#[test]
	fn unknown_groups_fall_back_to_default() {
		for name in [None, Some(""), Some("printer"), Some("Router"), Some("other")] {
			let group = DeviceGroup::from_name(name);
			assert_eq!(group, DeviceGroup::Other);
			let style = group.style();
			assert_eq!(style.shape, NodeShape::Box);
			assert_eq!(style.background, Color::hex(0xBDC3C7));
			assert_eq!(style.border, Color::hex(0x95A5A6));
		}
	}
}
