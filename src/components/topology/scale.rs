//! Node/edge sizing and interaction configuration.
//!
//! All sizes are world-space: they grow and shrink with the view zoom.
//! Nodes carrying a `value` are sized linearly between the scaling bounds
//! relative to the smallest and largest value present.

/// Label scaling bounds used for valued nodes.
#[derive(Clone, Debug)]
pub struct LabelScaling {
	/// Scale labels together with nodes.
	pub enabled: bool,
	/// Smallest font size.
	pub min: f64,
	/// Largest font size.
	pub max: f64,
}

/// Size bounds for value-based node scaling.
#[derive(Clone, Debug)]
pub struct NodeScaling {
	/// Size of the smallest value.
	pub min: f64,
	/// Size of the largest value.
	pub max: f64,
	/// Font sizing for valued nodes.
	pub label: LabelScaling,
}

impl Default for NodeScaling {
	fn default() -> Self {
		Self {
			min: 10.0,
			max: 30.0,
			label: LabelScaling {
				enabled: true,
				min: 14.0,
				max: 30.0,
			},
		}
	}
}

impl NodeScaling {
	/// Relative position of `value` inside `[lo, hi]`. A degenerate range maps to the middle.
	pub fn ratio(value: f64, lo: f64, hi: f64) -> f64 {
		if (hi - lo).abs() < f64::EPSILON {
			0.5
		} else {
			((value - lo) / (hi - lo)).clamp(0.0, 1.0)
		}
	}

	/// Node size at `ratio` between the bounds.
	pub fn size(&self, ratio: f64) -> f64 {
		self.min + ratio * (self.max - self.min)
	}

	/// Font size for a valued node, or `None` when label scaling is disabled.
	pub fn label_size(&self, ratio: f64) -> Option<f64> {
		self.label
			.enabled
			.then(|| self.label.min + ratio * (self.label.max - self.label.min))
	}
}

/// Fixed node decoration applied to every node.
#[derive(Clone, Debug)]
pub struct NodeAppearance {
	/// Radius of shapes that draw their label below them.
	pub default_size: f64,
	/// Padding between label and box/ellipse outline.
	pub margin: f64,
	/// Widest a box or ellipse may grow.
	pub max_width: f64,
	/// Shortest a box or ellipse may be.
	pub min_height: f64,
	/// Outline width at rest.
	pub border_width: f64,
	/// Outline width of the selected node.
	pub border_width_selected: f64,
	/// Draw a drop shadow under nodes.
	pub shadow: bool,
	/// Shadow blur radius.
	pub shadow_blur: f64,
	/// Shadow offset on both axes.
	pub shadow_offset: f64,
}

impl Default for NodeAppearance {
	fn default() -> Self {
		Self {
			default_size: 25.0,
			margin: 10.0,
			max_width: 160.0,
			min_height: 70.0,
			border_width: 2.0,
			border_width_selected: 4.0,
			shadow: true,
			shadow_blur: 10.0,
			shadow_offset: 5.0,
		}
	}
}

/// Edge drawing configuration.
#[derive(Clone, Debug)]
pub struct EdgeAppearance {
	/// Stroke width at rest.
	pub width: f64,
	/// Stroke width of edges at the hovered node.
	pub hover_width: f64,
	/// Stroke width of edges at the selected node.
	pub selection_width: f64,
	/// Arrowhead length at width 1.
	pub arrow_size: f64,
	/// Bend of continuous smooth edges (0 = straight).
	pub roundness: f64,
}

impl Default for EdgeAppearance {
	fn default() -> Self {
		Self {
			width: 2.0,
			hover_width: 3.0,
			selection_width: 4.0,
			arrow_size: 10.0,
			roundness: 0.5,
		}
	}
}

impl EdgeAppearance {
	/// Arrowheads grow with the stroke width.
	pub fn arrow_length(&self, width: f64) -> f64 {
		self.arrow_size + 2.5 * width
	}
}

/// Pointer interaction settings.
#[derive(Clone, Debug)]
pub struct InteractionConfig {
	/// Track the node under the pointer.
	pub hover: bool,
	/// Highlight edges of the hovered node.
	pub hover_connected_edges: bool,
	/// Seconds of hovering before the tooltip shows.
	pub tooltip_delay: f64,
	/// Zoom with the mouse wheel.
	pub zoom_view: bool,
	/// Pan by dragging empty canvas.
	pub drag_view: bool,
	/// Move nodes by dragging them.
	pub drag_nodes: bool,
	/// Lower zoom bound.
	pub min_zoom: f64,
	/// Upper zoom bound.
	pub max_zoom: f64,
	/// Pointer travel (screen px) below which a press counts as a click.
	pub click_tolerance: f64,
	/// Screen padding kept around the diagram when fitting.
	pub fit_padding: f64,
}

impl Default for InteractionConfig {
	fn default() -> Self {
		Self {
			hover: true,
			hover_connected_edges: true,
			tooltip_delay: 0.2,
			zoom_view: true,
			drag_view: true,
			drag_nodes: true,
			min_zoom: 0.05,
			max_zoom: 10.0,
			click_tolerance: 4.0,
			fit_padding: 40.0,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn values_scale_between_bounds() {
		let scaling = NodeScaling::default();

		assert_eq!(scaling.size(NodeScaling::ratio(0.0, 0.0, 10.0)), 10.0);
		assert_eq!(scaling.size(NodeScaling::ratio(10.0, 0.0, 10.0)), 30.0);
		assert_eq!(scaling.size(NodeScaling::ratio(5.0, 0.0, 10.0)), 20.0);
		assert_eq!(scaling.label_size(1.0), Some(30.0));
	}

	#[test]
	fn single_value_maps_to_midpoint() {
		let scaling = NodeScaling::default();
		assert_eq!(scaling.size(NodeScaling::ratio(4.0, 4.0, 4.0)), 20.0);
	}
}
