//! Aggregate rendering configuration.

use super::physics::PhysicsConfig;
use super::scale::{EdgeAppearance, InteractionConfig, NodeAppearance, NodeScaling};
use super::theme::Theme;

/// Everything the view needs to lay out and draw a topology.
#[derive(Clone, Debug, Default)]
pub struct TopologyOptions {
	/// Layout simulation.
	pub physics: PhysicsConfig,
	/// Value-based node sizing.
	pub scaling: NodeScaling,
	/// Node borders, shadows and box limits.
	pub appearance: NodeAppearance,
	/// Edge widths, arrows and curvature.
	pub edges: EdgeAppearance,
	/// Pointer behaviour.
	pub interaction: InteractionConfig,
	/// Colors and fonts.
	pub theme: Theme,
}
