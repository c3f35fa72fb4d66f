//! Topology simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation with per-node equipment
//! metadata, the pan/zoom view transform, filter-driven visibility and
//! hover/selection state. Created once when the canvas mounts and mutated by
//! the animation loop, pointer handlers and page controls.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};

use super::filter::NodeFilter;
use super::group::{DeviceGroup, NodeStyle};
use super::options::TopologyOptions;
use super::physics::{PhysicsConfig, StabilizationEvent, Stabilizer};
use super::scale::{InteractionConfig, NodeAppearance, NodeScaling};
use super::stats::TopologyStats;
use super::theme::DEFAULT_FONT_SIZE;
use super::types::TopologyData;

/// Per-node equipment metadata carried through the simulation.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	/// Record id.
	pub id: String,
	/// Label text, may contain line breaks.
	pub label: Option<String>,
	/// Tooltip text.
	pub title: Option<String>,
	/// Group exactly as supplied, used by the type filter.
	pub group_name: Option<String>,
	/// Classified group.
	pub group: DeviceGroup,
	/// Shape and colors of the group.
	pub style: NodeStyle,
	/// Location the node is placed at.
	pub location_id: Option<String>,
	/// Operational status.
	pub status: Option<String>,
	/// Opened on click.
	pub url: Option<String>,
	/// Sizing magnitude.
	pub value: Option<f64>,
	/// Radius of shapes drawn without an enclosed label.
	pub size: f64,
	/// Label size in pixels.
	pub font_size: f64,
	/// Half extents of the outline.
	pub half_width: f64,
	/// See `half_width`.
	pub half_height: f64,
	/// Set by the active filter.
	pub hidden: bool,
}

impl NodeInfo {
	/// Metadata for a record with default sizing; call [`layout`](Self::layout) after resizing.
	pub fn from_record(record: &super::types::TopologyNode) -> Self {
		let group = DeviceGroup::from_name(record.group.as_deref());
		Self {
			id: record.id.clone(),
			label: record.label.clone(),
			title: record.title.clone(),
			group_name: record.group.clone(),
			group,
			style: group.style(),
			location_id: record.location_id.clone(),
			status: record.status.clone(),
			url: record.url.clone(),
			value: record.value,
			size: NodeAppearance::default().default_size,
			font_size: DEFAULT_FONT_SIZE,
			half_width: 0.0,
			half_height: 0.0,
			hidden: false,
		}
	}

	/// Label split on explicit line breaks.
	pub fn label_lines(&self) -> impl Iterator<Item = &str> {
		self.label.as_deref().unwrap_or_default().lines()
	}

	/// Recompute the outline extents from the label and appearance settings.
	pub fn layout(&mut self, appearance: &NodeAppearance) {
		if self.style.shape.label_inside() {
			let (mut widest, mut lines) = (0.0_f64, 0usize);
			for line in self.label_lines() {
				widest = widest.max(estimate_text_width(line, self.font_size));
				lines += 1;
			}
			let width = (widest + 2.0 * appearance.margin).min(appearance.max_width);
			let height = (lines as f64 * self.font_size * 1.2 + 2.0 * appearance.margin)
				.max(appearance.min_height);
			self.half_width = width / 2.0;
			self.half_height = height / 2.0;
		} else {
			self.half_width = self.size;
			self.half_height = self.size;
		}
	}

	/// Whether a point relative to the node center lies inside its outline.
	pub fn contains(&self, dx: f64, dy: f64) -> bool {
		use super::group::NodeShape;
		match self.style.shape {
			NodeShape::Box => dx.abs() <= self.half_width && dy.abs() <= self.half_height,
			NodeShape::Ellipse => {
				let (ex, ey) = (dx / self.half_width, dy / self.half_height);
				ex * ex + ey * ey <= 1.0
			}
			NodeShape::Diamond | NodeShape::Triangle | NodeShape::Dot => {
				dx * dx + dy * dy <= self.size * self.size
			}
		}
	}

	/// Distance from the center to the outline, used to stop edges at the border.
	pub fn boundary_radius(&self) -> f64 {
		self.half_width.min(self.half_height)
	}
}

/// Rough width of `text` in pixels for the given font size.
pub fn estimate_text_width(text: &str, font_size: f64) -> f64 {
	text.chars().count() as f64 * font_size * 0.6
}

/// Pan and zoom transform applied to the entire view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	/// Horizontal offset in screen pixels.
	pub x: f64,
	/// Vertical offset in screen pixels.
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

/// Tracks a pointer press that may become a node drag or a click.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// A node is being dragged.
	pub active: bool,
	/// Node being dragged.
	pub node_idx: Option<DefaultNodeIdx>,
	/// Pointer position at press.
	pub start_x: f64,
	/// See `start_x`.
	pub start_y: f64,
	/// Node position at press.
	pub node_start_x: f32,
	/// See `node_start_x`.
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// The view is being panned.
	pub active: bool,
	/// Pointer position at press.
	pub start_x: f64,
	/// See `start_x`.
	pub start_y: f64,
	/// View offset at press.
	pub transform_start_x: f64,
	/// See `transform_start_x`.
	pub transform_start_y: f64,
}

/// Pointer press bookkeeping used to tell clicks apart from drags.
#[derive(Clone, Debug, Default)]
pub struct PressState {
	/// A button is held on the canvas.
	pub down: bool,
	/// Press position.
	pub x: f64,
	/// See `x`.
	pub y: f64,
	/// Pointer travelled past the click tolerance.
	pub moved: bool,
}

/// Hovered node, its connected edges and the tooltip timer.
#[derive(Clone, Debug, Default)]
pub struct HoverState {
	/// Node under the pointer.
	pub node: Option<DefaultNodeIdx>,
	/// Nodes sharing an edge with the hovered one.
	pub neighbors: HashSet<DefaultNodeIdx>,
	/// Seconds the current node has been hovered.
	pub elapsed: f64,
	/// Last pointer position in screen space, anchors the tooltip.
	pub pointer: (f64, f64),
}

/// Core topology state combining the physics simulation with view,
/// visibility and interaction tracking.
pub struct TopologyState {
	/// Physics simulation. Self-loops are kept out of it.
	pub graph: ForceGraph<NodeInfo, ()>,
	/// Pan and zoom.
	pub transform: ViewTransform,
	/// Node drag in progress.
	pub drag: DragState,
	/// View pan in progress.
	pub pan: PanState,
	/// Click detection.
	pub press: PressState,
	/// Hover and tooltip tracking.
	pub hover: HoverState,
	/// Last clicked node.
	pub selected: Option<DefaultNodeIdx>,
	/// Viewport size in pixels.
	pub width: f64,
	/// See `width`.
	pub height: f64,
	/// Keep simulating once stabilization is done.
	pub physics_enabled: bool,
	physics: PhysicsConfig,
	interaction: InteractionConfig,
	stabilizer: Stabilizer,
	filter: NodeFilter,
	id_to_idx: HashMap<String, DefaultNodeIdx>,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl TopologyState {
	/// Build the simulation, laying nodes out on a ring and starting stabilization.
	pub fn new(data: &TopologyData, width: f64, height: f64, options: &TopologyOptions) -> Self {
		let mut graph = ForceGraph::new(options.physics.simulation_parameters());
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();

		let values = data.nodes.iter().filter_map(|n| n.value);
		let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
			(lo.min(v), hi.max(v))
		});

		// Start on a ring whose circumference spaces nodes one spring length apart.
		let count = data.nodes.len().max(1) as f64;
		let spring = options.physics.spring_length as f64;
		let ring = (count * spring / (2.0 * PI)).max(spring);

		for (i, node) in data.nodes.iter().enumerate() {
			if id_to_idx.contains_key(&node.id) {
				log::warn!("topology: duplicate node id {:?} ignored", node.id);
				continue;
			}
			let mut info = NodeInfo::from_record(node);
			info.size = options.appearance.default_size;
			info.font_size = options.theme.font.size;
			if let Some(value) = node.value {
				let ratio = NodeScaling::ratio(value, lo, hi);
				info.size = options.scaling.size(ratio);
				if let Some(font) = options.scaling.label_size(ratio) {
					info.font_size = font;
				}
			}
			info.layout(&options.appearance);

			let angle = (i as f64) * 2.0 * PI / count;
			let idx = graph.add_node(NodeData {
				x: (ring * angle.cos()) as f32,
				y: (ring * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: info,
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for edge in &data.edges {
			match (id_to_idx.get(&edge.source), id_to_idx.get(&edge.target)) {
				(Some(&src), Some(&tgt)) => {
					// Self-loops are drawn but never simulated.
					if src != tgt {
						graph.add_edge(src, tgt, EdgeData::default());
					}
					edges.push((src, tgt));
				}
				_ => log::debug!(
					"topology: edge {} -> {} references an unknown node",
					edge.source,
					edge.target
				),
			}
		}

		let mut stabilizer = Stabilizer::default();
		if options.physics.enabled {
			stabilizer.start(options.physics.stabilization_iterations);
		}

		let mut state = Self {
			graph,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			press: PressState::default(),
			hover: HoverState::default(),
			selected: None,
			width,
			height,
			physics_enabled: options.physics.enabled,
			physics: options.physics.clone(),
			interaction: options.interaction.clone(),
			stabilizer,
			filter: NodeFilter::ShowAll,
			id_to_idx,
			edges,
		};
		// Without a stabilization run there is no milestone to fit on.
		if !options.physics.enabled {
			state.fit();
		}
		state
	}

	/// Distinct nodes in the simulation.
	pub fn node_count(&self) -> usize {
		self.id_to_idx.len()
	}

	/// Connections kept, self-loops included.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// Every drawn connection as `(source, target)`, self-loops included.
	pub fn edges(&self) -> &[(DefaultNodeIdx, DefaultNodeIdx)] {
		&self.edges
	}

	/// Convert canvas pixels to world coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Convert world coordinates to canvas pixels.
	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(
			gx * self.transform.k + self.transform.x,
			gy * self.transform.k + self.transform.y,
		)
	}

	/// Topmost visible node under a screen position.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let info = &node.data.user_data;
			if !info.hidden && info.contains(gx - node.x() as f64, gy - node.y() as f64) {
				found = Some(node.index());
			}
		});
		found
	}

	/// Look up a node's metadata by simulation index.
	pub fn node_info(&self, idx: DefaultNodeIdx) -> Option<NodeInfo> {
		let mut info = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				info = Some(node.data.user_data.clone());
			}
		});
		info
	}

	/// Navigation target of a node, if it has one.
	pub fn url_of(&self, idx: DefaultNodeIdx) -> Option<String> {
		self.node_info(idx).and_then(|info| info.url)
	}

	/// `Some(hidden)` for a known node id.
	pub fn is_hidden(&self, id: &str) -> Option<bool> {
		let idx = *self.id_to_idx.get(id)?;
		self.node_info(idx).map(|info| info.hidden)
	}

	/// Unknown indices count as hidden.
	pub fn is_node_hidden(&self, idx: DefaultNodeIdx) -> bool {
		self.node_info(idx).is_none_or(|info| info.hidden)
	}

	/// Change the hovered node, restarting the tooltip timer.
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if !self.interaction.hover || self.hover.node == node {
			return;
		}
		self.hover.node = node;
		self.hover.elapsed = 0.0;
		self.hover.neighbors = node.map(|idx| self.neighbors_of(idx)).unwrap_or_default();
	}

	/// Mark a node as selected, or clear the selection.
	pub fn select(&mut self, node: Option<DefaultNodeIdx>) {
		self.selected = node;
	}

	fn neighbors_of(&self, idx: DefaultNodeIdx) -> HashSet<DefaultNodeIdx> {
		self.edges
			.iter()
			.filter_map(|&(src, tgt)| {
				if src == idx {
					Some(tgt)
				} else if tgt == idx {
					Some(src)
				} else {
					None
				}
			})
			.collect()
	}

	/// Whether an edge touches the hovered node.
	pub fn is_edge_hovered(&self, src: DefaultNodeIdx, tgt: DefaultNodeIdx) -> bool {
		self.interaction.hover_connected_edges
			&& self.hover.node.is_some_and(|h| h == src || h == tgt)
	}

	/// Whether an edge touches the selected node.
	pub fn is_edge_selected(&self, src: DefaultNodeIdx, tgt: DefaultNodeIdx) -> bool {
		self.selected.is_some_and(|s| s == src || s == tgt)
	}

	/// Tooltip text and screen anchor once the hover delay has elapsed.
	pub fn tooltip(&self) -> Option<(String, f64, f64)> {
		let idx = self.hover.node?;
		if self.hover.elapsed < self.interaction.tooltip_delay || self.drag.active {
			return None;
		}
		let title = self.node_info(idx)?.title?;
		Some((title, self.hover.pointer.0, self.hover.pointer.1))
	}

	/// Replace the active filter and recompute every node's visibility from it.
	pub fn apply_filter(&mut self, filter: NodeFilter) -> TopologyStats {
		self.graph.visit_nodes_mut(|node| {
			let hide = filter.hides(&node.data.user_data);
			node.data.user_data.hidden = hide;
		});
		self.filter = filter;

		if self.hover.node.is_some_and(|idx| self.is_node_hidden(idx)) {
			self.set_hover(None);
		}
		if self.selected.is_some_and(|idx| self.is_node_hidden(idx)) {
			self.selected = None;
		}
		self.statistics()
	}

	/// Show one device group. Returns the new statistics.
	pub fn filter_by_type(&mut self, group: &str) -> TopologyStats {
		self.apply_filter(NodeFilter::by_type(group))
	}

	/// Show one location. Returns the new statistics.
	pub fn filter_by_location(&mut self, location_id: &str) -> TopologyStats {
		self.apply_filter(NodeFilter::by_location(location_id))
	}

	/// Show one status. Returns the new statistics.
	pub fn filter_by_status(&mut self, status: &str) -> TopologyStats {
		self.apply_filter(NodeFilter::by_status(status))
	}

	/// Filter currently deciding visibility.
	pub fn active_filter(&self) -> &NodeFilter {
		&self.filter
	}

	/// Count visible nodes per group.
	pub fn statistics(&self) -> TopologyStats {
		let mut stats = TopologyStats::default();
		self.graph.visit_nodes(|node| stats.add(&node.data.user_data));
		stats
	}

	/// Zoom by `factor` around the viewport center.
	pub fn zoom_by(&mut self, factor: f64) {
		self.zoom_at(self.width / 2.0, self.height / 2.0, factor);
	}

	/// Zoom by `factor` keeping the given screen point fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.transform.k * factor)
			.clamp(self.interaction.min_zoom, self.interaction.max_zoom);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Center the visible nodes in the viewport, never zooming in past 100%.
	pub fn fit(&mut self) {
		let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
		let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
		let any_visible = self.statistics().total > 0;

		self.graph.visit_nodes(|node| {
			let info = &node.data.user_data;
			if any_visible && info.hidden {
				return;
			}
			let (x, y) = (node.x() as f64, node.y() as f64);
			min_x = min_x.min(x - info.half_width);
			max_x = max_x.max(x + info.half_width);
			min_y = min_y.min(y - info.half_height);
			max_y = max_y.max(y + info.half_height);
		});

		if !min_x.is_finite() {
			self.transform = ViewTransform {
				x: self.width / 2.0,
				y: self.height / 2.0,
				k: 1.0,
			};
			return;
		}

		let pad = self.interaction.fit_padding;
		let (avail_w, avail_h) = ((self.width - 2.0 * pad).max(1.0), (self.height - 2.0 * pad).max(1.0));
		let (bw, bh) = ((max_x - min_x).max(1.0), (max_y - min_y).max(1.0));
		let k = (avail_w / bw)
			.min(avail_h / bh)
			.clamp(self.interaction.min_zoom, 1.0);
		let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);

		self.transform = ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		};
	}

	/// Run a fresh stabilization burst of `iterations` steps.
	pub fn stabilize(&mut self, iterations: u32) {
		self.stabilizer.start(iterations);
	}

	/// Whether a stabilization burst is still running.
	pub fn is_stabilizing(&self) -> bool {
		self.stabilizer.is_running()
	}

	/// Toggle simulation outside stabilization bursts.
	pub fn set_physics_enabled(&mut self, enabled: bool) {
		self.physics_enabled = enabled;
	}

	/// Advance simulation and hover timers by one animation frame.
	///
	/// `elapsed` is the wall-clock time in seconds since the previous frame and
	/// only drives the hover timer; simulation steps use the fixed timestep.
	/// While a stabilization budget remains, several simulation steps run per
	/// frame; the frame that exhausts it fits the view when configured to.
	pub fn tick(&mut self, elapsed: f64) -> StabilizationEvent {
		if self.hover.node.is_some() {
			self.hover.elapsed += elapsed.max(0.0);
		}

		let event = {
			let (graph, physics) = (&mut self.graph, &self.physics);
			self.stabilizer
				.advance(physics.update_interval, || step(graph, physics))
		};

		match event {
			StabilizationEvent::Done if self.physics.fit_on_stabilized => self.fit(),
			StabilizationEvent::Idle if self.physics_enabled => step(&mut self.graph, &self.physics),
			_ => {}
		}
		event
	}

	/// Update the viewport size after the canvas changed.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

/// One simulation step plus the pull towards the layout center.
fn step(graph: &mut ForceGraph<NodeInfo, ()>, physics: &PhysicsConfig) {
	graph.update(physics.timestep);
	let gravity = physics.central_gravity;
	if gravity > 0.0 {
		graph.visit_nodes_mut(|node| {
			if !node.data.is_anchor {
				node.data.x -= node.data.x * gravity;
				node.data.y -= node.data.y * gravity;
			}
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::topology::types::{TopologyEdge, TopologyNode};

	fn node(id: &str, group: &str, status: &str) -> TopologyNode {
		TopologyNode {
			id: id.into(),
			label: Some(format!("Device {id}")),
			group: Some(group.into()),
			status: Some(status.into()),
			location_id: Some(if id == "1" { "10" } else { "20" }.into()),
			..Default::default()
		}
	}

	fn state(nodes: Vec<TopologyNode>) -> TopologyState {
		let data = TopologyData {
			nodes,
			edges: Vec::new(),
		};
		TopologyState::new(&data, 800.0, 600.0, &TopologyOptions::default())
	}

	fn hidden(state: &TopologyState, ids: &[&str]) -> Vec<bool> {
		ids.iter().map(|id| state.is_hidden(id).unwrap()).collect()
	}

	#[test]
	fn type_filter_hides_other_groups() {
		let mut s = state(vec![
			node("1", "router", "active"),
			node("2", "server", "active"),
			node("3", "server", "inactive"),
		]);
		let stats = s.filter_by_type("server");

		assert_eq!(hidden(&s, &["1", "2", "3"]), [true, false, false]);
		assert_eq!(stats.server, 2);
		assert_eq!(stats.total, 2);
		assert_eq!(stats.other, 0);
	}

	#[test]
	fn latest_filter_replaces_earlier_one() {
		let mut s = state(vec![
			node("1", "router", "active"),
			node("2", "server", "active"),
			node("3", "router", "inactive"),
		]);
		s.filter_by_type("router");
		let stats = s.filter_by_status("active");

		// Status alone decides; the router filter no longer applies.
		assert_eq!(hidden(&s, &["1", "2", "3"]), [false, false, true]);
		assert_eq!(stats.total, 2);
		assert_eq!(s.active_filter(), &NodeFilter::Status("active".into()));
	}

	#[test]
	fn empty_filter_restores_all_nodes() {
		let mut s = state(vec![node("1", "router", "active"), node("2", "switch", "inactive")]);
		s.filter_by_location("10");
		assert_eq!(hidden(&s, &["1", "2"]), [false, true]);

		let stats = s.filter_by_location("");
		assert_eq!(hidden(&s, &["1", "2"]), [false, false]);
		assert_eq!(stats.total, 2);
	}

	#[test]
	fn statistics_total_matches_visible_nodes() {
		let mut s = state(vec![
			node("1", "router", "active"),
			node("2", "firewall", "maintenance"),
			node("3", "access_point", "active"),
			node("4", "printer", "active"),
		]);
		let stats = s.filter_by_status("active");

		assert_eq!(stats.total, 3);
		assert_eq!(
			stats.router + stats.switch + stats.server + stats.firewall + stats.access_point + stats.other,
			stats.total
		);
		assert_eq!(stats.other, 1);
	}

	#[test]
	fn edges_to_unknown_nodes_are_dropped() {
		let data = TopologyData {
			nodes: vec![node("1", "router", "active"), node("2", "switch", "active")],
			edges: vec![
				TopologyEdge {
					source: "1".into(),
					target: "2".into(),
				},
				TopologyEdge {
					source: "1".into(),
					target: "99".into(),
				},
			],
		};
		let s = TopologyState::new(&data, 800.0, 600.0, &TopologyOptions::default());

		assert_eq!(s.node_count(), 2);
		assert_eq!(s.edge_count(), 1);
	}

	#[test]
	fn zoom_keeps_viewport_center_fixed() {
		let mut s = state(vec![node("1", "router", "active")]);
		let before = s.screen_to_graph(400.0, 300.0);
		s.zoom_by(1.2);
		let after = s.screen_to_graph(400.0, 300.0);

		assert!((s.transform.k - 1.2).abs() < 1e-9);
		assert!((before.0 - after.0).abs() < 1e-9 && (before.1 - after.1).abs() < 1e-9);

		s.zoom_by(0.8);
		assert!((s.transform.k - 0.96).abs() < 1e-9);
	}

	#[test]
	fn fit_centers_nodes_without_zooming_past_full_size() {
		let mut s = state(vec![node("1", "router", "active")]);
		s.fit();

		let (x, y) = s.graph_to_screen(0.0, 0.0);
		assert!(s.transform.k <= 1.0);
		// The single node sits on the ring, so its position is what gets centered.
		let mut pos = (0.0, 0.0);
		s.graph.visit_nodes(|n| pos = (n.x() as f64, n.y() as f64));
		let (sx, sy) = s.graph_to_screen(pos.0, pos.1);
		assert!((sx - 400.0).abs() < 1e-6 && (sy - 300.0).abs() < 1e-6);
		assert!(x.is_finite() && y.is_finite());
	}

	#[test]
	fn hidden_nodes_are_not_hit() {
		let mut s = state(vec![node("1", "router", "active")]);
		let mut pos = (0.0, 0.0);
		s.graph.visit_nodes(|n| pos = (n.x() as f64, n.y() as f64));
		let (sx, sy) = s.graph_to_screen(pos.0, pos.1);

		assert!(s.node_at_position(sx, sy).is_some());
		s.filter_by_type("switch");
		assert!(s.node_at_position(sx, sy).is_none());
	}

	#[test]
	fn stabilization_runs_then_goes_idle() {
		let mut s = state(vec![node("1", "router", "active"), node("2", "server", "active")]);
		assert!(s.is_stabilizing());

		let mut done = false;
		for _ in 0..4 {
			done |= s.tick(0.016) == StabilizationEvent::Done;
		}
		assert!(done);
		assert!(!s.is_stabilizing());

		s.stabilize(100);
		assert!(s.is_stabilizing());
	}

	/// World-space box around the visible node outlines.
	fn visible_bounds(s: &TopologyState) -> (f64, f64, f64, f64) {
		let mut b = (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
		s.graph.visit_nodes(|n| {
			let info = &n.data.user_data;
			if info.hidden {
				return;
			}
			let (x, y) = (n.x() as f64, n.y() as f64);
			b.0 = b.0.min(x - info.half_width);
			b.1 = b.1.min(y - info.half_height);
			b.2 = b.2.max(x + info.half_width);
			b.3 = b.3.max(y + info.half_height);
		});
		b
	}

	fn assert_centered(s: &TopologyState) {
		let (min_x, min_y, max_x, max_y) = visible_bounds(s);
		let (cx, cy) = s.graph_to_screen((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
		assert!((cx - s.width / 2.0).abs() < 1e-6, "x center {cx}");
		assert!((cy - s.height / 2.0).abs() < 1e-6, "y center {cy}");
		assert!(s.transform.k <= 1.0);
	}

	#[test]
	fn finished_stabilization_fits_the_view() {
		let mut s = state(vec![
			node("1", "router", "active"),
			node("2", "switch", "active"),
			node("3", "server", "inactive"),
		]);
		s.zoom_by(3.0);
		s.transform.x += 250.0;
		s.transform.y -= 120.0;

		let mut frames = 0;
		while s.tick(0.016) != StabilizationEvent::Done {
			frames += 1;
			assert!(frames < 10, "stabilization never finished");
		}
		assert_centered(&s);
	}

	#[test]
	fn fit_after_filtering_centers_remaining_nodes() {
		let mut s = state(vec![
			node("1", "router", "active"),
			node("2", "switch", "active"),
			node("3", "server", "inactive"),
		]);
		s.filter_by_status("active");
		s.fit();
		assert_centered(&s);
	}

	#[test]
	fn layout_without_physics_is_fitted_immediately() {
		let mut options = TopologyOptions::default();
		options.physics.enabled = false;
		let data = TopologyData {
			nodes: vec![
				node("1", "router", "active"),
				node("2", "switch", "active"),
				node("3", "firewall", "active"),
			],
			edges: Vec::new(),
		};
		let s = TopologyState::new(&data, 800.0, 600.0, &options);

		assert!(!s.is_stabilizing());
		assert_centered(&s);
	}

	#[test]
	fn self_loops_are_drawn_but_not_simulated() {
		let edge = |source: &str, target: &str| TopologyEdge {
			source: source.into(),
			target: target.into(),
		};
		let data = TopologyData {
			nodes: vec![node("1", "router", "active"), node("2", "switch", "active")],
			edges: vec![edge("1", "1"), edge("1", "2")],
		};
		let mut s = TopologyState::new(&data, 800.0, 600.0, &TopologyOptions::default());

		assert_eq!(s.edge_count(), 2);
		let idx = s.id_to_idx["1"];
		assert!(s.edges().contains(&(idx, idx)));
		for _ in 0..10 {
			s.tick(0.016);
		}
		let mut simulated = 0;
		s.graph.visit_edges(|_, _, _| simulated += 1);
		assert_eq!(simulated, 1);
	}

	#[test]
	fn hover_delay_follows_wall_clock_time() {
		let mut s = state(vec![TopologyNode {
			id: "1".into(),
			title: Some("core-sw-01".into()),
			..Default::default()
		}]);
		s.set_physics_enabled(false);
		let idx = s.id_to_idx["1"];
		s.set_hover(Some(idx));

		// Fourteen frames at 144 Hz is about 97 ms.
		for _ in 0..14 {
			s.tick(1.0 / 144.0);
		}
		assert!(s.tooltip().is_none());

		s.tick(0.11);
		assert!(s.tooltip().is_some());
	}

	#[test]
	fn tooltip_waits_for_hover_delay() {
		let mut s = state(vec![TopologyNode {
			id: "1".into(),
			title: Some("10.0.0.1".into()),
			..Default::default()
		}]);
		let idx = s.id_to_idx["1"];
		s.set_hover(Some(idx));
		assert!(s.tooltip().is_none());

		s.set_physics_enabled(false);
		for _ in 0..20 {
			s.tick(0.016);
		}
		assert_eq!(s.tooltip().map(|t| t.0), Some("10.0.0.1".to_string()));
	}

	#[test]
	fn boxes_respect_size_constraints() {
		let mut info = NodeInfo::from_record(&TopologyNode {
			id: "1".into(),
			group: Some("switch".into()),
			label: Some("a very long switch name that will not fit in the box".into()),
			..Default::default()
		});
		info.layout(&NodeAppearance::default());

		assert_eq!(info.half_width, 80.0);
		assert_eq!(info.half_height, 35.0);
	}
}
