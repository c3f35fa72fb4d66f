//! Canvas rendering for the topology view.
//!
//! Rendering passes, back to front:
//! 1. Background (screen space)
//! 2. Edges with arrowheads, then node shapes and labels (world space)
//! 3. Hover tooltip (screen space)
//!
//! Hidden nodes and every edge touching one are skipped. Self-loops are
//! drawn as a small circle on the node outline.

use std::collections::HashMap;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

use web_sys::CanvasRenderingContext2d;

use super::group::NodeShape;
use super::options::TopologyOptions;
use super::state::{NodeInfo, TopologyState};
use super::theme::Color;

/// Renders the complete topology to the canvas.
pub fn render(state: &TopologyState, ctx: &CanvasRenderingContext2d, options: &TopologyOptions) {
	ctx.set_fill_style_str(&options.theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, options);
	draw_nodes(state, ctx, options);

	ctx.restore();

	if let Some((text, x, y)) = state.tooltip() {
		draw_tooltip(state, ctx, options, &text, x, y);
	}
}

fn draw_edges(state: &TopologyState, ctx: &CanvasRenderingContext2d, options: &TopologyOptions) {
	let edges = &options.edges;
	let colors = &options.theme.edge;

	let mut anchors = HashMap::new();
	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		if !info.hidden {
			anchors.insert(
				node.index(),
				(node.x() as f64, node.y() as f64, info.boundary_radius()),
			);
		}
	});

	for &(src, tgt) in state.edges() {
		let (Some(&(x1, y1, r1)), Some(&(x2, y2, r2))) = (anchors.get(&src), anchors.get(&tgt))
		else {
			continue;
		};

		let (color, width) = if state.is_edge_selected(src, tgt) {
			(colors.highlight, edges.selection_width)
		} else if state.is_edge_hovered(src, tgt) {
			(colors.hover, edges.hover_width)
		} else {
			(colors.color, edges.width)
		};
		ctx.set_stroke_style_str(&color.to_css());
		ctx.set_fill_style_str(&color.to_css());
		ctx.set_line_width(width);

		if src == tgt {
			draw_self_loop(ctx, x1, y1, r1);
			continue;
		}

		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let arrow = edges.arrow_length(width);

		// Control point offset perpendicular to the edge, proportional to its length.
		let (ux, uy) = (dx / dist, dy / dist);
		let bend = dist * edges.roundness * 0.3;
		let (cx, cy) = ((x1 + x2) / 2.0 - uy * bend, (y1 + y2) / 2.0 + ux * bend);

		let (sx, sy) = toward(x1, y1, cx, cy, r1);
		let (tip_x, tip_y) = toward(x2, y2, cx, cy, r2);
		let (ax, ay) = unit(tip_x - cx, tip_y - cy);
		let (end_x, end_y) = (tip_x - ax * arrow, tip_y - ay * arrow);

		ctx.begin_path();
		ctx.move_to(sx, sy);
		if edges.roundness > 0.0 {
			let _ = ctx.quadratic_curve_to(cx, cy, end_x, end_y);
		} else {
			ctx.line_to(end_x, end_y);
		}
		ctx.stroke();

		let (px, py) = (-ay * arrow * 0.5, ax * arrow * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(end_x + px, end_y + py);
		ctx.line_to(end_x - px, end_y - py);
		ctx.close_path();
		ctx.fill();
	}
}

/// Circle hanging off the node's upper-right edge. The node drawn on top
/// hides the part inside its outline.
fn draw_self_loop(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64) {
	let loop_radius = radius.max(10.0) * 0.75;
	let offset = radius * FRAC_1_SQRT_2;
	ctx.begin_path();
	let _ = ctx.arc(x + offset, y - offset, loop_radius, 0.0, 2.0 * PI);
	ctx.stroke();
}

/// Point at distance `offset` from `(x, y)` in the direction of `(tx, ty)`.
fn toward(x: f64, y: f64, tx: f64, ty: f64, offset: f64) -> (f64, f64) {
	let (ux, uy) = unit(tx - x, ty - y);
	(x + ux * offset, y + uy * offset)
}

fn unit(dx: f64, dy: f64) -> (f64, f64) {
	let len = (dx * dx + dy * dy).sqrt();
	if len < 1e-9 { (0.0, 0.0) } else { (dx / len, dy / len) }
}

fn draw_nodes(state: &TopologyState, ctx: &CanvasRenderingContext2d, options: &TopologyOptions) {
	let appearance = &options.appearance;

	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		if info.hidden {
			return;
		}
		let idx = node.index();
		let (x, y) = (node.x() as f64, node.y() as f64);
		let selected = state.selected == Some(idx);
		let emphasized = selected || state.hover.node == Some(idx);

		let (background, border) = if emphasized {
			(info.style.highlight_background, info.style.highlight_border)
		} else {
			(info.style.background, info.style.border)
		};
		let border_width = if selected {
			appearance.border_width_selected
		} else {
			appearance.border_width
		};

		if appearance.shadow {
			ctx.set_shadow_color(&options.theme.shadow.to_css());
			ctx.set_shadow_blur(appearance.shadow_blur);
			ctx.set_shadow_offset_x(appearance.shadow_offset);
			ctx.set_shadow_offset_y(appearance.shadow_offset);
		}
		trace_shape(ctx, info, x, y);
		ctx.set_fill_style_str(&background.to_css());
		ctx.fill();
		clear_shadow(ctx);

		ctx.set_stroke_style_str(&border.to_css());
		ctx.set_line_width(border_width);
		ctx.stroke();

		draw_label(ctx, info, x, y, options);
	});
}

fn clear_shadow(ctx: &CanvasRenderingContext2d) {
	ctx.set_shadow_color("rgba(0, 0, 0, 0)");
	ctx.set_shadow_blur(0.0);
	ctx.set_shadow_offset_x(0.0);
	ctx.set_shadow_offset_y(0.0);
}

/// Build the node outline path.
fn trace_shape(ctx: &CanvasRenderingContext2d, info: &NodeInfo, x: f64, y: f64) {
	let s = info.size;
	ctx.begin_path();
	match info.style.shape {
		NodeShape::Box => {
			let (w, h) = (info.half_width, info.half_height);
			rounded_rect(ctx, x - w, y - h, 2.0 * w, 2.0 * h, 6.0_f64.min(h));
		}
		NodeShape::Ellipse => {
			let _ = ctx.ellipse(x, y, info.half_width, info.half_height, 0.0, 0.0, 2.0 * PI);
		}
		NodeShape::Diamond => {
			ctx.move_to(x, y - s);
			ctx.line_to(x + s, y);
			ctx.line_to(x, y + s);
			ctx.line_to(x - s, y);
			ctx.close_path();
		}
		NodeShape::Triangle => {
			let h = s * 3.0_f64.sqrt() / 2.0;
			ctx.move_to(x, y - s);
			ctx.line_to(x + h, y + s / 2.0);
			ctx.line_to(x - h, y + s / 2.0);
			ctx.close_path();
		}
		NodeShape::Dot => {
			let _ = ctx.arc(x, y, s, 0.0, 2.0 * PI);
		}
	}
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn draw_label(
	ctx: &CanvasRenderingContext2d,
	info: &NodeInfo,
	x: f64,
	y: f64,
	options: &TopologyOptions,
) {
	if info.label.is_none() {
		return;
	}
	let font = &options.theme.font;
	let line_height = info.font_size * 1.2;
	let lines: Vec<&str> = info.label_lines().collect();
	let max_width = options.appearance.max_width - 2.0 * options.appearance.margin;

	ctx.set_font(&font.css(info.font_size));
	ctx.set_fill_style_str(&font.color.to_css());
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	let first_y = if info.style.shape.label_inside() {
		y - line_height * (lines.len() as f64 - 1.0) / 2.0
	} else {
		y + info.size + options.appearance.margin / 2.0 + line_height / 2.0
	};
	for (i, line) in lines.iter().enumerate() {
		let _ = ctx.fill_text_with_max_width(line, x, first_y + i as f64 * line_height, max_width);
	}
}

fn draw_tooltip(
	state: &TopologyState,
	ctx: &CanvasRenderingContext2d,
	options: &TopologyOptions,
	text: &str,
	x: f64,
	y: f64,
) {
	let style = &options.theme.tooltip;
	ctx.set_font(style.font);
	ctx.set_text_align("left");
	ctx.set_text_baseline("top");

	let lines: Vec<&str> = text.lines().collect();
	let line_height = 18.0;
	let width = lines
		.iter()
		.map(|line| ctx.measure_text(line).map(|m| m.width()).unwrap_or(0.0))
		.fold(0.0, f64::max)
		+ 2.0 * style.padding;
	let height = lines.len() as f64 * line_height + 2.0 * style.padding;

	// Keep the box inside the canvas.
	let bx = (x + 12.0).min(state.width - width).max(0.0);
	let by = (y + 12.0).min(state.height - height).max(0.0);

	fill_rect(ctx, style.background, bx, by, width, height);
	ctx.set_stroke_style_str(&style.border.to_css());
	ctx.set_line_width(1.0);
	ctx.stroke_rect(bx, by, width, height);

	ctx.set_fill_style_str(&style.text.to_css());
	for (i, line) in lines.iter().enumerate() {
		let _ = ctx.fill_text(
			line,
			bx + style.padding,
			by + style.padding + i as f64 * line_height,
		);
	}
}

fn fill_rect(ctx: &CanvasRenderingContext2d, color: Color, x: f64, y: f64, w: f64, h: f64) {
	ctx.set_fill_style_str(&color.to_css());
	ctx.fill_rect(x, y, w, h);
}
