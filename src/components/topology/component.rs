//! Leptos component drawing the topology onto a canvas.
//!
//! The component creates a canvas sized to its container and wires mouse
//! handlers for node dragging, panning, zooming, hovering and clicking. An
//! animation loop runs via `requestAnimationFrame`, stepping the simulation
//! (in bursts while stabilizing) and redrawing each frame.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::handle::{TopologyContext, TopologyHandle};
use super::options::TopologyOptions;
use super::physics::StabilizationEvent;
use super::render;
use super::state::TopologyState;
use super::types::TopologyData;

const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);

/// Size of the canvas' parent element, or a fallback when it has no layout yet.
fn container_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	let parent = canvas.parent_element();
	let measure = |f: fn(&web_sys::Element) -> i32, fallback: f64| {
		parent
			.as_ref()
			.map(|p| f(p) as f64)
			.filter(|v| *v > 0.0)
			.unwrap_or(fallback)
	};
	(
		measure(web_sys::Element::client_width, FALLBACK_SIZE.0),
		measure(web_sys::Element::client_height, FALLBACK_SIZE.1),
	)
}

/// Canvas size outside fullscreen, restored when fullscreen ends.
///
/// A container without a fixed height takes its height from the canvas, so
/// measuring it right after leaving fullscreen still reports the screen height.
#[derive(Clone, Copy, Debug, PartialEq)]
struct WindowedSize {
	size: (f64, f64),
	fullscreen: bool,
}

impl WindowedSize {
	fn new(size: (f64, f64)) -> Self {
		Self {
			size,
			fullscreen: false,
		}
	}

	/// Size to apply given the measured container and the fullscreen state.
	fn resolve(&mut self, measured: (f64, f64), fullscreen: bool) -> (f64, f64) {
		let size = if self.fullscreen && !fullscreen {
			(measured.0, self.size.1)
		} else {
			measured
		};
		if !fullscreen {
			self.size = size;
		}
		self.fullscreen = fullscreen;
		size
	}
}

fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Renders an interactive topology diagram.
///
/// The simulation is stored in the handle's shared context so page controls
/// can filter, zoom and export the same view. Statistics are published once
/// the simulation is built.
#[component]
pub fn TopologyCanvas(
	handle: TopologyHandle,
	#[prop(into)] data: Signal<TopologyData>,
	#[prop(optional)] options: TopologyOptions,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context = handle.shared();
	let animate: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init, handle_init) =
		(context.clone(), animate.clone(), resize_cb.clone(), handle.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			log::error!("topology: no window, rendering aborted");
			return;
		};

		let (w, h) = container_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => return,
			},
			_ => {
				log::error!("topology: 2d canvas context unavailable");
				return;
			}
		};

		let data = data.get();
		log::info!(
			"topology: building view with {} nodes, {} edges",
			data.nodes.len(),
			data.edges.len()
		);
		*context_init.borrow_mut() = Some(TopologyContext {
			state: TopologyState::new(&data, w, h, &options),
			options: options.clone(),
		});
		handle_init.update_statistics();

		// Window resizes and fullscreen changes both resize the container.
		let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
		let mut windowed = WindowedSize::new((w, h));
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let fullscreen = web_sys::window()
				.and_then(|win| win.document())
				.is_some_and(|d| d.fullscreen_element().is_some());
			let (nw, nh) = windowed.resolve(container_size(&canvas_resize), fullscreen);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.state.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			if let Some(document) = window.document() {
				let _ = document
					.add_event_listener_with_callback("fullscreenchange", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		let mut last_frame: Option<f64> = None;
		*animate_init.borrow_mut() = Some(Closure::new(move |now: f64| {
			// rAF timestamps are in milliseconds.
			let elapsed = last_frame.map_or(0.0, |last| (now - last) / 1000.0);
			last_frame = Some(now);
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				if c.state.tick(elapsed) == StabilizationEvent::Done {
					log::debug!("topology: layout stabilized");
				}
				render::render(&c.state, &ctx, &c.options);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = pointer_position(&canvas, &ev);

		if let Some(ref mut c) = *context_md.borrow_mut() {
			let s = &mut c.state;
			s.press.down = true;
			s.press.moved = false;
			s.press.x = x;
			s.press.y = y;

			match s.node_at_position(x, y) {
				Some(idx) if c.options.interaction.drag_nodes => {
					s.drag.active = true;
					s.drag.node_idx = Some(idx);
					s.drag.start_x = x;
					s.drag.start_y = y;
					s.graph.visit_nodes(|node| {
						if node.index() == idx {
							s.drag.node_start_x = node.x();
							s.drag.node_start_y = node.y();
						}
					});
				}
				_ if c.options.interaction.drag_view => {
					s.pan.active = true;
					s.pan.start_x = x;
					s.pan.start_y = y;
					s.pan.transform_start_x = s.transform.x;
					s.pan.transform_start_y = s.transform.y;
				}
				_ => {}
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = pointer_position(&canvas, &ev);

		if let Some(ref mut c) = *context_mm.borrow_mut() {
			let tolerance = c.options.interaction.click_tolerance;
			let s = &mut c.state;
			s.hover.pointer = (x, y);
			if s.press.down && !s.press.moved {
				let (dx, dy) = (x - s.press.x, y - s.press.y);
				s.press.moved = (dx * dx + dy * dy).sqrt() > tolerance;
			}

			if !s.drag.active {
				let hovered = s.node_at_position(x, y);
				s.set_hover(hovered);
			}

			if s.drag.active && s.press.moved {
				if let Some(idx) = s.drag.node_idx {
					let (dx, dy) = (
						(x - s.drag.start_x) / s.transform.k,
						(y - s.drag.start_y) / s.transform.k,
					);
					let (nx, ny) = (s.drag.node_start_x + dx as f32, s.drag.node_start_y + dy as f32);
					s.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.x = nx;
							node.data.y = ny;
							node.data.is_anchor = true;
						}
					});
				}
			} else if s.pan.active {
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = pointer_position(&canvas, &ev);
		let mut navigate_to = None;

		if let Some(ref mut c) = *context_mu.borrow_mut() {
			let s = &mut c.state;
			if let Some(idx) = s.drag.node_idx {
				// Hand the node back to the simulation.
				s.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.is_anchor = false;
					}
				});
			}
			if s.press.down && !s.press.moved {
				let clicked = s.node_at_position(x, y);
				s.select(clicked);
				navigate_to = clicked.and_then(|idx| s.url_of(idx));
			}
			s.press.down = false;
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
		}

		if let (Some(url), Some(window)) = (navigate_to, web_sys::window()) {
			log::debug!("topology: opening {url}");
			if let Err(e) = window.location().set_href(&url) {
				log::warn!("topology: navigation to {url} failed: {e:?}");
			}
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			let s = &mut c.state;
			if let Some(idx) = s.drag.node_idx {
				s.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.is_anchor = false;
					}
				});
			}
			s.press.down = false;
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
			s.set_hover(None);
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			if !c.options.interaction.zoom_view {
				return;
			}
			ev.prevent_default();
			let (x, y) = pointer_position(&canvas, &ev);
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.state.zoom_at(x, y, factor);
		}
	};

	let context_dc = context.clone();
	let on_dblclick = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_dc.borrow_mut() {
			c.state.fit();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="topology-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			on:dblclick=on_dblclick
			style="display: block; cursor: grab;"
		/>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn leaving_fullscreen_restores_the_windowed_height() {
		let mut size = WindowedSize::new((800.0, 600.0));

		assert_eq!(size.resolve((1920.0, 1080.0), true), (1920.0, 1080.0));
		// The auto-height container still reports the fullscreen canvas height.
		assert_eq!(size.resolve((800.0, 1080.0), false), (800.0, 600.0));
		assert_eq!(size.resolve((1024.0, 600.0), false), (1024.0, 600.0));
	}

	#[test]
	fn window_resizes_follow_the_container() {
		let mut size = WindowedSize::new((800.0, 600.0));

		assert_eq!(size.resolve((640.0, 480.0), false), (640.0, 480.0));
		assert_eq!(size.resolve((1920.0, 1080.0), true), (1920.0, 1080.0));
		assert_eq!(size.resolve((640.0, 1080.0), false), (640.0, 480.0));
	}
}
