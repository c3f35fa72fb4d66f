//! Cloneable handle onto a mounted topology view.
//!
//! The canvas component fills the shared context once it mounts; until then
//! every operation here is a no-op.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use super::controls::{Listeners, StatsSlots};
use super::export;
use super::options::TopologyOptions;
use super::state::TopologyState;
use super::stats::TopologyStats;
use crate::error::TopologyError;

const ZOOM_IN_FACTOR: f64 = 1.2;
const ZOOM_OUT_FACTOR: f64 = 0.8;

/// Simulation state bundled with the configuration it was built from.
pub struct TopologyContext {
	/// Live simulation.
	pub state: TopologyState,
	/// Settings the simulation was built from.
	pub options: TopologyOptions,
}

/// Shared between the canvas component, page controls and API callers.
pub type SharedTopology = Rc<RefCell<Option<TopologyContext>>>;

/// Operations on a topology view, usable from page controls or Rust callers.
#[derive(Clone)]
pub struct TopologyHandle {
	container_id: String,
	shared: SharedTopology,
	slots: StatsSlots,
	listeners: Listeners,
}

impl TopologyHandle {
	/// Handle for the view mounted in `container_id`.
	pub fn new(container_id: impl Into<String>, slots: StatsSlots) -> Self {
		Self {
			container_id: container_id.into(),
			shared: Rc::new(RefCell::new(None)),
			slots,
			listeners: Rc::default(),
		}
	}

	/// Id of the element the view is mounted in.
	pub fn container_id(&self) -> &str {
		&self.container_id
	}

	pub(crate) fn shared(&self) -> SharedTopology {
		self.shared.clone()
	}

	pub(crate) fn listeners(&self) -> &Listeners {
		&self.listeners
	}

	/// Whether the canvas has mounted and the simulation exists.
	pub fn is_ready(&self) -> bool {
		self.shared.borrow().is_some()
	}

	fn with_state<R>(&self, f: impl FnOnce(&mut TopologyState) -> R) -> Option<R> {
		self.shared.borrow_mut().as_mut().map(|c| f(&mut c.state))
	}

	/// Show only one device group, or everything for "".
	pub fn filter_by_type(&self, group: &str) {
		if let Some(stats) = self.with_state(|s| s.filter_by_type(group)) {
			self.publish(&stats);
		}
	}

	/// Show only one location, or everything for "".
	pub fn filter_by_location(&self, location_id: &str) {
		if let Some(stats) = self.with_state(|s| s.filter_by_location(location_id)) {
			self.publish(&stats);
		}
	}

	/// Show only one status, or everything for "".
	pub fn filter_by_status(&self, status: &str) {
		if let Some(stats) = self.with_state(|s| s.filter_by_status(status)) {
			self.publish(&stats);
		}
	}

	/// Recount visible nodes and refresh the statistics slots.
	pub fn update_statistics(&self) -> Option<TopologyStats> {
		let stats = self.with_state(|s| s.statistics())?;
		self.publish(&stats);
		Some(stats)
	}

	fn publish(&self, stats: &TopologyStats) {
		if let Ok(document) = document() {
			self.slots.write(&document, stats);
		}
	}

	/// Zoom in around the viewport center.
	pub fn zoom_in(&self) {
		self.with_state(|s| s.zoom_by(ZOOM_IN_FACTOR));
	}

	/// Zoom out around the viewport center.
	pub fn zoom_out(&self) {
		self.with_state(|s| s.zoom_by(ZOOM_OUT_FACTOR));
	}

	/// Fit the visible nodes into the viewport.
	pub fn fit(&self) {
		self.with_state(|s| s.fit());
	}

	/// Fit the view and run a fresh stabilization burst.
	pub fn reset(&self) {
		if let Some(c) = self.shared.borrow_mut().as_mut() {
			c.state.fit();
			c.state.stabilize(c.options.physics.stabilization_iterations);
		}
	}

	/// Toggle continuous simulation after stabilization.
	pub fn set_physics_enabled(&self, enabled: bool) {
		self.with_state(|s| s.set_physics_enabled(enabled));
		log::debug!("topology: physics {}", if enabled { "on" } else { "off" });
	}

	/// Download the current rendering as a PNG. Alerts the user when there is
	/// nothing drawn to export yet.
	pub fn export_as_image(&self) {
		let Ok(document) = document() else {
			return;
		};
		let Some(container) = document.get_element_by_id(&self.container_id) else {
			return;
		};
		match export::export_canvas(&document, &container) {
			Ok(name) => log::info!("topology: exported {name}"),
			Err(TopologyError::NoCanvas(_)) => alert("Could not find a canvas to export"),
			Err(e) => log::error!("topology: export failed: {e}"),
		}
	}

	/// Enter fullscreen on the container, or leave it when already active.
	pub fn toggle_fullscreen(&self) {
		let Ok(document) = document() else {
			return;
		};
		if document.fullscreen_element().is_some() {
			document.exit_fullscreen();
			return;
		}
		let Some(container) = document.get_element_by_id(&self.container_id) else {
			return;
		};
		if let Err(e) = request_fullscreen(&container) {
			log::warn!("topology: fullscreen request failed: {e}");
		}
	}
}

fn request_fullscreen(container: &Element) -> Result<(), TopologyError> {
	container.request_fullscreen().map_err(TopologyError::from)
}

fn document() -> Result<Document, TopologyError> {
	web_sys::window()
		.ok_or(TopologyError::NoWindow)?
		.document()
		.ok_or(TopologyError::NoDocument)
}

fn alert(message: &str) {
	if let Some(window) = web_sys::window() {
		let _: Result<(), JsValue> = window.alert_with_message(message);
	}
}
