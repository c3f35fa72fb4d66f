//! topology-view: interactive network topology diagrams for equipment inventories.
//!
//! This crate provides a WASM-based view that renders equipment and their
//! connections as a force-directed diagram inside an existing page element,
//! with filtering, live statistics, zoom/fit, PNG export and fullscreen.

use leptos::prelude::*;
use log::{Level, debug, error, info, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlScriptElement, Window};

pub mod components;
mod error;

pub use components::topology::{
	StatsSlots, TopologyCanvas, TopologyControls, TopologyData, TopologyEdge, TopologyHandle,
	TopologyNode, TopologyOptions, TopologyStats,
};
pub use error::TopologyError;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("topology: logging initialized");
}

/// Parse the JSON body of a `<script>` element, e.g.
/// `<script type="application/json" id="topology-data">`.
pub fn load_json_script<T: DeserializeOwned>(id: &str) -> Option<T> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let Some(element) = document.get_element_by_id(id) else {
		debug!("topology: no #{id} script on page");
		return None;
	};
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<T>(&json_text) {
		Ok(value) => Some(value),
		Err(e) => {
			warn!("topology: failed to parse #{id}: {e}");
			None
		}
	}
}

/// A topology diagram bound to a container element.
///
/// Construction only records inputs; nothing is rendered until [`init`](Self::init).
pub struct TopologyView {
	container_id: String,
	data: TopologyData,
	controls: TopologyControls,
	stats_slots: StatsSlots,
	options: TopologyOptions,
}

impl TopologyView {
	/// Record the container id and inventory. Missing edges mean an unconnected diagram.
	pub fn new(
		container_id: impl Into<String>,
		nodes: Vec<TopologyNode>,
		edges: Option<Vec<TopologyEdge>>,
	) -> Self {
		Self {
			container_id: container_id.into(),
			data: TopologyData {
				nodes,
				edges: edges.unwrap_or_default(),
			},
			controls: TopologyControls::default(),
			stats_slots: StatsSlots::default(),
			options: TopologyOptions::default(),
		}
	}

	/// Use custom element ids for the page controls.
	pub fn with_controls(mut self, controls: TopologyControls) -> Self {
		self.controls = controls;
		self
	}

	/// Use custom element ids for the statistics counters.
	pub fn with_stats_slots(mut self, slots: StatsSlots) -> Self {
		self.stats_slots = slots;
		self
	}

	/// Override the layout, styling and interaction settings.
	pub fn with_options(mut self, options: TopologyOptions) -> Self {
		self.options = options;
		self
	}

	/// Inventory the view was built with.
	pub fn data(&self) -> &TopologyData {
		&self.data
	}

	/// Mount the canvas into the container and wire page controls.
	///
	/// A missing container is logged and reported; nothing is rendered.
	pub fn init(self) -> Result<TopologyHandle, TopologyError> {
		let document = web_sys::window()
			.ok_or(TopologyError::NoWindow)?
			.document()
			.ok_or(TopologyError::NoDocument)?;
		let Some(container) = document
			.get_element_by_id(&self.container_id)
			.and_then(|el| el.dyn_into::<HtmlElement>().ok())
		else {
			error!("topology: container #{} not found", self.container_id);
			return Err(TopologyError::ContainerNotFound(self.container_id));
		};

		let handle = TopologyHandle::new(&self.container_id, self.stats_slots);
		let (data, options, canvas_handle) = (self.data, self.options, handle.clone());
		let data = Signal::derive(move || data.clone());

		leptos::mount::mount_to(container, move || {
			view! { <TopologyCanvas handle=canvas_handle data=data options=options /> }
		})
		.forget();

		self.controls.wire(&handle, &document, handle.listeners());
		info!("topology: mounted into #{}", self.container_id);
		Ok(handle)
	}
}
