//! Page controls and statistics slots around the topology canvas.
//!
//! Every control is optional: an id set to `None`, or an id with no matching
//! element on the page, is simply left unwired.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Deserialize;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlInputElement, HtmlSelectElement};

use super::handle::TopologyHandle;
use super::stats::TopologyStats;

/// Event listeners kept alive for the lifetime of the page.
pub type Listeners = Rc<RefCell<Vec<Closure<dyn FnMut(Event)>>>>;

/// Element ids of the optional page controls.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TopologyControls {
	/// Zooms in by 20%.
	pub zoom_in: Option<String>,
	/// Zooms out by 20%.
	pub zoom_out: Option<String>,
	/// Fits and restabilizes.
	pub reset: Option<String>,
	/// Downloads a PNG.
	pub export: Option<String>,
	/// Toggles fullscreen on the container.
	pub fullscreen: Option<String>,
	/// `<select>` of device groups.
	pub type_filter: Option<String>,
	/// `<select>` of location ids.
	pub location_filter: Option<String>,
	/// `<select>` of statuses.
	pub status_filter: Option<String>,
	/// Checkbox enabling physics.
	pub physics_toggle: Option<String>,
}

impl Default for TopologyControls {
	fn default() -> Self {
		let id = |s: &str| Some(s.to_string());
		Self {
			zoom_in: id("btn-zoom-in"),
			zoom_out: id("btn-zoom-out"),
			reset: id("btn-reset"),
			export: id("btn-export"),
			fullscreen: id("btn-fullscreen"),
			type_filter: id("type-filter"),
			location_filter: id("location-filter"),
			status_filter: id("status-filter"),
			physics_toggle: id("physics-toggle"),
		}
	}
}

impl TopologyControls {
	/// Attach listeners for every control present in the document.
	pub fn wire(&self, handle: &TopologyHandle, document: &Document, listeners: &Listeners) {
		let mut wired = listeners.borrow_mut();
		let mut on = |id: &Option<String>, event: &str, cb: Box<dyn FnMut(Event)>| {
			let Some(id) = id.as_deref() else {
				return;
			};
			let Some(element) = document.get_element_by_id(id) else {
				log::debug!("topology: control #{id} not on page");
				return;
			};
			let closure = Closure::wrap(cb);
			if let Err(e) =
				element.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
			{
				log::warn!("topology: could not wire #{id}: {e:?}");
				return;
			}
			wired.push(closure);
		};

		let h = handle.clone();
		on(&self.zoom_in, "click", Box::new(move |_| h.zoom_in()));
		let h = handle.clone();
		on(&self.zoom_out, "click", Box::new(move |_| h.zoom_out()));
		let h = handle.clone();
		on(&self.reset, "click", Box::new(move |_| h.reset()));
		let h = handle.clone();
		on(&self.export, "click", Box::new(move |_| h.export_as_image()));
		let h = handle.clone();
		on(&self.fullscreen, "click", Box::new(move |_| h.toggle_fullscreen()));

		let h = handle.clone();
		on(
			&self.type_filter,
			"change",
			Box::new(move |ev| h.filter_by_type(&select_value(&ev))),
		);
		let h = handle.clone();
		on(
			&self.location_filter,
			"change",
			Box::new(move |ev| h.filter_by_location(&select_value(&ev))),
		);
		let h = handle.clone();
		on(
			&self.status_filter,
			"change",
			Box::new(move |ev| h.filter_by_status(&select_value(&ev))),
		);

		let h = handle.clone();
		on(
			&self.physics_toggle,
			"change",
			Box::new(move |ev| {
				let checked = ev
					.target()
					.and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
					.is_some_and(|input| input.checked());
				h.set_physics_enabled(checked);
			}),
		);
	}
}

/// Current value of the `<select>` that fired the event ("" when unavailable).
fn select_value(ev: &Event) -> String {
	ev.target()
		.and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
		.map(|select| select.value())
		.unwrap_or_default()
}

/// Element ids receiving the statistics counters.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct StatsSlots {
	/// Receives "N devices".
	pub total: Option<String>,
	/// Router count.
	pub router: Option<String>,
	/// Switch count.
	pub switch: Option<String>,
	/// Server count.
	pub server: Option<String>,
	/// Firewall count.
	pub firewall: Option<String>,
	/// Access point count.
	pub access_point: Option<String>,
	/// Count of unclassified nodes.
	pub other: Option<String>,
}

impl Default for StatsSlots {
	fn default() -> Self {
		let id = |s: &str| Some(s.to_string());
		Self {
			total: id("node-count"),
			router: id("stat-routers"),
			switch: id("stat-switches"),
			server: id("stat-servers"),
			firewall: id("stat-firewalls"),
			access_point: id("stat-access-points"),
			other: id("stat-others"),
		}
	}
}

impl StatsSlots {
	/// `(element id, text)` pairs for every configured slot.
	pub fn entries(&self, stats: &TopologyStats) -> Vec<(&str, String)> {
		[
			(&self.total, format!("{} devices", stats.total)),
			(&self.router, stats.router.to_string()),
			(&self.switch, stats.switch.to_string()),
			(&self.server, stats.server.to_string()),
			(&self.firewall, stats.firewall.to_string()),
			(&self.access_point, stats.access_point.to_string()),
			(&self.other, stats.other.to_string()),
		]
		.into_iter()
		.filter_map(|(id, text)| id.as_deref().map(|id| (id, text)))
		.collect()
	}

	/// Write the counters into whichever slots exist on the page.
	pub fn write(&self, document: &Document, stats: &TopologyStats) {
		for (id, text) in self.entries(stats) {
			if let Some(element) = document.get_element_by_id(id) {
				element.set_text_content(Some(&text));
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn slots_render_counts_with_total_suffix() {
		let stats = TopologyStats {
			router: 1,
			server: 2,
			total: 3,
			..Default::default()
		};
		let slots = StatsSlots::default();
		let entries = slots.entries(&stats);

		assert_eq!(entries[0], ("node-count", "3 devices".to_string()));
		assert!(entries.contains(&("stat-routers", "1".to_string())));
		assert!(entries.contains(&("stat-servers", "2".to_string())));
		assert!(entries.contains(&("stat-others", "0".to_string())));
		assert_eq!(entries.len(), 7);
	}

	#[test]
	fn unset_slots_are_skipped() {
		let slots = StatsSlots {
			router: None,
			other: None,
			..Default::default()
		};
		assert_eq!(slots.entries(&TopologyStats::default()).len(), 5);
	}

	#[test]
	fn control_ids_can_be_overridden_from_json() {
		let controls: TopologyControls =
			serde_json::from_str(r#"{"zoom_in": "plus", "export": null}"#).unwrap();

		assert_eq!(controls.zoom_in.as_deref(), Some("plus"));
		assert!(controls.export.is_none());
		assert_eq!(controls.reset.as_deref(), Some("btn-reset"));
	}
}
