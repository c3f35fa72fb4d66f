//! PNG export of the rendered canvas.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlAnchorElement, HtmlCanvasElement};

use crate::error::TopologyError;

const FILE_PREFIX: &str = "network-topology";

/// Download name for an export made on the given calendar day (`month` is 1-based).
pub fn export_file_name(year: u32, month: u32, day: u32) -> String {
	format!("{FILE_PREFIX}-{year:04}{month:02}{day:02}.png")
}

/// Download name for an export made today (UTC).
pub fn today_file_name() -> String {
	let now = js_sys::Date::new_0();
	export_file_name(now.get_utc_full_year(), now.get_utc_month() + 1, now.get_utc_date())
}

/// Encode the container's canvas as PNG and trigger a browser download.
pub fn export_canvas(document: &Document, container: &Element) -> Result<String, TopologyError> {
	let canvas: HtmlCanvasElement = container
		.query_selector("canvas")?
		.and_then(|el| el.dyn_into().ok())
		.ok_or_else(|| TopologyError::NoCanvas(container.id()))?;
	let data_url = canvas.to_data_url_with_type("image/png")?;

	let link: HtmlAnchorElement = document
		.create_element("a")?
		.dyn_into()
		.map_err(|_| TopologyError::Js("anchor element expected".into()))?;
	let file_name = today_file_name();
	link.set_download(&file_name);
	link.set_href(&data_url);
	link.click();
	Ok(file_name)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn file_name_embeds_compact_date() {
		assert_eq!(export_file_name(2024, 3, 7), "network-topology-20240307.png");
		assert_eq!(export_file_name(2025, 12, 31), "network-topology-20251231.png");
	}
}
