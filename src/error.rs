//! Errors raised at the DOM boundary.
//!
//! None of these reach the user as exceptions: callers log them and carry on.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while mounting or driving the topology view.
#[derive(Debug, Error)]
pub enum TopologyError {
	/// Not running inside a browser window.
	#[error("no browser window available")]
	NoWindow,
	/// The window has no document.
	#[error("no document available")]
	NoDocument,
	/// No element with the container id.
	#[error("container #{0} not found")]
	ContainerNotFound(String),
	/// The container has not rendered a canvas yet.
	#[error("no canvas found inside #{0}")]
	NoCanvas(String),
	/// A DOM call threw.
	#[error("javascript error: {0}")]
	Js(String),
}

impl From<JsValue> for TopologyError {
	fn from(value: JsValue) -> Self {
		let message = value
			.as_string()
			.or_else(|| {
				js_sys::Reflect::get(&value, &JsValue::from_str("message"))
					.ok()
					.and_then(|m| m.as_string())
			})
			.unwrap_or_else(|| format!("{value:?}"));
		Self::Js(message)
	}
}
