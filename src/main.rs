//! Client entrypoint for the CSR build.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use topology_view::{TopologyControls, TopologyData, TopologyView, init_logging, load_json_script};

const CONTAINER_ID: &str = "network-topology";

fn main() {
	init_logging();

	let data: TopologyData = load_json_script("topology-data").unwrap_or_default();
	let controls: TopologyControls = load_json_script("topology-controls").unwrap_or_default();

	let view = TopologyView::new(CONTAINER_ID, data.nodes, Some(data.edges)).with_controls(controls);
	if let Err(e) = view.init() {
		log::error!("topology: {e}");
	}
}
