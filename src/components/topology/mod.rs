//! Force-directed network topology view.
//!
//! Renders equipment nodes and their connections on an HTML canvas with:
//! - Group-derived shapes and colors (router, switch, server, firewall, access point)
//! - Physics-based layout with a bounded stabilization burst, then fit-to-view
//! - Pan, zoom, node dragging, hover tooltips and click-through navigation
//! - Type/location/status filtering with live per-group statistics
//! - PNG export and fullscreen toggling through optional page controls
//!
//! # Example
//!
//! ```ignore
//! use topology_view::{TopologyNode, TopologyView};
//!
//! let nodes = vec![TopologyNode { id: "1".into(), group: Some("router".into()), ..Default::default() }];
//! let handle = TopologyView::new("network-topology", nodes, None).init()?;
//! handle.filter_by_type("router");
//! ```

mod component;
pub mod controls;
mod export;
pub mod filter;
pub mod group;
mod handle;
pub mod options;
pub mod physics;
mod render;
pub mod scale;
pub mod state;
pub mod stats;
pub mod theme;
mod types;

pub use component::TopologyCanvas;
pub use controls::{StatsSlots, TopologyControls};
pub use export::export_file_name;
pub use handle::TopologyHandle;
pub use options::TopologyOptions;
pub use stats::TopologyStats;
pub use types::{TopologyData, TopologyEdge, TopologyNode};
