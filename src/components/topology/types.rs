//! Inventory records handed to the topology view.

use serde::{Deserialize, Deserializer};

/// A piece of equipment drawn as a node.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TopologyNode {
	/// Unique identifier. Numeric ids are accepted and normalized to strings.
	#[serde(deserialize_with = "loose_id")]
	pub id: String,
	/// Display label drawn inside or under the node shape.
	#[serde(default)]
	pub label: Option<String>,
	/// Raw device type (e.g. "router"). Unknown or missing values fall back
	/// to the default style and the "other" statistics bucket.
	#[serde(default)]
	pub group: Option<String>,
	/// Location the equipment is placed at.
	#[serde(default, deserialize_with = "loose_id_opt")]
	pub location_id: Option<String>,
	/// Operational status (e.g. "active", "maintenance").
	#[serde(default)]
	pub status: Option<String>,
	/// Page opened when the node is clicked.
	#[serde(default)]
	pub url: Option<String>,
	/// Tooltip text shown while hovering.
	#[serde(default)]
	pub title: Option<String>,
	/// Optional magnitude used for value-based node sizing.
	#[serde(default)]
	pub value: Option<f64>,
}

/// A directed connection between two nodes.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TopologyEdge {
	/// Source node id.
	#[serde(alias = "from", deserialize_with = "loose_id")]
	pub source: String,
	/// Target node id.
	#[serde(alias = "to", deserialize_with = "loose_id")]
	pub target: String,
}

/// Complete topology: equipment and connections.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TopologyData {
	/// Equipment, drawn in order.
	pub nodes: Vec<TopologyNode>,
	/// Connections. Absent in the JSON means none.
	#[serde(default, alias = "links")]
	pub edges: Vec<TopologyEdge>,
}

/// Identifiers arrive as JSON numbers or strings depending on the exporter.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseId {
	Int(i64),
	Float(f64),
	Text(String),
}

impl From<LooseId> for String {
	fn from(id: LooseId) -> Self {
		match id {
			LooseId::Int(i) => i.to_string(),
			LooseId::Float(f) if f.fract() == 0.0 => (f as i64).to_string(),
			LooseId::Float(f) => f.to_string(),
			LooseId::Text(s) => s,
		}
	}
}

fn loose_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
	LooseId::deserialize(deserializer).map(Into::into)
}

fn loose_id_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
	Option::<LooseId>::deserialize(deserializer).map(|id| id.map(Into::into))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn numeric_and_string_ids_normalize_to_strings() {
		let data: TopologyData = serde_json::from_str(
			r#"{
				"nodes": [
					{"id": 1, "label": "core", "group": "router", "location_id": 3},
					{"id": "sw-2", "group": "switch", "location_id": "3", "status": "active"}
				],
				"edges": [{"from": 1, "to": "sw-2"}]
			}"#,
		)
		.unwrap();

		assert_eq!(data.nodes[0].id, "1");
		assert_eq!(data.nodes[0].location_id.as_deref(), Some("3"));
		assert_eq!(data.nodes[1].location_id.as_deref(), Some("3"));
		assert_eq!(data.edges[0].source, "1");
		assert_eq!(data.edges[0].target, "sw-2");
	}

	#[test]
	fn optional_fields_default_to_none() {
		let data: TopologyData =
			serde_json::from_str(r#"{"nodes": [{"id": 7, "location_id": null}]}"#).unwrap();
		let node = &data.nodes[0];

		assert!(node.group.is_none());
		assert!(node.location_id.is_none());
		assert!(node.url.is_none());
		assert!(data.edges.is_empty());
	}

	#[test]
	fn edges_accept_source_target_keys() {
		let edge: TopologyEdge = serde_json::from_str(r#"{"source": 4, "target": 5}"#).unwrap();
		assert_eq!((edge.source.as_str(), edge.target.as_str()), ("4", "5"));
	}
}
