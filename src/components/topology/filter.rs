//! Node visibility filters.
//!
//! Only one filter is active at a time. Applying a filter recomputes every
//! node's `hidden` flag from that filter alone, so a type filter followed by
//! a status filter leaves only the status filter in effect.

use super::state::NodeInfo;

/// The currently applied visibility predicate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NodeFilter {
	/// Every node is visible.
	#[default]
	ShowAll,
	/// Keep nodes whose raw group equals the value.
	Type(String),
	/// Keep nodes placed at the location.
	Location(String),
	/// Keep nodes with the status.
	Status(String),
}

impl NodeFilter {
	/// An empty value clears filtering.
	pub fn by_type(value: &str) -> Self {
		Self::non_empty(value, Self::Type)
	}

	/// Keep one location; empty clears filtering.
	pub fn by_location(value: &str) -> Self {
		Self::non_empty(value, Self::Location)
	}

	/// Keep one status; empty clears filtering.
	pub fn by_status(value: &str) -> Self {
		Self::non_empty(value, Self::Status)
	}

	fn non_empty(value: &str, make: fn(String) -> Self) -> Self {
		if value.is_empty() {
			Self::ShowAll
		} else {
			make(value.to_string())
		}
	}

	/// Whether a node is hidden under this filter. A node lacking the
	/// filtered attribute never matches.
	pub fn hides(&self, node: &NodeInfo) -> bool {
		let (attr, wanted) = match self {
			Self::ShowAll => return false,
			Self::Type(v) => (node.group_name.as_deref(), v),
			Self::Location(v) => (node.location_id.as_deref(), v),
			Self::Status(v) => (node.status.as_deref(), v),
		};
		attr != Some(wanted.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::topology::types::TopologyNode;

	fn node(group: Option<&str>, location: Option<&str>, status: Option<&str>) -> NodeInfo {
		NodeInfo::from_record(&TopologyNode {
			id: "n".into(),
			group: group.map(Into::into),
			location_id: location.map(Into::into),
			status: status.map(Into::into),
			..Default::default()
		})
	}

	#[test]
	fn empty_values_show_everything() {
		assert_eq!(NodeFilter::by_type(""), NodeFilter::ShowAll);
		assert_eq!(NodeFilter::by_location(""), NodeFilter::ShowAll);
		assert_eq!(NodeFilter::by_status(""), NodeFilter::ShowAll);
		assert!(!NodeFilter::ShowAll.hides(&node(None, None, None)));
	}

	#[test]
	fn filters_compare_their_own_attribute() {
		let n = node(Some("router"), Some("3"), Some("active"));

		assert!(!NodeFilter::by_type("router").hides(&n));
		assert!(NodeFilter::by_type("server").hides(&n));
		assert!(!NodeFilter::by_location("3").hides(&n));
		assert!(NodeFilter::by_location("4").hides(&n));
		assert!(!NodeFilter::by_status("active").hides(&n));
		assert!(NodeFilter::by_status("inactive").hides(&n));
	}

	#[test]
	fn missing_attribute_is_hidden_by_concrete_filter() {
		let n = node(None, None, None);

		assert!(NodeFilter::by_type("router").hides(&n));
		assert!(NodeFilter::by_location("1").hides(&n));
		assert!(NodeFilter::by_status("active").hides(&n));
	}
}
