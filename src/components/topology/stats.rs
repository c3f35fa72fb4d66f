//! Visible-node counts per device group.

use super::group::DeviceGroup;
use super::state::NodeInfo;

/// Counts of visible nodes. The six group counters always sum to `total`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TopologyStats {
	/// Visible routers.
	pub router: usize,
	/// Visible switches.
	pub switch: usize,
	/// Visible servers.
	pub server: usize,
	/// Visible firewalls.
	pub firewall: usize,
	/// Visible access points.
	pub access_point: usize,
	/// Visible nodes with an unknown or missing group.
	pub other: usize,
	/// All visible nodes.
	pub total: usize,
}

impl TopologyStats {
	/// Count every node that is not hidden.
	pub fn collect<'a>(nodes: impl IntoIterator<Item = &'a NodeInfo>) -> Self {
		let mut stats = Self::default();
		for node in nodes {
			stats.add(node);
		}
		stats
	}

	/// Count one node unless it is hidden.
	pub fn add(&mut self, node: &NodeInfo) {
		if !node.hidden {
			self.record(node.group);
		}
	}

	fn record(&mut self, group: DeviceGroup) {
		let slot = match group {
			DeviceGroup::Router => &mut self.router,
			DeviceGroup::Switch => &mut self.switch,
			DeviceGroup::Server => &mut self.server,
			DeviceGroup::Firewall => &mut self.firewall,
			DeviceGroup::AccessPoint => &mut self.access_point,
			DeviceGroup::Other => &mut self.other,
		};
		*slot += 1;
		self.total += 1;
	}

	/// Count for a single group.
	pub fn count(&self, group: DeviceGroup) -> usize {
		match group {
			DeviceGroup::Router => self.router,
			DeviceGroup::Switch => self.switch,
			DeviceGroup::Server => self.server,
			DeviceGroup::Firewall => self.firewall,
			DeviceGroup::AccessPoint => self.access_point,
			DeviceGroup::Other => self.other,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::topology::types::TopologyNode;

	fn info(group: &str, hidden: bool) -> NodeInfo {
		let mut node = NodeInfo::from_record(&TopologyNode {
			id: group.into(),
			group: Some(group.into()),
			..Default::default()
		});
		node.hidden = hidden;
		node
	}

	#[test]
	fn hidden_nodes_are_not_counted() {
		let nodes = [info("router", true), info("server", false), info("server", false)];
		let stats = TopologyStats::collect(&nodes);

		assert_eq!(stats.server, 2);
		assert_eq!(stats.router, 0);
		assert_eq!(stats.other, 0);
		assert_eq!(stats.total, 2);
	}

	#[test]
	fn unrecognized_groups_count_as_other() {
		let nodes = [info("printer", false), info("total", false), info("", false), info("firewall", false)];
		let stats = TopologyStats::collect(&nodes);

		assert_eq!(stats.other, 3);
		assert_eq!(stats.firewall, 1);
		assert_eq!(stats.total, 4);
	}

	#[test]
	fn counters_sum_to_total() {
		let nodes: Vec<_> = ["router", "switch", "server", "firewall", "access_point", "hub"]
			.iter()
			.enumerate()
			.map(|(i, g)| info(g, i % 4 == 0))
			.collect();
		let stats = TopologyStats::collect(&nodes);
		let sum: usize = [
			DeviceGroup::Router,
			DeviceGroup::Switch,
			DeviceGroup::Server,
			DeviceGroup::Firewall,
			DeviceGroup::AccessPoint,
			DeviceGroup::Other,
		]
		.into_iter()
		.map(|g| stats.count(g))
		.sum();

		assert_eq!(sum, stats.total);
		assert_eq!(stats.total, nodes.iter().filter(|n| !n.hidden).count());
	}
}
