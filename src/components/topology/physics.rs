//! Force simulation settings and the stabilization budget.

use force_graph::SimulationParameters;

/// Layout physics configuration.
#[derive(Clone, Debug)]
pub struct PhysicsConfig {
	/// Keep simulating after stabilization.
	pub enabled: bool,
	/// Node repulsion strength.
	pub repulsion: f32,
	/// Pull of every node towards the layout center.
	pub central_gravity: f32,
	/// Rest distance used when placing connected nodes.
	pub spring_length: f32,
	/// Spring stiffness along edges.
	pub spring_constant: f32,
	/// Fraction of velocity lost per step (0 = none, 1 = all).
	pub damping: f32,
	/// Upper bound on the force applied to a node per step.
	pub max_force: f32,
	/// Velocity scale applied by the engine.
	pub node_speed: f32,
	/// Simulation steps run before the layout is considered stable.
	pub stabilization_iterations: u32,
	/// Steps run per animation frame while stabilizing.
	pub update_interval: u32,
	/// Fit the view once stabilization completes.
	pub fit_on_stabilized: bool,
	/// Fixed timestep per simulation step (seconds).
	pub timestep: f32,
}

impl Default for PhysicsConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			repulsion: 50.0,
			central_gravity: 0.01,
			spring_length: 200.0,
			spring_constant: 0.08,
			damping: 0.4,
			max_force: 100.0,
			node_speed: 3000.0,
			stabilization_iterations: 100,
			update_interval: 25,
			fit_on_stabilized: true,
			timestep: 0.016,
		}
	}
}

impl PhysicsConfig {
	/// Map onto the simulation engine's parameter set.
	pub fn simulation_parameters(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.repulsion,
			force_spring: self.spring_constant,
			force_max: self.max_force,
			node_speed: self.node_speed,
			damping_factor: (1.0 - self.damping).clamp(0.0, 1.0),
		}
	}
}

/// Milestones reported by [`Stabilizer::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StabilizationEvent {
	/// Steps were run and budget remains.
	Progress {
		/// Steps left in the budget.
		remaining: u32,
	},
	/// The budget was exhausted during this frame.
	Done,
	/// No stabilization was in progress.
	Idle,
}

/// Counts down a bounded burst of simulation steps.
#[derive(Clone, Debug, Default)]
pub struct Stabilizer {
	remaining: u32,
}

impl Stabilizer {
	/// Start (or restart) a stabilization run.
	pub fn start(&mut self, iterations: u32) {
		self.remaining = iterations;
	}

	/// Whether budget remains.
	pub fn is_running(&self) -> bool {
		self.remaining > 0
	}

	/// Consume up to `per_frame` steps, calling `step` once per step.
	pub fn advance(&mut self, per_frame: u32, mut step: impl FnMut()) -> StabilizationEvent {
		if self.remaining == 0 {
			return StabilizationEvent::Idle;
		}
		let steps = per_frame.max(1).min(self.remaining);
		for _ in 0..steps {
			step();
		}
		self.remaining -= steps;
		if self.remaining == 0 {
			StabilizationEvent::Done
		} else {
			StabilizationEvent::Progress {
				remaining: self.remaining,
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn budget_is_consumed_in_frame_sized_chunks() {
		let mut stabilizer = Stabilizer::default();
		stabilizer.start(60);
		let mut steps = 0;

		assert_eq!(
			stabilizer.advance(25, || steps += 1),
			StabilizationEvent::Progress { remaining: 35 }
		);
		assert_eq!(
			stabilizer.advance(25, || steps += 1),
			StabilizationEvent::Progress { remaining: 10 }
		);
		assert_eq!(stabilizer.advance(25, || steps += 1), StabilizationEvent::Done);
		assert_eq!(stabilizer.advance(25, || steps += 1), StabilizationEvent::Idle);
		assert_eq!(steps, 60);
	}

	#[test]
	fn restarting_resets_the_budget() {
		let mut stabilizer = Stabilizer::default();
		stabilizer.start(100);
		stabilizer.advance(25, || {});
		stabilizer.start(100);

		assert_eq!(
			stabilizer.advance(25, || {}),
			StabilizationEvent::Progress { remaining: 75 }
		);
	}

	#[test]
	fn damping_maps_to_velocity_retention() {
		let params = PhysicsConfig::default().simulation_parameters();
		assert!((params.damping_factor - 0.6).abs() < 1e-6);
		assert_eq!(params.force_spring, 0.08);
	}
}
