//! Step-by-step playback of an [`MstPlan`].
//!
//! The scheduler never reads a clock itself: every transition takes `now` in
//! milliseconds on the `requestAnimationFrame` timeline. Progress is derived
//! from elapsed time, so playback speed does not depend on the frame rate.

use super::error::GraphError;
use super::mst::MstPlan;
use super::types::{AlgorithmStep, Edge};

pub const DEFAULT_STEP_DURATION_MS: f64 = 1000.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackPhase {
	#[default]
	Idle,
	Running,
	Paused,
	Completed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
	Spanning { total_weight: u64 },
	Incomplete(GraphError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaybackEvent {
	StepStarted { index: usize, explanation: String },
	StepFinished { index: usize, edge: Edge },
	Finished { outcome: RunOutcome },
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum StepClock {
	/// Running since this (pause-adjusted) instant.
	Since(f64),
	/// Frozen with this much time already elapsed.
	Frozen(f64),
}

#[derive(Clone, Debug)]
pub struct AnimationScheduler {
	queue: Vec<AlgorithmStep>,
	cursor: usize,
	completed: Vec<Edge>,
	phase: PlaybackPhase,
	clock: Option<StepClock>,
	outcome: Option<RunOutcome>,
	generation: u64,
	duration: f64,
}

impl Default for AnimationScheduler {
	fn default() -> Self {
		Self::new(DEFAULT_STEP_DURATION_MS)
	}
}

impl AnimationScheduler {
	pub fn new(step_duration_ms: f64) -> Self {
		Self {
			queue: Vec::new(),
			cursor: 0,
			completed: Vec::new(),
			phase: PlaybackPhase::Idle,
			clock: None,
			outcome: None,
			generation: 0,
			duration: step_duration_ms,
		}
	}

	pub fn phase(&self) -> PlaybackPhase {
		self.phase
	}

	pub fn cursor(&self) -> usize {
		self.cursor
	}

	pub fn queue(&self) -> &[AlgorithmStep] {
		&self.queue
	}

	pub fn completed(&self) -> &[Edge] {
		&self.completed
	}

	/// Identifies the current run; changes on every start and reset.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// Only a running playback needs animation frames.
	pub fn wants_frames(&self) -> bool {
		self.phase == PlaybackPhase::Running
	}

	pub fn start(&mut self, plan: MstPlan, now: f64) -> Vec<PlaybackEvent> {
		if matches!(self.phase, PlaybackPhase::Running | PlaybackPhase::Paused) {
			self.reset();
		}
		let outcome = match plan.check() {
			Ok(()) => RunOutcome::Spanning {
				total_weight: plan.total_weight(),
			},
			Err(err) => RunOutcome::Incomplete(err),
		};
		self.generation += 1;
		self.queue = plan.steps;
		self.cursor = 0;
		self.completed.clear();
		self.outcome = None;

		if self.queue.is_empty() {
			return vec![self.finish(outcome)];
		}
		self.phase = PlaybackPhase::Running;
		self.clock = Some(StepClock::Since(now));
		self.outcome = Some(outcome);
		vec![self.step_started()]
	}

	pub fn pause(&mut self, now: f64) -> bool {
		if self.phase != PlaybackPhase::Running {
			return false;
		}
		if let Some(StepClock::Since(started)) = self.clock {
			self.clock = Some(StepClock::Frozen((now - started).max(0.0)));
		}
		self.phase = PlaybackPhase::Paused;
		true
	}

	pub fn resume(&mut self, now: f64) -> bool {
		if self.phase != PlaybackPhase::Paused {
			return false;
		}
		if let Some(StepClock::Frozen(elapsed)) = self.clock {
			self.clock = Some(StepClock::Since(now - elapsed));
		}
		self.phase = PlaybackPhase::Running;
		true
	}

	pub fn reset(&mut self) {
		self.queue.clear();
		self.cursor = 0;
		self.completed.clear();
		self.phase = PlaybackPhase::Idle;
		self.clock = None;
		self.outcome = None;
		self.generation += 1;
	}

	/// Progress of the in-flight step in `[0, 1]`.
	pub fn progress(&self, now: f64) -> f64 {
		let elapsed = match self.clock {
			Some(StepClock::Since(started)) => now - started,
			Some(StepClock::Frozen(elapsed)) => elapsed,
			None => return 0.0,
		};
		if self.duration <= 0.0 {
			return 1.0;
		}
		(elapsed.max(0.0) / self.duration).min(1.0)
	}

	/// The step being animated together with its progress.
	pub fn current(&self, now: f64) -> Option<(&AlgorithmStep, f64)> {
		match self.phase {
			PlaybackPhase::Running | PlaybackPhase::Paused => {
				self.queue.get(self.cursor).map(|s| (s, self.progress(now)))
			}
			PlaybackPhase::Idle | PlaybackPhase::Completed => None,
		}
	}

	/// Advances playback. At most one step finishes per call, and the next
	/// step's clock starts at `now`.
	pub fn tick(&mut self, now: f64) -> Vec<PlaybackEvent> {
		if self.phase != PlaybackPhase::Running || self.progress(now) < 1.0 {
			return Vec::new();
		}
		let Some(step) = self.queue.get(self.cursor) else {
			return Vec::new();
		};

		let finished = PlaybackEvent::StepFinished {
			index: self.cursor,
			edge: step.edge,
		};
		self.completed.push(step.edge);
		self.cursor += 1;

		if self.cursor == self.queue.len() {
			let outcome = self.outcome.take().unwrap_or(RunOutcome::Spanning {
				total_weight: self.completed.iter().map(|e| u64::from(e.weight)).sum(),
			});
			return vec![finished, self.finish(outcome)];
		}
		self.clock = Some(StepClock::Since(now));
		vec![finished, self.step_started()]
	}

	fn step_started(&self) -> PlaybackEvent {
		PlaybackEvent::StepStarted {
			index: self.cursor,
			explanation: self.queue[self.cursor].explanation.clone(),
		}
	}

	fn finish(&mut self, outcome: RunOutcome) -> PlaybackEvent {
		self.phase = PlaybackPhase::Completed;
		self.clock = None;
		self.outcome = Some(outcome.clone());
		PlaybackEvent::Finished { outcome }
	}
}
