use log::{debug, info, warn};

use super::error::{EdgeRejection, GraphError};
use super::graph::{GraphStore, parse_weight};
use super::mst::{self, MstPlan};
use super::scheduler::{
	AnimationScheduler, DEFAULT_STEP_DURATION_MS, PlaybackEvent, PlaybackPhase, RunOutcome,
};
use super::types::{Algorithm, Edge, Node, Position};

pub const NODE_RADIUS: f64 = 25.0;
pub const DEFAULT_MAX_NODES: usize = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
	pub max_nodes: usize,
	/// Drawn radius, also used for hit-testing.
	pub node_radius: f64,
	pub step_duration_ms: f64,
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self {
			max_nodes: DEFAULT_MAX_NODES,
			node_radius: NODE_RADIUS,
			step_duration_ms: DEFAULT_STEP_DURATION_MS,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
	Info,
	Success,
	Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
	pub kind: StatusKind,
	pub text: String,
}

#[derive(Clone, Copy, Debug, Default)]
struct EdgeGesture {
	start: Option<usize>,
	pointer: Option<Position>,
	swallow_click: bool,
}

/// The edge currently being animated and how far its red line has travelled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InFlightEdge {
	pub edge: Edge,
	pub tip: Position,
}

/// Everything the render surface needs for one frame. Read-only.
#[derive(Clone, Debug)]
pub struct RenderFrame<'a> {
	pub nodes: &'a [Node],
	pub edges: &'a [Edge],
	pub completed: &'a [Edge],
	pub in_flight: Option<InFlightEdge>,
	/// Rubber band from the gesture's start node to the pointer.
	pub pending_edge: Option<(Position, Position)>,
	pub node_radius: f64,
}

/// One user's graph and its algorithm playback.
pub struct MstSession {
	config: SessionConfig,
	graph: GraphStore,
	scheduler: AnimationScheduler,
	gesture: EdgeGesture,
	outbox: Vec<StatusMessage>,
}

impl Default for MstSession {
	fn default() -> Self {
		Self::new(SessionConfig::default())
	}
}

impl MstSession {
	pub fn new(config: SessionConfig) -> Self {
		Self {
			graph: GraphStore::new(config.max_nodes),
			scheduler: AnimationScheduler::new(config.step_duration_ms),
			gesture: EdgeGesture::default(),
			outbox: Vec::new(),
			config,
		}
	}

	pub fn graph(&self) -> &GraphStore {
		&self.graph
	}

	pub fn scheduler(&self) -> &AnimationScheduler {
		&self.scheduler
	}

	pub fn phase(&self) -> PlaybackPhase {
		self.scheduler.phase()
	}

	pub fn generation(&self) -> u64 {
		self.scheduler.generation()
	}

	pub fn can_run(&self) -> bool {
		self.graph.edge_count() > 0
	}

	pub fn set_max_nodes(&mut self, max_nodes: usize) {
		self.config.max_nodes = max_nodes;
		self.graph.set_max_nodes(max_nodes);
		info!(
			"node limit set to {} ({} placed)",
			self.graph.max_nodes(),
			self.graph.node_count()
		);
	}

	/// Drains the status messages produced since the last call.
	pub fn take_status(&mut self) -> Vec<StatusMessage> {
		std::mem::take(&mut self.outbox)
	}

	fn report(&mut self, kind: StatusKind, text: impl Into<String>) {
		let text = text.into();
		match kind {
			StatusKind::Error => warn!("{text}"),
			StatusKind::Info | StatusKind::Success => info!("{text}"),
		}
		self.outbox.push(StatusMessage { kind, text });
	}

	fn report_error(&mut self, err: &GraphError) {
		self.report(StatusKind::Error, err.to_string());
	}

	/// Click on the canvas. Clicks on a node, or the click the browser fires
	/// right after an edge gesture, do not create nodes.
	pub fn on_canvas_click(&mut self, position: Position) -> Option<Result<usize, GraphError>> {
		if std::mem::take(&mut self.gesture.swallow_click) {
			return None;
		}
		if self.graph.node_at(position, self.config.node_radius).is_some() {
			return None;
		}
		Some(self.on_add_node(position))
	}

	pub fn on_add_node(&mut self, position: Position) -> Result<usize, GraphError> {
		match self.graph.add_node(position) {
			Ok(idx) => {
				self.report(StatusKind::Info, format!("Node {idx} added."));
				Ok(idx)
			}
			Err(err) => {
				self.report_error(&err);
				Err(err)
			}
		}
	}

	pub fn on_begin_edge(&mut self, position: Position) -> Option<usize> {
		let start = self.graph.node_at(position, self.config.node_radius);
		self.gesture = EdgeGesture {
			start,
			pointer: start.map(|_| position),
			swallow_click: false,
		};
		if let Some(idx) = start {
			debug!("edge gesture started at node {idx}");
		}
		start
	}

	/// Pointer moved. Returns true when the rubber band needs a redraw.
	pub fn on_drag(&mut self, position: Position) -> bool {
		if self.gesture.start.is_none() {
			return false;
		}
		self.gesture.pointer = Some(position);
		true
	}

	/// Finishes an edge gesture. `weight` is asked for the weight text only once
	/// both endpoints are valid; `None` means the user gave no value. Returns
	/// `None` when no gesture was in progress.
	pub fn on_end_edge<F>(
		&mut self,
		position: Position,
		weight: F,
	) -> Option<Result<Edge, GraphError>>
	where
		F: FnOnce() -> Option<String>,
	{
		let start = self.gesture.start.take()?;
		self.gesture.pointer = None;
		self.gesture.swallow_click = true;

		let result = self.connect(start, position, weight);
		match &result {
			Ok(edge) => {
				self.report(
					StatusKind::Info,
					format!("Edge added with weight {}", edge.weight),
				);
			}
			Err(err) => self.report_error(err),
		}
		Some(result)
	}

	fn connect<F>(&mut self, start: usize, position: Position, weight: F) -> Result<Edge, GraphError>
	where
		F: FnOnce() -> Option<String>,
	{
		let end = self
			.graph
			.node_at(position, self.config.node_radius)
			.ok_or(EdgeRejection::NoEndNode)?;
		if end == start {
			return Err(EdgeRejection::SelfLoop(start).into());
		}
		let input = weight().unwrap_or_default();
		let weight = parse_weight(&input)?;
		self.graph.add_edge(start, end, weight)
	}

	pub fn cancel_gesture(&mut self) {
		self.gesture.start = None;
		self.gesture.pointer = None;
	}

	/// Computes the MST and starts playing it back. Returns the new run generation.
	pub fn run(&mut self, algorithm: Algorithm, now: f64) -> u64 {
		self.report(StatusKind::Info, algorithm.start_message());
		let plan: MstPlan = mst::compute(self.graph.nodes(), self.graph.edges(), algorithm);
		if let Err(err) = plan.check() {
			warn!("{err}");
		}
		let events = self.scheduler.start(plan, now);
		self.publish(events);
		self.scheduler.generation()
	}

	pub fn pause(&mut self, now: f64) -> bool {
		let paused = self.scheduler.pause(now);
		if paused {
			self.report(StatusKind::Info, "Animation paused.");
		}
		paused
	}

	pub fn resume(&mut self, now: f64) -> bool {
		let resumed = self.scheduler.resume(now);
		if resumed {
			self.report(StatusKind::Info, "Animation resumed.");
		}
		resumed
	}

	pub fn toggle_pause(&mut self, now: f64) -> PlaybackPhase {
		match self.scheduler.phase() {
			PlaybackPhase::Running => {
				self.pause(now);
			}
			PlaybackPhase::Paused => {
				self.resume(now);
			}
			PlaybackPhase::Idle | PlaybackPhase::Completed => {}
		}
		self.scheduler.phase()
	}

	pub fn reset(&mut self) {
		self.graph.reset();
		self.scheduler.reset();
		self.gesture = EdgeGesture::default();
		self.report(StatusKind::Info, "Click on the canvas to add nodes.");
	}

	/// Advances playback; true while more frames are needed.
	pub fn tick(&mut self, now: f64) -> bool {
		let events = self.scheduler.tick(now);
		self.publish(events);
		self.scheduler.wants_frames()
	}

	fn publish(&mut self, events: Vec<PlaybackEvent>) {
		for event in events {
			match event {
				PlaybackEvent::StepStarted { explanation, .. } => {
					self.report(StatusKind::Info, explanation);
				}
				PlaybackEvent::StepFinished { index, edge } => {
					debug!("step {index} finished: {edge}");
				}
				PlaybackEvent::Finished {
					outcome: RunOutcome::Spanning { total_weight },
				} => {
					self.report(
						StatusKind::Success,
						format!(
							"Algorithm complete. Minimum Spanning Tree constructed (total weight {total_weight})."
						),
					);
				}
				PlaybackEvent::Finished {
					outcome: RunOutcome::Incomplete(err),
				} => self.report_error(&err),
			}
		}
	}

	pub fn frame(&self, now: f64) -> RenderFrame<'_> {
		let in_flight = self.scheduler.current(now).and_then(|(step, progress)| {
			let from = self.graph.position(step.edge.u)?;
			let to = self.graph.position(step.edge.v)?;
			Some(InFlightEdge {
				edge: step.edge,
				tip: from.lerp(to, progress),
			})
		});
		let pending_edge = self.gesture.start.and_then(|idx| {
			Some((self.graph.position(idx)?, self.gesture.pointer?))
		});
		RenderFrame {
			nodes: self.graph.nodes(),
			edges: self.graph.edges(),
			completed: self.scheduler.completed(),
			in_flight,
			pending_edge,
			node_radius: self.config.node_radius,
		}
	}
}
