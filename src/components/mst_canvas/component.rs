use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, MouseEvent};

use super::render;
use super::scheduler::PlaybackPhase;
use super::state::{DEFAULT_MAX_NODES, MstSession, SessionConfig, StatusKind, StatusMessage};
use super::types::{Algorithm, Position};

const WEIGHT_PROMPT: &str = "Enter the weight for the edge:";
const INITIAL_STATUS: &str = "Click on the canvas to add nodes.";

/// Milliseconds on the same timeline for every caller.
fn now_ms() -> f64 {
	web_sys::window()
		.and_then(|w| w.performance())
		.map(|p| p.now())
		.unwrap_or_else(js_sys::Date::now)
}

fn prompt_weight() -> Option<String> {
	web_sys::window()?
		.prompt_with_message(WEIGHT_PROMPT)
		.ok()
		.flatten()
}

/// Reactive mirrors of the session shown outside the canvas.
#[derive(Clone, Copy)]
struct Ui {
	status: RwSignal<String>,
	status_kind: RwSignal<StatusKind>,
	phase: RwSignal<PlaybackPhase>,
	can_run: RwSignal<bool>,
	/// (current step, queue length)
	step: RwSignal<(usize, usize)>,
	/// (placed, limit)
	nodes: RwSignal<(usize, usize)>,
}

impl Ui {
	fn new(max_nodes: usize) -> Self {
		Self {
			status: RwSignal::new(INITIAL_STATUS.to_owned()),
			status_kind: RwSignal::new(StatusKind::Info),
			phase: RwSignal::new(PlaybackPhase::Idle),
			can_run: RwSignal::new(false),
			step: RwSignal::new((0, 0)),
			nodes: RwSignal::new((0, max_nodes)),
		}
	}

	/// Called every frame; only signals whose value moved notify their views.
	fn sync(self, session: &mut MstSession) {
		if let Some(StatusMessage { kind, text }) = session.take_status().pop() {
			set_if_changed(self.status, text);
			set_if_changed(self.status_kind, kind);
		}
		set_if_changed(self.phase, session.phase());
		set_if_changed(self.can_run, session.can_run());
		let graph = session.graph();
		set_if_changed(self.nodes, (graph.node_count(), graph.max_nodes()));
		let scheduler = session.scheduler();
		set_if_changed(self.step, (scheduler.cursor(), scheduler.queue().len()));
	}

	fn step_label(self) -> String {
		let (cursor, total) = self.step.get();
		match self.phase.get() {
			PlaybackPhase::Running | PlaybackPhase::Paused => {
				format!("Step {} of {}", (cursor + 1).min(total), total)
			}
			PlaybackPhase::Completed => format!("{total} edges selected"),
			PlaybackPhase::Idle => String::new(),
		}
	}

	fn is_active(self) -> bool {
		matches!(
			self.phase.get(),
			PlaybackPhase::Running | PlaybackPhase::Paused
		)
	}
}

fn set_if_changed<T: PartialEq + Send + Sync + 'static>(signal: RwSignal<T>, value: T) {
	signal.maybe_update(|current| {
		if *current == value {
			false
		} else {
			*current = value;
			true
		}
	});
}

/// Whether a frame scheduled for run `scheduled` may still advance run `current`.
/// Frames outlive a reset or restart only as stale callbacks, which are dropped.
fn should_run(scheduled: u64, current: u64) -> bool {
	scheduled == current
}

/// A single pending `requestAnimationFrame`, tagged with the run it belongs to.
#[derive(Clone, Default)]
struct FrameLoop {
	callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	pending: Rc<Cell<Option<(i32, u64)>>>,
}

impl FrameLoop {
	fn request(&self, generation: u64) {
		match self.pending.get() {
			Some((_, scheduled)) if should_run(scheduled, generation) => return,
			Some(_) => self.cancel(),
			None => {}
		}
		let Some(window) = web_sys::window() else {
			return;
		};
		if let Some(ref cb) = *self.callback.borrow() {
			match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				Ok(id) => self.pending.set(Some((id, generation))),
				Err(err) => warn!("requestAnimationFrame failed: {err:?}"),
			}
		}
	}

	fn cancel(&self) {
		if let Some((id, _)) = self.pending.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(id);
			}
		}
	}

	/// Marks the pending frame as delivered and returns its run generation.
	fn fire(&self) -> Option<u64> {
		self.pending.take().map(|(_, generation)| generation)
	}
}

#[derive(Clone)]
struct Controller {
	session: Rc<RefCell<MstSession>>,
	ctx: Rc<RefCell<Option<CanvasRenderingContext2d>>>,
	canvas_ref: NodeRef<leptos::html::Canvas>,
	frames: FrameLoop,
	ui: Ui,
	width: f64,
	height: f64,
}

impl Controller {
	fn paint(&self, session: &MstSession, now: f64) {
		if let Some(ref ctx) = *self.ctx.borrow() {
			render::render(&session.frame(now), ctx, self.width, self.height);
		}
	}

	/// Runs `f` on the session, then repaints and publishes status.
	fn update<T>(&self, f: impl FnOnce(&mut MstSession, f64) -> T) -> T {
		let now = now_ms();
		let mut session = self.session.borrow_mut();
		let out = f(&mut *session, now);
		self.paint(&*session, now);
		self.ui.sync(&mut *session);
		out
	}

	fn pointer(&self, ev: &MouseEvent) -> Option<Position> {
		let canvas: HtmlCanvasElement = self.canvas_ref.get_untracked()?;
		let rect = canvas.get_bounding_client_rect();
		Some(Position::new(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	}

	fn on_frame(&self) {
		let Some(scheduled) = self.frames.fire() else {
			return;
		};
		let next = self.update(|session, now| {
			if !should_run(scheduled, session.generation()) {
				debug!("dropping frame of superseded run {scheduled}");
				return None;
			}
			session.tick(now).then(|| session.generation())
		});
		if let Some(generation) = next {
			self.frames.request(generation);
		}
	}

	fn start(&self, algorithm: Algorithm) {
		let generation = self.update(|session, now| session.run(algorithm, now));
		self.frames.cancel();
		if self.session.borrow().scheduler().wants_frames() {
			self.frames.request(generation);
		}
	}

	fn toggle_pause(&self) {
		let (phase, generation) =
			self.update(|session, now| (session.toggle_pause(now), session.generation()));
		match phase {
			PlaybackPhase::Running => self.frames.request(generation),
			PlaybackPhase::Paused | PlaybackPhase::Idle | PlaybackPhase::Completed => {
				self.frames.cancel()
			}
		}
	}

	fn reset(&self) {
		self.frames.cancel();
		self.update(|session, _| session.reset());
	}
}

#[component]
pub fn MstCanvas(
	#[prop(default = 800.0)] width: f64,
	#[prop(default = 500.0)] height: f64,
	#[prop(default = DEFAULT_MAX_NODES)] max_nodes: usize,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let ui = Ui::new(max_nodes);
	let controller = Controller {
		session: Rc::new(RefCell::new(MstSession::new(SessionConfig {
			max_nodes,
			..SessionConfig::default()
		}))),
		ctx: Rc::new(RefCell::new(None)),
		canvas_ref,
		frames: FrameLoop::default(),
		ui,
		width,
		height,
	};

	let c_init = controller.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("canvas 2d context unavailable");
			return;
		};
		*c_init.ctx.borrow_mut() = Some(ctx);

		let c_frame = c_init.clone();
		*c_init.frames.callback.borrow_mut() = Some(Closure::new(move || c_frame.on_frame()));
		c_init.update(|_, _| ());
	});

	let c = controller.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(pos) = c.pointer(&ev) else {
			return;
		};
		c.update(|session, _| session.on_canvas_click(pos));
	};

	let c = controller.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(pos) = c.pointer(&ev) else {
			return;
		};
		// also clears a click swallow left over from a gesture whose click never fired
		c.session.borrow_mut().on_begin_edge(pos);
	};

	let c = controller.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(pos) = c.pointer(&ev) else {
			return;
		};
		let moved = c.session.borrow_mut().on_drag(pos);
		if moved {
			c.paint(&*c.session.borrow(), now_ms());
		}
	};

	let c = controller.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some(pos) = c.pointer(&ev) else {
			return;
		};
		c.update(|session, _| session.on_end_edge(pos, prompt_weight));
	};

	let c = controller.clone();
	let on_mouseleave = move |_: MouseEvent| {
		c.update(|session, _| session.cancel_gesture());
	};

	let c = controller.clone();
	let on_limit = move |ev: Event| {
		match event_target_value(&ev).trim().parse::<usize>() {
			Ok(limit) => c.update(|session, _| session.set_max_nodes(limit)),
			Err(err) => debug!("ignoring node limit input: {err}"),
		}
	};

	let (c_prim, c_kruskal, c_pause, c_reset) = (
		controller.clone(),
		controller.clone(),
		controller.clone(),
		controller,
	);

	view! {
		<div class="mst-canvas">
			<div class="mst-controls">
				<label>
					"Max nodes: "
					<input type="number" min="1" prop:value=max_nodes.to_string() on:input=on_limit />
				</label>
				<button on:click=move |_| c_prim.start(Algorithm::Prim) disabled=move || !ui.can_run.get()>
					"Start Prim's"
				</button>
				<button
					on:click=move |_| c_kruskal.start(Algorithm::Kruskal)
					disabled=move || !ui.can_run.get()
				>
					"Start Kruskal's"
				</button>
				<button on:click=move |_| c_pause.toggle_pause() disabled=move || !ui.is_active()>
					{move || if ui.phase.get() == PlaybackPhase::Paused { "Resume" } else { "Pause" }}
				</button>
				<button on:click=move |_| c_reset.reset()>"Reset Graph"</button>
				<span class="node-counter">
					{move || {
						let (placed, limit) = ui.nodes.get();
						format!("{placed} / {limit} nodes")
					}}
				</span>
			</div>
			<canvas
				node_ref=canvas_ref
				class="mst-canvas-surface"
				on:click=on_click
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				style="display: block; border: 1px solid #ccc; cursor: crosshair;"
			/>
			<div class="status-box" class:error=move || ui.status_kind.get() == StatusKind::Error>
				{move || ui.status.get()}
			</div>
			<div class="step-counter">{move || ui.step_label()}</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case(0, 0, true)]
	#[case(3, 3, true)]
	#[case(2, 3, false)]
	#[case(4, 3, false)]
	fn frames_only_run_for_their_own_generation(
		#[case] scheduled: u64,
		#[case] current: u64,
		#[case] expected: bool,
	) {
		assert_eq!(should_run(scheduled, current), expected);
	}

	#[test]
	fn frame_scheduled_before_reset_is_stale() {
		let mut session = MstSession::default();
		let (a, b) = (Position::new(100.0, 100.0), Position::new(300.0, 100.0));
		session.on_add_node(a).unwrap();
		session.on_add_node(b).unwrap();
		session.on_begin_edge(a);
		session.on_end_edge(b, || Some("4".into())).unwrap().unwrap();
		let scheduled = session.run(Algorithm::Prim, 0.0);
		assert!(should_run(scheduled, session.generation()));

		session.reset();
		assert!(!should_run(scheduled, session.generation()));
	}

	#[test]
	fn frame_scheduled_before_restart_is_stale() {
		let mut session = MstSession::default();
		let scheduled = session.run(Algorithm::Kruskal, 0.0);
		let restarted = session.run(Algorithm::Prim, 10.0);
		assert!(!should_run(scheduled, session.generation()));
		assert!(should_run(restarted, session.generation()));
	}
}
