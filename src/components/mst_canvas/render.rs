use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::RenderFrame;
use super::types::{Edge, Node, Position};

const EDGE_COLOR: &str = "#aaaaaa";
const COMPLETED_COLOR: &str = "#006400";
const IN_FLIGHT_COLOR: &str = "#FF0000";
const PENDING_COLOR: &str = "#555555";
const NODE_COLOR: &str = "#007BFF";
const LABEL_FONT: &str = "16px Arial";
const EDGE_WIDTH: f64 = 5.0;

pub fn render(frame: &RenderFrame<'_>, ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
	ctx.clear_rect(0.0, 0.0, width, height);

	for edge in frame.edges {
		draw_edge(frame.nodes, ctx, edge, EDGE_COLOR);
	}
	for edge in frame.completed {
		draw_edge(frame.nodes, ctx, edge, COMPLETED_COLOR);
	}
	if let Some(in_flight) = frame.in_flight {
		if let Some(start) = frame.nodes.get(in_flight.edge.u) {
			draw_line(ctx, start.position, in_flight.tip, IN_FLIGHT_COLOR, EDGE_WIDTH);
		}
	}
	if let Some((from, to)) = frame.pending_edge {
		draw_pending(ctx, from, to);
	}
	draw_nodes(frame.nodes, frame.node_radius, ctx);
}

fn draw_edge(nodes: &[Node], ctx: &CanvasRenderingContext2d, edge: &Edge, color: &str) {
	let (Some(a), Some(b)) = (nodes.get(edge.u), nodes.get(edge.v)) else {
		return;
	};
	let (start, end) = (a.position, b.position);
	draw_line(ctx, start, end, color, EDGE_WIDTH);
	let mid = start.lerp(end, 0.5);
	ctx.set_fill_style_str("#333");
	ctx.set_font(LABEL_FONT);
	let _ = ctx.fill_text(&edge.weight.to_string(), mid.x, mid.y);
}

fn draw_line(ctx: &CanvasRenderingContext2d, start: Position, end: Position, color: &str, width: f64) {
	ctx.begin_path();
	ctx.move_to(start.x, start.y);
	ctx.line_to(end.x, end.y);
	ctx.set_stroke_style_str(color);
	ctx.set_line_width(width);
	ctx.stroke();
	ctx.close_path();
}

fn draw_pending(ctx: &CanvasRenderingContext2d, from: Position, to: Position) {
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(8.0),
		&JsValue::from_f64(6.0),
	));
	draw_line(ctx, from, to, PENDING_COLOR, 2.0);
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(nodes: &[Node], radius: f64, ctx: &CanvasRenderingContext2d) {
	for (index, node) in nodes.iter().enumerate() {
		let Position { x, y } = node.position;
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(NODE_COLOR);
		ctx.fill();
		ctx.set_stroke_style_str("#000");
		ctx.set_line_width(1.0);
		ctx.stroke();
		ctx.close_path();

		ctx.set_fill_style_str("#fff");
		ctx.set_font(LABEL_FONT);
		let _ = ctx.fill_text(&index.to_string(), x - 8.0, y + 6.0);
	}
}
