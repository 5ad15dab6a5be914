use std::fmt;

/// A point on the canvas, in canvas pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

impl Position {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Position) -> f64 {
		(self.x - other.x).hypot(self.y - other.y)
	}

	/// Linear interpolation towards `to`; `t` is clamped to `[0, 1]`.
	pub fn lerp(self, to: Position, t: f64) -> Position {
		let t = t.clamp(0.0, 1.0);
		Position {
			x: self.x + (to.x - self.x) * t,
			y: self.y + (to.y - self.y) * t,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
	pub position: Position,
}

/// Undirected weighted edge between two node indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
	pub u: usize,
	pub v: usize,
	pub weight: u32,
}

impl Edge {
	pub const fn new(u: usize, v: usize, weight: u32) -> Self {
		Self { u, v, weight }
	}
}

impl fmt::Display for Edge {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}, {}) with weight {}", self.u, self.v, self.weight)
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlgorithmStep {
	pub edge: Edge,
	pub explanation: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
	Prim,
	Kruskal,
}

impl Algorithm {
	pub fn start_message(self) -> &'static str {
		match self {
			Algorithm::Prim => "Starting Prim's Algorithm.",
			Algorithm::Kruskal => "Starting Kruskal's Algorithm. Sorting edges by weight.",
		}
	}
}

impl fmt::Display for Algorithm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Algorithm::Prim => "Prim's",
			Algorithm::Kruskal => "Kruskal's",
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lerp_is_linear_in_both_coordinates() {
		let a = Position::new(0.0, 10.0);
		let b = Position::new(100.0, 30.0);
		assert_eq!(a.lerp(b, 0.25), Position::new(25.0, 15.0));
		assert_eq!(a.lerp(b, 1.0), b);
		assert_eq!(a.lerp(b, 3.0), b);
		assert_eq!(a.lerp(b, -1.0), a);
	}

	#[test]
	fn edge_display_matches_explanations() {
		assert_eq!(Edge::new(1, 2, 3).to_string(), "(1, 2) with weight 3");
		assert_eq!(Algorithm::Kruskal.to_string(), "Kruskal's");
	}
}
