use super::error::{EdgeRejection, GraphError};
use super::types::{Edge, Node, Position};

/// Nodes and edges built by the user. Both only grow until [`GraphStore::reset`].
#[derive(Clone, Debug)]
pub struct GraphStore {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	max_nodes: usize,
}

impl GraphStore {
	pub fn new(max_nodes: usize) -> Self {
		Self {
			nodes: Vec::new(),
			edges: Vec::new(),
			max_nodes,
		}
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn max_nodes(&self) -> usize {
		self.max_nodes
	}

	/// Lowering the limit below the current count keeps existing nodes and
	/// only blocks further additions.
	pub fn set_max_nodes(&mut self, max_nodes: usize) {
		self.max_nodes = max_nodes;
	}

	pub fn position(&self, idx: usize) -> Option<Position> {
		self.nodes.get(idx).map(|n| n.position)
	}

	pub fn add_node(&mut self, position: Position) -> Result<usize, GraphError> {
		if self.nodes.len() >= self.max_nodes {
			return Err(GraphError::MaxNodesReached {
				max: self.max_nodes,
			});
		}
		self.nodes.push(Node { position });
		Ok(self.nodes.len() - 1)
	}

	pub fn add_edge(&mut self, u: usize, v: usize, weight: u32) -> Result<Edge, GraphError> {
		if u == v {
			return Err(EdgeRejection::SelfLoop(u).into());
		}
		for idx in [u, v] {
			if idx >= self.nodes.len() {
				return Err(EdgeRejection::UnknownEndpoint(idx).into());
			}
		}
		if weight == 0 {
			return Err(GraphError::InvalidWeight {
				input: weight.to_string(),
			});
		}
		let edge = Edge::new(u, v, weight);
		self.edges.push(edge);
		Ok(edge)
	}

	/// First node whose centre lies within `radius` of `position`.
	pub fn node_at(&self, position: Position, radius: f64) -> Option<usize> {
		self.nodes
			.iter()
			.position(|n| n.position.distance(position) <= radius)
	}

	pub fn reset(&mut self) {
		self.nodes.clear();
		self.edges.clear();
	}
}

/// Parses user-entered weight text as a positive integer.
pub fn parse_weight(input: &str) -> Result<u32, GraphError> {
	match input.trim().parse::<u32>() {
		Ok(weight) if weight > 0 => Ok(weight),
		_ => Err(GraphError::InvalidWeight {
			input: input.to_owned(),
		}),
	}
}
