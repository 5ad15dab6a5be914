//! Minimum spanning tree construction as an ordered list of animation steps.
//!
//! Both variants are pure functions of the node and edge slices. A graph that
//! cannot be spanned still yields the steps selected so far; [`MstPlan::check`]
//! reports the shortfall.

use log::debug;

use super::error::GraphError;
use super::types::{Algorithm, AlgorithmStep, Edge, Node};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MstPlan {
	pub algorithm: Algorithm,
	pub steps: Vec<AlgorithmStep>,
	required: usize,
}

impl MstPlan {
	fn new(algorithm: Algorithm, node_count: usize) -> Self {
		Self {
			algorithm,
			steps: Vec::with_capacity(node_count.saturating_sub(1)),
			required: node_count.saturating_sub(1),
		}
	}

	pub fn is_spanning(&self) -> bool {
		self.steps.len() == self.required
	}

	pub fn check(&self) -> Result<(), GraphError> {
		if self.is_spanning() {
			Ok(())
		} else {
			Err(GraphError::DisconnectedGraph {
				algorithm: self.algorithm,
				selected: self.steps.len(),
				required: self.required,
			})
		}
	}

	pub fn total_weight(&self) -> u64 {
		self.steps.iter().map(|s| u64::from(s.edge.weight)).sum()
	}
}

pub fn compute(nodes: &[Node], edges: &[Edge], algorithm: Algorithm) -> MstPlan {
	let plan = match algorithm {
		Algorithm::Prim => prim(nodes.len(), edges),
		Algorithm::Kruskal => kruskal(nodes.len(), edges),
	};
	debug!(
		"{} selected {}/{} edges, total weight {}",
		algorithm,
		plan.steps.len(),
		plan.required,
		plan.total_weight()
	);
	plan
}

fn prim(node_count: usize, edges: &[Edge]) -> MstPlan {
	let mut plan = MstPlan::new(Algorithm::Prim, node_count);
	if node_count == 0 {
		return plan;
	}

	let mut visited = vec![false; node_count];
	visited[0] = true;
	let mut visited_count = 1;

	while visited_count < node_count {
		let mut min_edge: Option<&Edge> = None;
		for edge in edges {
			if visited[edge.u] ^ visited[edge.v] && min_edge.is_none_or(|m| edge.weight < m.weight) {
				min_edge = Some(edge);
			}
		}

		let Some(&edge) = min_edge else {
			debug!("Prim's: no edge leaves the visited set after {visited_count} nodes");
			break;
		};
		visited[edge.u] = true;
		visited[edge.v] = true;
		visited_count += 1;
		plan.steps.push(AlgorithmStep {
			edge,
			explanation: format!(
				"Edge {edge} is chosen: it is the cheapest edge leaving the visited set."
			),
		});
	}
	plan
}

fn kruskal(node_count: usize, edges: &[Edge]) -> MstPlan {
	let mut plan = MstPlan::new(Algorithm::Kruskal, node_count);
	let mut sorted: Vec<&Edge> = edges.iter().collect();
	// stable: equal weights keep insertion order
	sorted.sort_by_key(|e| e.weight);

	let mut components = UnionFind::new(node_count);
	for &edge in sorted {
		if components.union(edge.u, edge.v) {
			plan.steps.push(AlgorithmStep {
				edge,
				explanation: format!("Edge {edge} is chosen: it joins two separate components."),
			});
		} else {
			debug!("Kruskal's: edge {edge} would close a cycle, skipped");
		}
	}
	plan
}

/// Disjoint sets with path compression.
struct UnionFind {
	parent: Vec<usize>,
}

impl UnionFind {
	fn new(n: usize) -> Self {
		Self {
			parent: (0..n).collect(),
		}
	}

	fn find(&mut self, x: usize) -> usize {
		let mut root = x;
		while self.parent[root] != root {
			root = self.parent[root];
		}
		let mut node = x;
		while self.parent[node] != root {
			let next = self.parent[node];
			self.parent[node] = root;
			node = next;
		}
		root
	}

	/// Merges the sets of `x` and `y`; false when they were already joined.
	fn union(&mut self, x: usize, y: usize) -> bool {
		let (rx, ry) = (self.find(x), self.find(y));
		if rx == ry {
			return false;
		}
		self.parent[rx] = ry;
		true
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;
	use crate::components::mst_canvas::types::Position;

	fn nodes(n: usize) -> Vec<Node> {
		(0..n)
			.map(|i| Node {
				position: Position::new(i as f64 * 60.0, (i % 3) as f64 * 40.0),
			})
			.collect()
	}

	fn selected(plan: &MstPlan) -> Vec<Edge> {
		plan.steps.iter().map(|s| s.edge).collect()
	}

	fn triangle() -> Vec<Edge> {
		vec![Edge::new(0, 1, 5), Edge::new(1, 2, 3), Edge::new(0, 2, 10)]
	}

	#[test]
	fn prim_on_triangle() {
		let plan = compute(&nodes(3), &triangle(), Algorithm::Prim);
		assert_eq!(selected(&plan), vec![Edge::new(0, 1, 5), Edge::new(1, 2, 3)]);
		assert_eq!(plan.total_weight(), 8);
		assert_eq!(plan.check(), Ok(()));
	}

	#[test]
	fn kruskal_on_triangle_rejects_the_cycle() {
		let plan = compute(&nodes(3), &triangle(), Algorithm::Kruskal);
		assert_eq!(selected(&plan), vec![Edge::new(1, 2, 3), Edge::new(0, 1, 5)]);
		assert_eq!(plan.total_weight(), 8);
		assert!(plan.is_spanning());
	}

	#[test]
	fn explanations_name_the_edge() {
		let plan = compute(&nodes(3), &triangle(), Algorithm::Kruskal);
		assert!(
			plan.steps[0]
				.explanation
				.starts_with("Edge (1, 2) with weight 3 is chosen")
		);
	}

	#[rstest]
	#[case(Algorithm::Prim, 1)]
	#[case(Algorithm::Kruskal, 2)]
	fn disconnected_graph_is_reported(#[case] algorithm: Algorithm, #[case] steps: usize) {
		let edges = [Edge::new(0, 1, 1), Edge::new(2, 3, 1)];
		let plan = compute(&nodes(4), &edges, algorithm);
		assert_eq!(plan.steps.len(), steps);
		assert_eq!(
			plan.check(),
			Err(GraphError::DisconnectedGraph {
				algorithm,
				selected: steps,
				required: 3,
			})
		);
	}

	#[rstest]
	#[case(Algorithm::Prim)]
	#[case(Algorithm::Kruskal)]
	fn isolated_node_without_edges(#[case] algorithm: Algorithm) {
		let plan = compute(&nodes(2), &[], algorithm);
		assert!(plan.steps.is_empty());
		assert!(plan.check().is_err());
	}

	#[rstest]
	#[case(Algorithm::Prim, 0)]
	#[case(Algorithm::Prim, 1)]
	#[case(Algorithm::Kruskal, 0)]
	#[case(Algorithm::Kruskal, 1)]
	fn trivial_graphs_span(#[case] algorithm: Algorithm, #[case] n: usize) {
		let plan = compute(&nodes(n), &[], algorithm);
		assert!(plan.steps.is_empty());
		assert_eq!(plan.check(), Ok(()));
	}

	#[test]
	fn prim_tie_break_prefers_earlier_edge() {
		let edges = [Edge::new(0, 2, 4), Edge::new(0, 1, 4), Edge::new(1, 2, 9)];
		let plan = compute(&nodes(3), &edges, Algorithm::Prim);
		assert_eq!(plan.steps[0].edge, Edge::new(0, 2, 4));
	}

	#[test]
	fn kruskal_tie_break_is_stable() {
		let edges = [
			Edge::new(2, 3, 7),
			Edge::new(0, 1, 2),
			Edge::new(1, 2, 7),
			Edge::new(1, 3, 7),
		];
		let plan = compute(&nodes(4), &edges, Algorithm::Kruskal);
		assert_eq!(
			selected(&plan),
			vec![Edge::new(0, 1, 2), Edge::new(2, 3, 7), Edge::new(1, 2, 7)]
		);
	}

	#[test]
	fn parallel_edges_are_independent_candidates() {
		let edges = [Edge::new(0, 1, 9), Edge::new(1, 0, 2)];
		for algorithm in [Algorithm::Prim, Algorithm::Kruskal] {
			let plan = compute(&nodes(2), &edges, algorithm);
			assert_eq!(selected(&plan), vec![Edge::new(1, 0, 2)]);
		}
	}

	#[test]
	fn kruskal_does_not_reorder_the_input() {
		let edges = triangle();
		let _ = compute(&nodes(3), &edges, Algorithm::Kruskal);
		assert_eq!(edges, triangle());
	}

	/// Deterministic pseudo-random connected graph: a random tree plus extra edges.
	fn connected_graph(n: usize, extra: usize, seed: u64) -> Vec<Edge> {
		let mut state = seed;
		let mut next = move |bound: u64| {
			state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
			((state >> 33) % bound) as usize
		};
		let mut edges = Vec::new();
		for v in 1..n {
			let u = next(v as u64);
			edges.push(Edge::new(u, v, next(20) as u32 + 1));
		}
		for _ in 0..extra {
			let u = next(n as u64);
			let v = (u + 1 + next(n as u64 - 1)) % n;
			edges.push(Edge::new(u, v, next(20) as u32 + 1));
		}
		edges
	}

	#[rstest]
	#[case(5, 3, 1)]
	#[case(8, 12, 7)]
	#[case(10, 30, 42)]
	#[case(10, 0, 99)]
	fn prim_and_kruskal_agree_on_weight(#[case] n: usize, #[case] extra: usize, #[case] seed: u64) {
		let edges = connected_graph(n, extra, seed);
		let prim = compute(&nodes(n), &edges, Algorithm::Prim);
		let kruskal = compute(&nodes(n), &edges, Algorithm::Kruskal);
		assert_eq!(prim.steps.len(), n - 1);
		assert_eq!(kruskal.steps.len(), n - 1);
		assert_eq!(prim.total_weight(), kruskal.total_weight());
	}

	#[rstest]
	#[case(Algorithm::Prim)]
	#[case(Algorithm::Kruskal)]
	fn rerunning_is_idempotent(#[case] algorithm: Algorithm) {
		let edges = connected_graph(9, 15, 3);
		let first = compute(&nodes(9), &edges, algorithm);
		let second = compute(&nodes(9), &edges, algorithm);
		assert_eq!(first, second);
	}

	#[test]
	fn union_find_compresses_paths() {
		let mut uf = UnionFind::new(5);
		assert!(uf.union(0, 1));
		assert!(uf.union(1, 2));
		assert!(uf.union(2, 3));
		assert!(!uf.union(0, 3));
		let root = uf.find(0);
		assert!(uf.parent[..4].iter().all(|&p| p == root));
		assert_eq!(uf.find(4), 4);
	}
}
