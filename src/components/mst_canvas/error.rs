use thiserror::Error;

use super::types::Algorithm;

/// Why a requested edge was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum EdgeRejection {
	#[error("an edge cannot connect node {0} to itself")]
	SelfLoop(usize),
	#[error("node {0} does not exist")]
	UnknownEndpoint(usize),
	#[error("the edge must end on a node")]
	NoEndNode,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GraphError {
	#[error("Maximum number of nodes reached ({max}).")]
	MaxNodesReached { max: usize },
	#[error("Invalid edge: {0}.")]
	InvalidEdge(#[from] EdgeRejection),
	#[error("Invalid weight {input:?}. Edge not added.")]
	InvalidWeight { input: String },
	#[error(
		"{algorithm} Algorithm stopped: the graph is disconnected ({selected} of {required} edges selected), no spanning tree exists."
	)]
	DisconnectedGraph {
		algorithm: Algorithm,
		selected: usize,
		required: usize,
	},
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_are_single_lines() {
		let errors = [
			GraphError::MaxNodesReached { max: 4 },
			EdgeRejection::SelfLoop(2).into(),
			GraphError::InvalidWeight { input: "abc".into() },
			GraphError::DisconnectedGraph {
				algorithm: Algorithm::Prim,
				selected: 1,
				required: 3,
			},
		];
		for err in errors {
			assert!(!err.to_string().contains('\n'), "{err}");
		}
	}

	#[test]
	fn disconnected_message_names_the_shortfall() {
		let err = GraphError::DisconnectedGraph {
			algorithm: Algorithm::Kruskal,
			selected: 2,
			required: 3,
		};
		assert!(err.to_string().starts_with("Kruskal's Algorithm stopped"));
		assert!(err.to_string().contains("2 of 3"));
	}
}
