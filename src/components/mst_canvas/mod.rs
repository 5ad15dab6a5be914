mod component;
mod error;
mod graph;
mod mst;
mod render;
mod scheduler;
mod state;
mod types;

pub use component::MstCanvas;
