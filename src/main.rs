//! Browser entry point: sets up logging and mounts the visualizer.

use leptos::prelude::*;
use mst_canvas::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App);
}
