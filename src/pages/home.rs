use leptos::prelude::*;
use leptos_meta::Title;

use crate::components::mst_canvas::MstCanvas;

/// Graph editor page hosting the MST canvas.
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<Title text="Build a graph" />
			<div class="mst-page">
				<h1>"Minimum Spanning Tree Visualizer"</h1>
				<p class="subtitle">
					"Click to add nodes. Drag from one node to another to add a weighted edge, then run Prim's or Kruskal's algorithm."
				</p>
				<MstCanvas />
			</div>
		</ErrorBoundary>
	}
}
