//! Leptos client-side app for building a weighted graph and replaying
//! Prim's and Kruskal's minimum spanning tree construction step by step.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

mod components;
mod pages;

use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

const APP_NAME: &str = "MST Visualizer";

/// Routes browser logs to the console and reports panics there too.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("{APP_NAME} starting");
}

/// Visualizer shell: document head plus a single-page router.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" />

		// pages set their own <Title>; this wraps it as "<page> | MST Visualizer"
		<Title formatter=|page: String| {
			if page.is_empty() { APP_NAME.to_owned() } else { format!("{page} | {APP_NAME}") }
		} />
		<Meta name="description" content="Build a weighted graph and watch Prim's or Kruskal's algorithm pick its minimum spanning tree." />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
