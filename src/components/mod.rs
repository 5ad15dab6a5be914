pub mod mst_canvas;
