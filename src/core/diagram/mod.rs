//! Curriculum diagram: DOT generation and Graphviz rendering

pub mod dot;
pub mod render;

pub use dot::{diagram_file_name, escape_label, DiagramGenerator};
pub use render::{GraphvizRenderer, RenderFormat};
