#[cfg(feature = "cli")]
pub mod cli;
pub mod compose;
pub mod config;
pub mod elements;
pub mod error;
pub mod fields;
pub mod layout;
pub mod loader;

#[cfg(feature = "cli")]
pub use cli::run;
pub use compose::{serialize, write_output, ComposedDocument, DiagramLayer};
pub use config::{Config, DiagramFit, LayoutPolicy, load_config};
pub use error::ComposeError;
pub use fields::ReportFields;
pub use layout::{compute_layout, Anchor, ComposedLayout, DiagramPlacement, TextSpec};
pub use loader::{load_diagram, load_template, CanvasDocument};
