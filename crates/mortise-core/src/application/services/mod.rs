//! Application services.
//!
//! The renderer, writer and patcher are single-purpose; `ScaffoldService`
//! sequences them over the model.

pub mod file_patcher;
pub mod file_writer;
pub mod renderer;
pub mod scaffold_service;

pub use file_patcher::MarkerPatcher;
pub use file_writer::FileWriter;
pub use renderer::TemplateRenderer;
pub use scaffold_service::ScaffoldService;
