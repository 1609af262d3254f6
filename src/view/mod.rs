pub mod item_view;
pub mod page_renderer;
pub mod pages;
pub mod templates;

pub use page_renderer::PageRenderer;
pub use templates::{TemplateDir, TemplateEngine};
