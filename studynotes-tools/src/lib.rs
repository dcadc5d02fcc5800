pub mod extract;
pub mod render;
pub mod text;
pub mod tool_error;
pub mod types;

pub use extract::extract_text;
pub use render::{render_pdf, render_pdf_to_file, FontMode, PageLayout, RenderOptions};
pub use tool_error::{ExtractError, RenderError};
pub use types::*;
