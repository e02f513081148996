pub mod block;
pub mod config;
pub mod document;
pub mod error;
pub mod parser;
pub mod render;
pub mod writer;

pub use block::list::ListEntry;
pub use block::table::ColumnAlignment;
pub use block::text::{Emphasis, TextAlign, TextBlock};
pub use block::{Block, LinkKind};
pub use config::RenderOptions;
pub use document::Document;
pub use error::{DocumentError, Result};
pub use render::escape::escape_markdown;
pub use render::{inline_image, inline_link, reference_image, reference_link};
