// Sheet rendering: turns generated pages into printable sheets.
// Consumes generation output only; never feeds back into generation.

pub mod sheet;
pub mod text;

pub use sheet::{render_document, RenderedDocument};
pub use text::render_text;
