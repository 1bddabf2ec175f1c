//! Export engine: drives the backend, then post-processes the results.
//!
//! Enhanced exports run in three phases. The backend writes every matching
//! note into a numbered scratch slot, [`promote`] moves the slots to
//! collision-free names, and [`tagging`] embeds each note's notebook and link
//! in its document header. A later [`relink`] pass uses those tags to turn
//! application links into relative file links.

mod error;
mod exporter;
pub mod links;
pub mod promote;
pub mod tagging;

pub use error::ExportError;
pub use exporter::{
    DEFAULT_EXPORT_TIMEOUT, ExportOutcome, ExportRequest, ExportSummary, Exporter, notebook_query,
    notebook_target,
};
pub use links::{LinkIndex, LinkRewriter, RelinkSummary, Rewrite, relink};
pub use promote::{PromotedDocument, SCRATCH_DIR_NAME, ScratchSlot, promote, read_slots};
pub use tagging::{insert_tags, read_link_tag, split_header, tag_documents};
