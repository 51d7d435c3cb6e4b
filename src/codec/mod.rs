// Persistence codecs
// - text: "Project info" blocks, lossy, legacy fallback
// - json: field-complete snapshot, authoritative

pub mod json;
pub mod text;

pub use json::ProjectRecord;
pub use text::TextImport;
