/// Data model — file records, signatures, and display formatting.

pub mod record;
pub mod signature;
pub mod size;

pub use record::FileRecord;
pub use signature::FileSignature;
