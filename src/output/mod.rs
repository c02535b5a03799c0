pub mod findings;
pub mod report;

pub use findings::{AuthRecord, FindingStore, NoteRecord, Reporter, ServiceRecord};
