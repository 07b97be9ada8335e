pub mod record;

pub use record::{ItemRecord, MalformedRecord, from_json, to_json};
