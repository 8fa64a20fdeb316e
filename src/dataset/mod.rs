pub mod encoder;
pub mod loader;
pub mod patterns;
pub mod record;

pub use encoder::LabelEncoder;
pub use loader::{load_csv, parse_csv, MalformedPolicy};
pub use record::{Record, Target};
