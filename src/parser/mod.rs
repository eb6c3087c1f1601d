mod lines;
mod preprocessor;
mod types;

pub use lines::split_source;
pub use preprocessor::{classify_line, is_instruction_bearing};
pub use types::LineKind;
