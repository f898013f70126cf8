mod file_source;
mod parser;

pub use file_source::FileListSource;
pub use parser::{parse_list_line, parse_list_text, ParsedEntry};
