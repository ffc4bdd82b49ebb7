// Section Parser: labeled free text from the generation service -> ParsedProfile.
// Parsing never fails on missing or malformed sections; absent fields resolve to empty values.

pub mod labels;
pub mod models;
pub mod parser;

pub use labels::{SectionLabel, SectionSet};
pub use models::{CoverLetterInfo, ParsedProfile};
pub use parser::parse_profile;
