// Document Composer: stitches parsed fields back into normalized document bodies.
// Pure functions; the cover-letter date is always injected by the caller.

pub mod cover_letter;
pub mod resume;

pub use cover_letter::{closing_start, compose_cover_letter_body, format_letter_date, is_salutation};
pub use resume::compose_resume;
