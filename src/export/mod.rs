//! Client-side exports
//!
//! Pure transformations from in-memory data to downloadable bytes.

pub mod csv;
pub mod pdf;

pub use self::csv::{alumni_to_csv, parse_csv, ALUMNI_CSV_FILE};
pub use self::pdf::{render_card_pdf, Card, LineStyle, INVITATION_PDF_FILE};
