pub mod cover_letter;
pub mod eligibility;
pub mod outcome_writer;
pub mod portal;

pub use cover_letter::{CoverLetterGenerator, LlmCoverLetterGenerator};
pub use eligibility::{Eligibility, EligibilityFilter};
pub use outcome_writer::OutcomeWriter;
pub use portal::JobPortalGateway;
