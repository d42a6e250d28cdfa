pub mod deadline;
pub mod html;
pub mod logging;

pub use logging::truncate_text;
