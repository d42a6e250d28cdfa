pub mod hh_client;
pub mod llm_client;
pub mod portal_errors;

pub use hh_client::PortalClient;
pub use llm_client::LlmClient;
