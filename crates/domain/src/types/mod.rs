//! # Runesweeper Domain Types
//!
//! Closed vocabularies shared by the context builder, the response parser and
//! the orchestrator. Each enum has a fixed wire literal (`as_str`), a
//! `Display` matching it and a `FromStr` returning `DomainError::Parse`.

mod hint;
pub use hint::HintType;

mod mood;
pub use mood::DmMood;

mod provider;
pub use provider::ProviderId;

mod request_type;
pub use request_type::RequestType;
