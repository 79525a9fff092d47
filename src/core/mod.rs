pub mod dispatcher;
pub mod envelope;
pub mod models;
pub mod waf;

pub use dispatcher::Dispatched;
pub use envelope::{Outcome, ResponseEnvelope};
pub use waf::{AttackCategory, ClassificationInput, PatternSet, Verdict, classify};
