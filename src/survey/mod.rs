//! The dynamic survey engine: schema interpretation, value state,
//! validation rules, and response serialization.
//!
//! Everything in here is UI- and transport-free; the TUI apps and the
//! integration tests are the consumers.

pub mod form;
pub mod response;
pub mod schema;
pub mod submit;
pub mod validate;
pub mod value;

pub use form::{FormMode, FormValues, SectionNavigator};
pub use response::{ResponseQuestion, ResponseSection, ResponseStatus, SurveyResponse};
pub use schema::{QuestionKind, SelectOption, Survey, SurveyQuestion, SurveySection};
pub use submit::{Submitter, build_response};
pub use validate::{Constraint, Rule, RuleSet};
pub use value::Value;
