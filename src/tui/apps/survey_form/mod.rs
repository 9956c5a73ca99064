mod app;
mod models;
mod view;

pub use app::SurveyForm;
pub use models::{FormParams, Msg, SaveState, State};
