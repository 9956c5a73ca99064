pub mod survey_browser;
pub mod survey_form;

pub use survey_browser::{BrowserParams, SurveyBrowser};
pub use survey_form::{FormParams, SurveyForm};
