pub mod choice;
pub mod list;
pub mod select;
pub mod text_input;

pub use choice::ChoiceState;
pub use list::ListState;
pub use select::SelectState;
pub use text_input::TextInputState;
