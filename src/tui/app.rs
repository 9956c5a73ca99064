use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;

use crate::tui::{Command, Subscription, Theme};

/// The trait every TUI app implements, following the Elm architecture:
/// - State: the app's current data
/// - Msg: events/actions that can happen
/// - update: handles messages and returns commands
/// - view: renders the current state
/// - subscriptions: declares what inputs the app wants to receive
pub trait App: Sized + Send + 'static {
    /// The app's state type
    type State: Default + Send;

    /// The app's message type
    type Msg: Clone + Send + 'static;

    /// Parameters handed over when another app navigates here
    type InitParams: Default + Send + 'static;

    /// Initialize state from params, with an optional startup command
    fn init(params: Self::InitParams) -> (Self::State, Command<Self::Msg>);

    /// Update the state based on a message and return a command
    fn update(state: &mut Self::State, msg: Self::Msg) -> Command<Self::Msg>;

    /// Render the current state into the given area
    fn view(state: &mut Self::State, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Declare what inputs this app wants to receive
    fn subscriptions(state: &Self::State) -> Vec<Subscription<Self::Msg>>;

    /// The app's title, shown in the header
    fn title() -> &'static str;

    /// Optional status text for the header, styled from state
    fn status(_state: &Self::State, _theme: &Theme) -> Option<Line<'static>> {
        None
    }
}
