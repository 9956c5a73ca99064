use std::any::Any;
use std::future::Future;
use std::pin::Pin;

/// Side effects an app asks the runtime to perform, returned from update().
pub enum Command<Msg> {
    /// Do nothing
    None,

    /// Execute multiple commands in sequence
    Batch(Vec<Command<Msg>>),

    /// Switch to a different app, handing it boxed init params
    Navigate {
        app: AppId,
        params: Box<dyn Any + Send>,
    },

    /// Perform an async operation and send the result as a message
    Perform(Pin<Box<dyn Future<Output = Msg> + Send>>),

    /// Quit the console
    Quit,
}

/// Unique identifier for each app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppId {
    SurveyBrowser,
    SurveyForm,
}

impl<Msg> Command<Msg> {
    /// Helper to create a command that performs an async operation
    pub fn perform<F, T>(future: F, to_msg: impl Fn(T) -> Msg + Send + 'static) -> Self
    where
        F: Future<Output = T> + Send + 'static,
        Msg: Send + 'static,
    {
        Command::Perform(Box::pin(async move {
            let result = future.await;
            to_msg(result)
        }))
    }

    /// Helper to navigate to another app with typed init params
    pub fn navigate<P: Send + 'static>(app: AppId, params: P) -> Self {
        Command::Navigate {
            app,
            params: Box::new(params),
        }
    }

    /// Helper to batch multiple commands
    pub fn batch(commands: Vec<Command<Msg>>) -> Self {
        Command::Batch(commands)
    }
}

impl<Msg> Default for Command<Msg> {
    fn default() -> Self {
        Command::None
    }
}
