use crossterm::event::KeyCode;

/// Inputs an app wants to receive, registered via subscriptions().
pub enum Subscription<Msg> {
    /// Subscribe to a specific keyboard key
    Keyboard {
        key: KeyCode,
        msg: Msg,
        description: String,
    },

    /// Catch-all key handler, tried before the per-key map. Apps use this
    /// to route keys to whichever field currently has focus; returning
    /// `None` lets the key fall through to the Keyboard subscriptions.
    AnyKey {
        handler: Box<dyn Fn(KeyCode) -> Option<Msg> + Send>,
    },
}

impl<Msg> Subscription<Msg> {
    /// Helper to create a keyboard subscription
    pub fn keyboard(key: KeyCode, description: impl Into<String>, msg: Msg) -> Self {
        Subscription::Keyboard {
            key,
            msg,
            description: description.into(),
        }
    }

    /// Helper to create a catch-all key subscription
    pub fn keys<F>(handler: F) -> Self
    where
        F: Fn(KeyCode) -> Option<Msg> + Send + 'static,
    {
        Subscription::AnyKey {
            handler: Box::new(handler),
        }
    }
}
