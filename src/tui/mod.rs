pub mod app;
pub mod apps;
pub mod command;
pub mod resource;
pub mod runtime;
pub mod subscription;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use command::{AppId, Command};
pub use resource::Resource;
pub use runtime::{AppRuntime, Runtime};
pub use subscription::Subscription;
pub use theme::{Theme, ThemeVariant};
