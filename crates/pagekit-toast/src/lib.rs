pub mod host;
pub mod models;
pub mod notifier;
pub mod render;
pub mod scheduler;
pub mod settings;

#[cfg(test)]
mod test_support;

pub use host::{
    ContainerSpec,
    ToastHost,
};
pub use models::{
    PageAlert,
    Toast,
    ToastError,
    ToastId,
    ToastKind,
    ToastResult,
};
pub use notifier::{
    ToastHandle,
    ToastNotifier,
};
pub use render::{
    RenderedToast,
    escape_html,
    render_toast,
};
#[cfg(feature = "tokio-runtime")]
pub use scheduler::TokioScheduler;
pub use scheduler::{
    Scheduler,
    Task,
};
pub use settings::ToastSettings;
