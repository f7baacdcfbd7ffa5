pub mod context;
pub mod dashboard;
pub mod error;

pub use context::AppContext;
pub use dashboard::Dashboard;
pub use error::{HooklineError, Result};
