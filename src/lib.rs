// Library surface for the binary, headless/integration tests and reuse.
// The core (plan, countdown, controller) has no terminal dependencies.
pub mod app;
pub mod app_dirs;
pub mod celebration;
pub mod clock;
pub mod config;
pub mod controller;
pub mod countdown;
pub mod cues;
pub mod error;
pub mod locale;
pub mod logging;
pub mod plan;
pub mod runtime;
pub mod session;
pub mod ui;

pub use controller::{Affordance, Controller, Panel};
pub use error::TabataError;
pub use plan::{build_plan, build_plan_in, Plan, Step, StepKind, StepMeta};
pub use session::SessionState;
