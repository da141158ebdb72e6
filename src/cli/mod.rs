pub mod app;
pub mod classify;
pub mod commands;
pub mod context;
pub mod dispatch;
pub mod env;
pub mod run;
pub mod runtime;

pub use classify::{cmd_classify, ClassifyArgs};
pub use run::{cmd_run, RunArgs};
