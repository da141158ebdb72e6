//! Operator notices.
//!
//! A run ends with at most one terminal notice; intermediate degradations
//! (clipboard refused, field given up) are reported as warnings.

use std::fmt;

use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warn,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NoticeLevel::Info => "info",
            NoticeLevel::Warn => "warning",
            NoticeLevel::Error => "error",
        })
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Prints notices to the terminal the command runs in.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Info => info!(notice = true, "{}", message),
            NoticeLevel::Warn => warn!(notice = true, "{}", message),
            NoticeLevel::Error => error!(notice = true, "{}", message),
        }
        match level {
            NoticeLevel::Info => println!("{}", message),
            _ => eprintln!("[{}] {}", level, message),
        }
    }
}
