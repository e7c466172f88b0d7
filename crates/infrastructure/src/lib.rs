//! Infrastructure adapters for form dispatch and toast delivery.

#![forbid(unsafe_code)]

mod console_dispatch_handler;
mod http_dispatch_handler;
mod toast_surface;

pub use console_dispatch_handler::ConsoleDispatchHandler;
pub use http_dispatch_handler::HttpDispatchHandler;
pub use toast_surface::{RecordingToastSurface, TracingToastSurface};
