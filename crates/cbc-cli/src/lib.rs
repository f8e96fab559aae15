//! CLI library components for the CBC screening front end.

pub mod batch_io;
pub mod logging;
