// src/tui/widgets/mod.rs — Widget sub-modules for each dashboard region.

pub mod charts;
pub mod connection_bar;
pub mod metrics;
pub mod prediction_form;
pub mod status;
