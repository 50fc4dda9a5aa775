//! NDPC Shell: interactive marketplace client
//!
//! Menu-driven front end over [`ndpc_client`]. Reads are shown as JSON;
//! state-changing operations are printed as `casper-client` commands to copy.

pub mod render;
pub mod shell;

pub use shell::{Shell, ShellError};
