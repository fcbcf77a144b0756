//! End-to-end tests running the `tabnav` binary

mod cli_basic;
mod replay;
