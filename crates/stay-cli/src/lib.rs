//! Library components of the `guest-import` command line tool.

#![deny(unsafe_code)]

pub mod logging;
pub mod overrides;
pub mod summary;
