#![allow(dead_code)]

pub mod macros;
pub mod server;
