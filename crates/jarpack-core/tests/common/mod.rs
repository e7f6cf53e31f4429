#![allow(dead_code)]

pub mod repo_server;
pub mod stub;
