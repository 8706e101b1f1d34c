#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
pub mod handler;
mod service;

pub use error::{Error, ErrorKind, Result};
pub use service::ServiceState;
