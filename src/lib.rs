//! filerescue - forensic file carving and recovery
//!
//! Recovers files from raw disk images and block devices by scanning for
//! known file-type signatures, independent of filesystem metadata.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod util;
