mod api;
mod ffi;
mod platform;
mod utils;

pub(crate) use crate::ffi::*;
pub(crate) use crate::platform::*;
pub(crate) use crate::utils::*;
