use std::ffi::CStr;
use std::fmt::Debug;
use std::ops::Deref;

use objc2::msg_send;
use objc2::rc::Retained;
use objc2::runtime::{AnyClass, AnyObject};

use crate::error::{AppleError, Result};

/// Wrapper to hand retained Objective-C references across threads. The
/// wrapped plugin singletons serialize their own state internally.
pub struct UnsafeSendRetained<T> {
    pub inner: Retained<T>,
}

unsafe impl<T> Send for UnsafeSendRetained<T> {}
unsafe impl<T> Sync for UnsafeSendRetained<T> {}

impl<T> Debug for UnsafeSendRetained<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnsafeSendRetained")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<T> Deref for UnsafeSendRetained<T> {
    type Target = Retained<T>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T> From<Retained<T>> for UnsafeSendRetained<T> {
    fn from(inner: Retained<T>) -> Self {
        Self { inner }
    }
}

/// Resolve the shared singleton of a plugin class, failing fast when the
/// class is not linked in.
pub fn shared_instance(name: &'static CStr) -> Result<UnsafeSendRetained<AnyObject>> {
    let class =
        AnyClass::get(name).ok_or_else(|| AppleError::ClassNotFound(class_name(name)))?;
    let instance: Option<Retained<AnyObject>> = unsafe { msg_send![class, sharedInstance] };
    let instance = instance.ok_or_else(|| AppleError::NilSingleton(class_name(name)))?;
    Ok(instance.into())
}

fn class_name(name: &'static CStr) -> &'static str {
    name.to_str().unwrap_or("<non-utf8 class name>")
}
