use std::ffi::{CString, c_char};
use std::ops::Deref;
use std::os::raw::c_void;

use unibridge::{CategorizedError, CommonError, ErrorCategory};

// Callback types for asynchronous platform operations
pub type BridgeCallback = unsafe extern "C" fn(user_data: *mut c_void, error: BridgeErrorNative);
pub type PopupDismissedCallback =
    unsafe extern "C" fn(user_data: *mut c_void, button_index: i32);
pub type NetworkTypeChangedCallback =
    unsafe extern "C" fn(user_data: *mut c_void, network_type: i32);
pub type SharingFinishedCallback =
    unsafe extern "C" fn(user_data: *mut c_void, destination: *const c_char, completed: bool);

// Send-safe wrapper for raw pointers
#[repr(transparent)]
pub struct SendPtr<T>(*mut T);

impl<T> Clone for SendPtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for SendPtr<T> {}

// user_data is an opaque token for the managed side; callbacks may fire on
// any platform thread.
unsafe impl<T> Send for SendPtr<T> {}
unsafe impl<T> Sync for SendPtr<T> {}

impl<T> From<*mut T> for SendPtr<T> {
    fn from(ptr: *mut T) -> Self {
        SendPtr(ptr)
    }
}

impl<T> Deref for SendPtr<T> {
    type Target = *mut T;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> From<SendPtr<T>> for *mut T {
    fn from(val: SendPtr<T>) -> Self {
        val.0
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BridgeErrorKind {
    Success = 0,
    Error = 1,
    InitializationError = 2,
    InvalidInput = 3,
    PlatformError = 4,
    CommunicationError = 5,
}

impl From<ErrorCategory> for BridgeErrorKind {
    fn from(category: ErrorCategory) -> Self {
        match category {
            ErrorCategory::General => BridgeErrorKind::Error,
            ErrorCategory::Initialization => BridgeErrorKind::InitializationError,
            ErrorCategory::InvalidInput => BridgeErrorKind::InvalidInput,
            ErrorCategory::Platform => BridgeErrorKind::PlatformError,
            ErrorCategory::Communication => BridgeErrorKind::CommunicationError,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BridgeError {
    pub kind: BridgeErrorKind,
    pub message: Option<String>,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BridgeErrorNative {
    pub kind: BridgeErrorKind,
    pub message: *const c_char,
}

impl BridgeErrorNative {
    pub const SUCCESS: Self = Self {
        kind: BridgeErrorKind::Success,
        message: std::ptr::null(),
    };
}

impl BridgeError {
    pub const SUCCESS: Self = Self {
        kind: BridgeErrorKind::Success,
        message: None,
    };

    /// The message pointer is only valid for the duration of `f`.
    pub fn with_native(&self, f: impl FnOnce(&BridgeErrorNative)) {
        let message = self
            .message
            .as_ref()
            .map(|string| CString::new(string.as_str()).unwrap_or_default());
        f(&BridgeErrorNative {
            kind: self.kind,
            message: match message.as_ref() {
                Some(string) => string.as_ptr(),
                None => std::ptr::null(),
            },
        });
        drop(message);
    }

    /// Convert a CommonError to BridgeError using the error's category
    pub fn from_common(err: CommonError) -> Self {
        let kind = BridgeErrorKind::from(err.category());
        let message = err.to_string();
        Self {
            kind,
            message: Some(message),
        }
    }

    pub fn initialization_error(msg: impl Into<String>) -> Self {
        Self {
            kind: BridgeErrorKind::InitializationError,
            message: Some(msg.into()),
        }
    }

    pub fn invalid_input_error(msg: impl Into<String>) -> Self {
        Self {
            kind: BridgeErrorKind::InvalidInput,
            message: Some(msg.into()),
        }
    }

    pub fn platform_error(msg: impl Into<String>) -> Self {
        Self {
            kind: BridgeErrorKind::PlatformError,
            message: Some(msg.into()),
        }
    }
}

pub trait ApplyCallback<Callback> {
    fn apply_callback(&self, callback: Callback, user_data: SendPtr<c_void>);
}

impl ApplyCallback<BridgeCallback> for BridgeError {
    fn apply_callback(&self, callback: BridgeCallback, user_data: SendPtr<c_void>) {
        self.with_native(|native| unsafe { callback(user_data.into(), *native) });
    }
}

// These are unused but required to let csbindgen generate the binding for specific types.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn unibridge_dummy(
    _error_kind: BridgeErrorKind,
    _error_native: BridgeErrorNative,
) {
}
