use thiserror::Error;
use unibridge_common::{CategorizedError, CommonError, ErrorCategory};

/// Error type for unibridge_android
#[derive(Error, Debug)]
pub enum AndroidError {
    // JNI related errors
    #[error("JavaVM not initialized")]
    JavaVmNotInitialized,

    #[error("Failed to attach current thread to JVM: {0}")]
    JvmAttachFailed(String),

    #[error("JNI exception occurred")]
    JniException,

    #[error("Class '{0}' not found")]
    ClassNotFound(String),

    #[error("Failed to create global reference")]
    JniGlobalRefFailed,

    #[error("Failed to call method '{0}'")]
    JniMethodCallFailed(String),

    #[error("Expected {expected} return value")]
    JniUnexpectedReturnValue { expected: &'static str },

    #[error("Failed to read static field '{0}'")]
    JniFieldGetFailed(String),

    #[error("Failed to create Java string")]
    JniStringCreationFailed,

    #[error("Failed to create Java string array")]
    JniArrayCreationFailed,

    #[error("Failed to create direct byte buffer")]
    ByteBufferCreationFailed,

    // Engine runtime errors
    #[error("UnityPlayer has no current activity")]
    ActivityUnavailable,

    // External error conversions
    #[error(transparent)]
    Jni(#[from] jni::errors::Error),
}

impl CategorizedError for AndroidError {
    fn category(&self) -> ErrorCategory {
        match self {
            AndroidError::JavaVmNotInitialized
            | AndroidError::ClassNotFound(_)
            | AndroidError::JniFieldGetFailed(_)
            | AndroidError::ActivityUnavailable => ErrorCategory::Initialization,
            AndroidError::JvmAttachFailed(_)
            | AndroidError::JniException
            | AndroidError::JniGlobalRefFailed
            | AndroidError::JniMethodCallFailed(_)
            | AndroidError::JniUnexpectedReturnValue { .. }
            | AndroidError::JniStringCreationFailed
            | AndroidError::JniArrayCreationFailed
            | AndroidError::ByteBufferCreationFailed
            | AndroidError::Jni(_) => ErrorCategory::Platform,
        }
    }
}

impl From<AndroidError> for CommonError {
    fn from(err: AndroidError) -> Self {
        CommonError::Categorized {
            category: err.category(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for unibridge_android
pub type Result<T> = std::result::Result<T, AndroidError>;
