#[cfg(target_os = "android")]
pub type PlatformBridgeSystem = unibridge_android::AndroidBridgeSystem;

#[cfg(target_vendor = "apple")]
pub type PlatformBridgeSystem = unibridge_apple::AppleBridgeSystem;

// Everything else runs the in-process backend, the same role the editor
// fallback plays on the managed side.
#[cfg(not(any(target_os = "android", target_vendor = "apple")))]
pub type PlatformBridgeSystem = unibridge_headless::HeadlessBridgeSystem;
