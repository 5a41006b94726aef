/// The backend picked by the target: JNI on Android, Objective-C on Apple
/// platforms, the in-process backend everywhere else.
pub type PlatformBridges = unibridge::Bridges<unibridge::PlatformBridgeSystem>;
