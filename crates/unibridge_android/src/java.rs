use std::sync::Arc;

use jni::objects::{GlobalRef, JClass, JObject, JObjectArray, JString, JValue};
use jni::{AttachGuard, JNIEnv, JavaVM};

use crate::error::{AndroidError, Result};

const UNITY_PLAYER_CLASS: &str = "com/unity3d/player/UnityPlayer";

/// Get the global JavaVM instance
pub fn get_java_vm() -> Result<&'static JavaVM> {
    crate::JAVA_VM
        .get()
        .ok_or(AndroidError::JavaVmNotInitialized)
}

/// Attach current thread to JVM and get JNIEnv
pub fn attach_current_thread() -> Result<AttachGuard<'static>> {
    let vm = get_java_vm()?;
    vm.attach_current_thread()
        .map_err(|e| AndroidError::JvmAttachFailed(format!("{:?}", e)))
}

/// Thread-safe wrapper for Java GlobalRef
pub struct SafeGlobalRef {
    inner: Arc<GlobalRef>,
}

impl SafeGlobalRef {
    pub fn new(env: &JNIEnv, obj: JObject) -> Result<Self> {
        let global_ref = env
            .new_global_ref(obj)
            .map_err(|_| AndroidError::JniGlobalRefFailed)?;
        Ok(Self {
            inner: Arc::new(global_ref),
        })
    }

    pub fn as_obj(&self) -> &JObject<'_> {
        self.inner.as_obj()
    }
}

unsafe impl Send for SafeGlobalRef {}
unsafe impl Sync for SafeGlobalRef {}

impl Clone for SafeGlobalRef {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Convert JNI exception to Rust error
pub fn check_jni_exception(env: &JNIEnv) -> Result<()> {
    if env.exception_check()? {
        env.exception_describe()?;
        env.exception_clear()?;
        return Err(AndroidError::JniException);
    }
    Ok(())
}

/// Resolve a class, clearing the pending ClassNotFoundException on failure
pub fn find_class<'a>(env: &mut JNIEnv<'a>, name: &str) -> Result<JClass<'a>> {
    match env.find_class(name) {
        Ok(class) => Ok(class),
        Err(_) => {
            let _ = env.exception_clear();
            Err(AndroidError::ClassNotFound(name.to_string()))
        }
    }
}

/// Resolve a plugin class and pin it with a global reference
pub fn bind_class(env: &mut JNIEnv, name: &str) -> Result<SafeGlobalRef> {
    let class = find_class(env, name)?;
    SafeGlobalRef::new(env, JObject::from(class))
}

/// Helper to call static Java void methods with error handling
pub fn call_static_void_method(
    env: &mut JNIEnv,
    class: &JObject,
    name: &str,
    sig: &str,
    args: &[JValue],
) -> Result<()> {
    let class: &JClass = class.into();
    env.call_static_method(class, name, sig, args)
        .map_err(|_| AndroidError::JniMethodCallFailed(name.to_string()))?;
    check_jni_exception(env)?;
    Ok(())
}

/// Helper to call static Java methods returning int
pub fn call_static_int_method(
    env: &mut JNIEnv,
    class: &JObject,
    name: &str,
    sig: &str,
    args: &[JValue],
) -> Result<jni::sys::jint> {
    let class: &JClass = class.into();
    let result = env
        .call_static_method(class, name, sig, args)
        .map_err(|_| AndroidError::JniMethodCallFailed(name.to_string()))?;
    check_jni_exception(env)?;
    result
        .i()
        .map_err(|_| AndroidError::JniUnexpectedReturnValue { expected: "int" })
}

/// Helper to call static Java methods returning boolean
pub fn call_static_bool_method(
    env: &mut JNIEnv,
    class: &JObject,
    name: &str,
    sig: &str,
    args: &[JValue],
) -> Result<bool> {
    let class: &JClass = class.into();
    let result = env
        .call_static_method(class, name, sig, args)
        .map_err(|_| AndroidError::JniMethodCallFailed(name.to_string()))?;
    check_jni_exception(env)?;
    result
        .z()
        .map_err(|_| AndroidError::JniUnexpectedReturnValue { expected: "boolean" })
}

/// Convert Rust string to Java string
pub fn to_java_string<'a>(env: &JNIEnv<'a>, s: &str) -> Result<JString<'a>> {
    env.new_string(s)
        .map_err(|_| AndroidError::JniStringCreationFailed)
}

/// Convert a slice of Rust strings to a Java String[]
pub fn to_java_string_array<'a>(
    env: &mut JNIEnv<'a>,
    items: &[&str],
) -> Result<JObjectArray<'a>> {
    let string_class = find_class(env, "java/lang/String")?;
    let array = env
        .new_object_array(items.len() as i32, &string_class, &JObject::null())
        .map_err(|_| AndroidError::JniArrayCreationFailed)?;
    for (i, item) in items.iter().enumerate() {
        let value = to_java_string(env, item)?;
        env.set_object_array_element(&array, i as i32, value)
            .map_err(|_| AndroidError::JniArrayCreationFailed)?;
    }
    Ok(array)
}

/// Resolve com.unity3d.player.UnityPlayer.currentActivity from the engine
/// runtime
pub fn current_activity(env: &mut JNIEnv) -> Result<SafeGlobalRef> {
    let class = find_class(env, UNITY_PLAYER_CLASS)?;
    let field = env
        .get_static_field(class, "currentActivity", "Landroid/app/Activity;")
        .map_err(|_| AndroidError::JniFieldGetFailed("currentActivity".to_string()))?;
    check_jni_exception(env)?;
    let activity = field
        .l()
        .map_err(|_| AndroidError::JniUnexpectedReturnValue { expected: "object" })?;
    if activity.is_null() {
        return Err(AndroidError::ActivityUnavailable);
    }
    SafeGlobalRef::new(env, activity)
}
