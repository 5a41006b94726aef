use std::sync::{Arc, Mutex, Weak};

use jni::JNIEnv;
use jni::objects::{JClass, JObject, JString, JValue};
use jni::sys::jboolean;
use unibridge_common::{Result, ShareRequest, SharingBridge, SharingHost};

use crate::error::{AndroidError, Result as AndroidResult};
use crate::java::{self, SafeGlobalRef};
use crate::lock;

const SHARING_CLASS: &str = "com/unibridge/SharingManager";

/// Host over the managed share-sheet class.
pub struct AndroidSharingHost {
    class: SafeGlobalRef,
}

impl AndroidSharingHost {
    pub(crate) fn new(activity: &SafeGlobalRef) -> AndroidResult<Self> {
        let mut env = java::attach_current_thread()?;
        let class = java::bind_class(&mut env, SHARING_CLASS)?;
        java::call_static_void_method(
            &mut env,
            class.as_obj(),
            "init",
            "(Landroid/content/Context;)V",
            &[JValue::Object(activity.as_obj())],
        )?;
        Ok(Self { class })
    }
}

impl SharingHost for AndroidSharingHost {
    fn is_showing(&self) -> Result<bool> {
        let mut env = java::attach_current_thread()?;
        Ok(java::call_static_bool_method(
            &mut env,
            self.class.as_obj(),
            "isShowing",
            "()Z",
            &[],
        )?)
    }

    fn share(&self, request: &ShareRequest<'_>) -> Result<()> {
        let mut env = java::attach_current_thread()?;
        let text = java::to_java_string(&env, request.text)?;
        let url = java::to_java_string(&env, request.url)?;
        // The image crosses as a direct buffer over the caller's memory, no
        // copy; the buffer must outlive the Java call. Zero-length images
        // become a null buffer.
        let image = if request.image.is_empty() {
            JObject::null()
        } else {
            let buffer = unsafe {
                env.new_direct_byte_buffer(
                    request.image.as_ptr() as *mut u8,
                    request.image.len(),
                )
            }
            .map_err(|_| AndroidError::ByteBufferCreationFailed)?;
            JObject::from(buffer)
        };
        java::call_static_void_method(
            &mut env,
            self.class.as_obj(),
            "share",
            "(Ljava/lang/String;Ljava/lang/String;Ljava/nio/ByteBuffer;)V",
            &[
                JValue::Object(&text),
                JValue::Object(&url),
                JValue::Object(&image),
            ],
        )?;
        Ok(())
    }
}

static REGISTERED: Mutex<Option<Weak<SharingBridge<AndroidSharingHost>>>> = Mutex::new(None);

pub(crate) fn register_bridge(bridge: &Arc<SharingBridge<AndroidSharingHost>>) {
    *lock(&REGISTERED) = Some(Arc::downgrade(bridge));
}

fn registered_bridge() -> Option<Arc<SharingBridge<AndroidSharingHost>>> {
    lock(&REGISTERED).as_ref()?.upgrade()
}

/// Called by com.unibridge.SharingManager when the share sheet closes.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_unibridge_SharingManager_sharingFinished(
    mut env: JNIEnv,
    _class: JClass,
    destination: JString,
    completed: jboolean,
) {
    let destination: String = match env.get_string(&destination) {
        Ok(s) => s.into(),
        Err(_) => String::new(),
    };
    if let Some(bridge) = registered_bridge() {
        bridge.finished(destination, completed != 0);
    }
}
