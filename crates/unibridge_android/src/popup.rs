use std::sync::{Arc, Mutex, Weak};

use jni::JNIEnv;
use jni::objects::{JClass, JValue};
use jni::sys::jint;
use unibridge_common::{PopupBridge, PopupHost, PopupRequest, Result};

use crate::error::Result as AndroidResult;
use crate::java::{self, SafeGlobalRef};
use crate::lock;

const POPUP_CLASS: &str = "com/unibridge/NativePopup";

/// Host over the managed popup class. The dialog UI lives in Java; this
/// side only forwards the show call and receives the dismissal.
pub struct AndroidPopupHost {
    class: SafeGlobalRef,
}

impl AndroidPopupHost {
    pub(crate) fn new(activity: &SafeGlobalRef) -> AndroidResult<Self> {
        let mut env = java::attach_current_thread()?;
        let class = java::bind_class(&mut env, POPUP_CLASS)?;
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

impl PopupHost for AndroidPopupHost {
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

    fn show(&self, request: &PopupRequest<'_>) -> Result<()> {
        let mut env = java::attach_current_thread()?;
        let title = java::to_java_string(&env, request.title)?;
        let message = java::to_java_string(&env, request.message)?;
        let buttons = java::to_java_string_array(&mut env, request.buttons)?;
        java::call_static_void_method(
            &mut env,
            self.class.as_obj(),
            "show",
            "(Ljava/lang/String;Ljava/lang/String;[Ljava/lang/String;)V",
            &[
                JValue::Object(&title),
                JValue::Object(&message),
                JValue::Object(&buttons),
            ],
        )?;
        Ok(())
    }
}

static REGISTERED: Mutex<Option<Weak<PopupBridge<AndroidPopupHost>>>> = Mutex::new(None);

pub(crate) fn register_bridge(bridge: &Arc<PopupBridge<AndroidPopupHost>>) {
    *lock(&REGISTERED) = Some(Arc::downgrade(bridge));
}

fn registered_bridge() -> Option<Arc<PopupBridge<AndroidPopupHost>>> {
    lock(&REGISTERED).as_ref()?.upgrade()
}

/// Called by com.unibridge.NativePopup when the dialog is dismissed.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_unibridge_NativePopup_popupDialogDismissed(
    _env: JNIEnv,
    _class: JClass,
    button_index: jint,
) {
    if let Some(bridge) = registered_bridge() {
        bridge.dismissed(button_index);
    }
}
