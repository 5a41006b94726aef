use std::sync::{Arc, Mutex, Weak};

use jni::JNIEnv;
use jni::objects::{JClass, JValue};
use jni::sys::jint;
use unibridge_common::{NetworkInfoBridge, NetworkInfoHost, Result};

use crate::error::Result as AndroidResult;
use crate::java::{self, SafeGlobalRef};
use crate::lock;

const NETWORK_INFO_CLASS: &str = "com/unibridge/NetworkInfo";

/// Host over the managed connectivity class. `init` registers the Java
/// broadcast receiver; `deinit` unregisters it again.
pub struct AndroidNetworkInfoHost {
    class: SafeGlobalRef,
}

impl AndroidNetworkInfoHost {
    pub(crate) fn new(activity: &SafeGlobalRef) -> AndroidResult<Self> {
        let mut env = java::attach_current_thread()?;
        let class = java::bind_class(&mut env, NETWORK_INFO_CLASS)?;
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

impl NetworkInfoHost for AndroidNetworkInfoHost {
    fn current_network_type(&self) -> Result<i32> {
        let mut env = java::attach_current_thread()?;
        Ok(java::call_static_int_method(
            &mut env,
            self.class.as_obj(),
            "getCurrentNetworkType",
            "()I",
            &[],
        )?)
    }

    fn deinit(&self) -> Result<()> {
        let mut env = java::attach_current_thread()?;
        java::call_static_void_method(&mut env, self.class.as_obj(), "deinit", "()V", &[])?;
        Ok(())
    }
}

static REGISTERED: Mutex<Option<Weak<NetworkInfoBridge<AndroidNetworkInfoHost>>>> =
    Mutex::new(None);

pub(crate) fn register_bridge(bridge: &Arc<NetworkInfoBridge<AndroidNetworkInfoHost>>) {
    *lock(&REGISTERED) = Some(Arc::downgrade(bridge));
}

fn registered_bridge() -> Option<Arc<NetworkInfoBridge<AndroidNetworkInfoHost>>> {
    lock(&REGISTERED).as_ref()?.upgrade()
}

/// Called by com.unibridge.NetworkInfo on every connectivity change.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_unibridge_NetworkInfo_networkTypeChanged(
    _env: JNIEnv,
    _class: JClass,
    network_type: jint,
) {
    if let Some(bridge) = registered_bridge() {
        bridge.type_changed(network_type);
    }
}
