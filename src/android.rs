//! JNI bindings for Android.
//!
//! These functions are called from Kotlin via the JNI bridge. The engine
//! lives behind a `Long` handle created by `nativeCreate`; every string
//! result is copied into a fresh Java string.

use jni::objects::{JClass, JString};
use jni::sys::{jboolean, jint, jlong, jstring, JNI_FALSE, JNI_TRUE};
use jni::JNIEnv;

use crate::bridge::ScoreBridge;

unsafe fn bridge_mut<'a>(handle: jlong) -> Option<&'a mut ScoreBridge> {
    (handle as *mut ScoreBridge).as_mut()
}

fn to_jboolean(ok: bool) -> jboolean {
    if ok {
        JNI_TRUE
    } else {
        JNI_FALSE
    }
}

fn read_string(env: &mut JNIEnv, value: &JString) -> Option<String> {
    if value.is_null() {
        return None;
    }
    match env.get_string(value) {
        Ok(s) => Some(s.into()),
        Err(e) => {
            log::warn!("unreadable Java string: {e}");
            None
        }
    }
}

fn new_string(env: &mut JNIEnv, value: &str) -> jstring {
    match env.new_string(value) {
        Ok(js) => js.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Called from Kotlin as:
///   external fun nativeCreate(): Long
#[no_mangle]
pub extern "system" fn Java_com_scorelite_ScoreLite_nativeCreate(
    _env: JNIEnv,
    _class: JClass,
) -> jlong {
    Box::into_raw(Box::new(ScoreBridge::new())) as jlong
}

/// Called from Kotlin as:
///   external fun nativeDestroy(handle: Long)
#[no_mangle]
pub extern "system" fn Java_com_scorelite_ScoreLite_nativeDestroy(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
) {
    if handle != 0 {
        drop(unsafe { Box::from_raw(handle as *mut ScoreBridge) });
    }
}

/// Called from Kotlin as:
///   external fun nativeInitialize(handle: Long): Boolean
#[no_mangle]
pub extern "system" fn Java_com_scorelite_ScoreLite_nativeInitialize(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
) -> jboolean {
    match unsafe { bridge_mut(handle) } {
        Some(bridge) => to_jboolean(bridge.initialize()),
        None => JNI_FALSE,
    }
}

/// Called from Kotlin as:
///   external fun nativeSetOptions(handle: Long, json: String): Boolean
#[no_mangle]
pub extern "system" fn Java_com_scorelite_ScoreLite_nativeSetOptions(
    mut env: JNIEnv,
    _class: JClass,
    handle: jlong,
    json: JString,
) -> jboolean {
    let json = read_string(&mut env, &json);
    match unsafe { bridge_mut(handle) } {
        Some(bridge) => to_jboolean(bridge.set_options(json.as_deref())),
        None => JNI_FALSE,
    }
}

/// Called from Kotlin as:
///   external fun nativeLoadData(handle: Long, data: String): Boolean
#[no_mangle]
pub extern "system" fn Java_com_scorelite_ScoreLite_nativeLoadData(
    mut env: JNIEnv,
    _class: JClass,
    handle: jlong,
    data: JString,
) -> jboolean {
    let data = read_string(&mut env, &data);
    match unsafe { bridge_mut(handle) } {
        Some(bridge) => to_jboolean(bridge.load_document(data.as_deref())),
        None => JNI_FALSE,
    }
}

/// Called from Kotlin as:
///   external fun nativeRenderToSvg(handle: Long, pageNumber: Int): String
#[no_mangle]
pub extern "system" fn Java_com_scorelite_ScoreLite_nativeRenderToSvg(
    mut env: JNIEnv,
    _class: JClass,
    handle: jlong,
    page_number: jint,
) -> jstring {
    let svg = match unsafe { bridge_mut(handle) } {
        Some(bridge) => bridge.render_page(page_number).to_string_lossy().into_owned(),
        None => crate::renderer::PLACEHOLDER_SVG.to_string(),
    };
    new_string(&mut env, &svg)
}

/// Called from Kotlin as:
///   external fun nativeGetVersion(handle: Long): String
#[no_mangle]
pub extern "system" fn Java_com_scorelite_ScoreLite_nativeGetVersion(
    mut env: JNIEnv,
    _class: JClass,
    handle: jlong,
) -> jstring {
    let version = match unsafe { bridge_mut(handle) } {
        Some(bridge) => bridge.version().to_string_lossy().into_owned(),
        None => crate::session::FALLBACK_VERSION.to_string(),
    };
    new_string(&mut env, &version)
}

/// Called from Kotlin as:
///   external fun nativeCleanup(handle: Long)
#[no_mangle]
pub extern "system" fn Java_com_scorelite_ScoreLite_nativeCleanup(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
) {
    if let Some(bridge) = unsafe { bridge_mut(handle) } {
        bridge.cleanup();
    }
}
