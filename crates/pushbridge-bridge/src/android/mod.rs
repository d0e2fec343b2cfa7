// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform bridge via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Each trait method invokes the corresponding
// Android API through JNI calls into the ART runtime.
//
// ## Architecture notes
//
// SharedPreferences, NotificationManager, PackageManager probes and Custom
// Tabs launches complete synchronously and are fully implemented here.
//
// Binding the Custom Tabs service needs a Java `CustomTabsServiceConnection`
// subclass, which cannot be defined from Rust. The host app ships a tiny
// `com.pushbridge.TabServiceGlue` class whose static `bind(Context, String)`
// calls `CustomTabsClient.bindCustomTabsService` and forwards the two
// connection callbacks to the `native*` functions exported at the bottom of
// this file.
//
// The process context is not a screen. `com.pushbridge.ActivityGlue` reports
// the host activity from `onResume` and `onDestroy`, and custom tabs launch
// only from the activity attached that way.

#![cfg(target_os = "android")]

use std::sync::{Arc, Mutex, OnceLock};

use jni::JNIEnv;
use jni::objects::{GlobalRef, JClass, JObject, JString, JValue};

use pushbridge_core::error::{BridgeError, Result};
use pushbridge_core::types::NotificationRequest;

use crate::activity::ActivitySlot;
use crate::traits::*;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// `Intent.FLAG_ACTIVITY_CLEAR_TOP | Intent.FLAG_ACTIVITY_SINGLE_TOP`.
const OPEN_MAIN_FLAGS: i32 = 0x0400_0000 | 0x2000_0000;

/// `PendingIntent.FLAG_UPDATE_CURRENT | PendingIntent.FLAG_IMMUTABLE`.
const PENDING_INTENT_FLAGS: i32 = 0x0800_0000 | 0x0400_0000;

/// `Context.MODE_PRIVATE`.
const MODE_PRIVATE: i32 = 0;

/// Host-side glue class that owns the Java `CustomTabsServiceConnection`.
const TAB_GLUE_CLASS: &str = "com/pushbridge/TabServiceGlue";

static JAVA_VM: OnceLock<jni::JavaVM> = OnceLock::new();

/// Connection registered by the most recent `bind_tab_service` call.
static TAB_CONNECTION: Mutex<Option<Arc<dyn TabServiceConnection>>> = Mutex::new(None);

/// Foreground screen reported through `com.pushbridge.ActivityGlue`.
static CURRENT_ACTIVITY: ActivitySlot<GlobalRef> = ActivitySlot::new();

fn java_vm() -> Result<&'static jni::JavaVM> {
    if let Some(vm) = JAVA_VM.get() {
        return Ok(vm);
    }
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is guaranteed valid for the lifetime of the process.
    let vm = unsafe { jni::JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| BridgeError::Bridge(format!("failed to obtain JavaVM: {e}")))?;
    Ok(JAVA_VM.get_or_init(|| vm))
}

/// Obtain a [`JNIEnv`] for the current thread, attaching it if needed.
fn jni_env() -> Result<JNIEnv<'static>> {
    java_vm()?
        .attach_current_thread_permanently()
        .map_err(|e| BridgeError::Bridge(format!("failed to attach JNI thread: {e}")))
}

/// Obtain the hosting Android `Context` as a [`JObject`].
fn context() -> Result<JObject<'static>> {
    let ptr = ndk_context::android_context().context();
    if ptr.is_null() {
        return Err(BridgeError::Bridge(
            "Android context is null — native activity not initialised".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Context.
    Ok(unsafe { JObject::from_raw(ptr.cast()) })
}

/// Convenience: map any `jni::errors::Error` into `BridgeError::Bridge`.
fn jni_err(context: &str, e: jni::errors::Error) -> BridgeError {
    BridgeError::Bridge(format!("{context}: {e}"))
}

/// Call an object-returning instance method.
fn call_obj<'a>(
    env: &mut JNIEnv<'a>,
    target: &JObject<'_>,
    name: &str,
    sig: &str,
    args: &[JValue<'_, '_>],
) -> Result<JObject<'a>> {
    env.call_method(target, name, sig, args)
        .map_err(|e| jni_err(name, e))?
        .l()
        .map_err(|e| jni_err(name, e))
}

fn jstring<'a>(env: &mut JNIEnv<'a>, value: &str) -> Result<JString<'a>> {
    env.new_string(value)
        .map_err(|e| jni_err("new_string", e))
}

// ---------------------------------------------------------------------------
// Bridge struct
// ---------------------------------------------------------------------------

/// Android implementation of the pushbridge platform collaborators.
///
/// Zero-sized; all state lives on the Java side.
pub struct AndroidBridge;

impl AndroidBridge {
    /// Create a new Android bridge.
    ///
    /// This does **not** touch JNI — the first JNI call happens lazily when
    /// a trait method is invoked.
    pub fn new() -> Self {
        Self
    }
}

impl Default for AndroidBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for AndroidBridge {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

// ---------------------------------------------------------------------------
// KeyValueStore — SharedPreferences (MODE_PRIVATE)
// ---------------------------------------------------------------------------

impl KeyValueStore for AndroidBridge {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<String>> {
        let mut env = jni_env()?;
        let ctx = context()?;
        let prefs = shared_preferences(&mut env, &ctx, namespace)?;

        let j_key = jstring(&mut env, key)?;
        let value = call_obj(
            &mut env,
            &prefs,
            "getString",
            "(Ljava/lang/String;Ljava/lang/String;)Ljava/lang/String;",
            &[JValue::Object(&j_key), JValue::Object(&JObject::null())],
        )?;

        if value.is_null() {
            return Ok(None);
        }
        let value: String = env
            .get_string(&JString::from(value))
            .map_err(|e| jni_err("get_string(value)", e))?
            .into();
        Ok(Some(value))
    }

    /// Writes with `commit()` so the value is on disk before returning.
    fn set(&self, namespace: &str, key: &str, value: &str) -> Result<()> {
        let mut env = jni_env()?;
        let ctx = context()?;
        let prefs = shared_preferences(&mut env, &ctx, namespace)?;

        let editor = call_obj(
            &mut env,
            &prefs,
            "edit",
            "()Landroid/content/SharedPreferences$Editor;",
            &[],
        )?;

        let j_key = jstring(&mut env, key)?;
        let j_value = jstring(&mut env, value)?;
        call_obj(
            &mut env,
            &editor,
            "putString",
            "(Ljava/lang/String;Ljava/lang/String;)Landroid/content/SharedPreferences$Editor;",
            &[JValue::Object(&j_key), JValue::Object(&j_value)],
        )?;

        let committed = env
            .call_method(&editor, "commit", "()Z", &[])
            .map_err(|e| jni_err("editor.commit", e))?
            .z()
            .map_err(|e| jni_err("commit->z", e))?;

        if !committed {
            return Err(BridgeError::Storage(format!(
                "SharedPreferences commit failed for {namespace}/{key}"
            )));
        }
        tracing::debug!(namespace, key, "Android: preference committed");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// NotificationPresenter — android.app.NotificationManager
// ---------------------------------------------------------------------------

impl NotificationPresenter for AndroidBridge {
    fn notify(&self, request: &NotificationRequest) -> Result<()> {
        let mut env = jni_env()?;
        let ctx = context()?;

        tracing::info!(
            id = request.id,
            number = request.number,
            "Android: raising notification"
        );

        let pending = open_main_pending_intent(&mut env, &ctx)?;

        // -- Small icon: the application's launcher icon -------------------------
        let app_info = call_obj(
            &mut env,
            &ctx,
            "getApplicationInfo",
            "()Landroid/content/pm/ApplicationInfo;",
            &[],
        )?;
        let icon = env
            .get_field(&app_info, "icon", "I")
            .map_err(|e| jni_err("ApplicationInfo.icon", e))?
            .i()
            .map_err(|e| jni_err("icon->i", e))?;

        // -- BigTextStyle for the expanded body ------------------------------------
        let style = env
            .new_object("android/app/Notification$BigTextStyle", "()V", &[])
            .map_err(|e| jni_err("new BigTextStyle", e))?;
        let j_expanded = jstring(&mut env, &request.expanded_body)?;
        call_obj(
            &mut env,
            &style,
            "bigText",
            "(Ljava/lang/CharSequence;)Landroid/app/Notification$BigTextStyle;",
            &[JValue::Object(&j_expanded)],
        )?;

        // -- Notification.Builder ----------------------------------------------------
        let builder = env
            .new_object(
                "android/app/Notification$Builder",
                "(Landroid/content/Context;)V",
                &[JValue::Object(&ctx)],
            )
            .map_err(|e| jni_err("new Notification.Builder", e))?;

        const BUILDER: &str = "Landroid/app/Notification$Builder;";
        let j_title = jstring(&mut env, &request.title)?;
        let j_short = jstring(&mut env, &request.short_body)?;

        call_obj(&mut env, &builder, "setSmallIcon", &format!("(I){BUILDER}"), &[JValue::Int(icon)])?;
        call_obj(
            &mut env,
            &builder,
            "setContentTitle",
            &format!("(Ljava/lang/CharSequence;){BUILDER}"),
            &[JValue::Object(&j_title)],
        )?;
        call_obj(
            &mut env,
            &builder,
            "setContentText",
            &format!("(Ljava/lang/CharSequence;){BUILDER}"),
            &[JValue::Object(&j_short)],
        )?;
        call_obj(
            &mut env,
            &builder,
            "setAutoCancel",
            &format!("(Z){BUILDER}"),
            &[JValue::Bool(u8::from(request.auto_cancel))],
        )?;
        call_obj(
            &mut env,
            &builder,
            "setNumber",
            &format!("(I){BUILDER}"),
            &[JValue::Int(i32::try_from(request.number).unwrap_or(i32::MAX))],
        )?;
        call_obj(
            &mut env,
            &builder,
            "setStyle",
            &format!("(Landroid/app/Notification$Style;){BUILDER}"),
            &[JValue::Object(&style)],
        )?;
        call_obj(
            &mut env,
            &builder,
            "setContentIntent",
            &format!("(Landroid/app/PendingIntent;){BUILDER}"),
            &[JValue::Object(&pending)],
        )?;

        let notification = call_obj(&mut env, &builder, "build", "()Landroid/app/Notification;", &[])?;

        let manager = notification_manager(&mut env, &ctx)?;
        env.call_method(
            &manager,
            "notify",
            "(ILandroid/app/Notification;)V",
            &[JValue::Int(request.id), JValue::Object(&notification)],
        )
        .map_err(|e| jni_err("NotificationManager.notify", e))?;

        Ok(())
    }

    fn cancel(&self, id: i32) -> Result<()> {
        let mut env = jni_env()?;
        let ctx = context()?;
        let manager = notification_manager(&mut env, &ctx)?;

        env.call_method(&manager, "cancel", "(I)V", &[JValue::Int(id)])
            .map_err(|e| jni_err("NotificationManager.cancel", e))?;

        tracing::debug!(id, "Android: notification cancelled");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// BrowserService — Custom Tabs
// ---------------------------------------------------------------------------

impl BrowserService for AndroidBridge {
    fn bind_tab_service(
        &self,
        package: &str,
        connection: Arc<dyn TabServiceConnection>,
    ) -> Result<bool> {
        let mut env = jni_env()?;
        let ctx = context()?;

        {
            let mut slot = TAB_CONNECTION
                .lock()
                .map_err(|_| BridgeError::Bridge("tab connection lock poisoned".into()))?;
            *slot = Some(connection);
        }

        let j_package = jstring(&mut env, package)?;
        let accepted = env
            .call_static_method(
                TAB_GLUE_CLASS,
                "bind",
                "(Landroid/content/Context;Ljava/lang/String;)Z",
                &[JValue::Object(&ctx), JValue::Object(&j_package)],
            )
            .map_err(|e| jni_err("TabServiceGlue.bind", e))?
            .z()
            .map_err(|e| jni_err("bind->z", e))?;

        tracing::info!(package, accepted, "Android: tab service bind requested");
        Ok(accepted)
    }

    fn resolve_tab_service(&self, action: &str, package: &str) -> bool {
        match probe_service(action, package) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(package, "Android: tab service probe failed: {e}");
                false
            }
        }
    }
}

fn probe_service(action: &str, package: &str) -> Result<bool> {
    let mut env = jni_env()?;
    let ctx = context()?;

    let j_action = jstring(&mut env, action)?;
    let intent = env
        .new_object(
            "android/content/Intent",
            "(Ljava/lang/String;)V",
            &[JValue::Object(&j_action)],
        )
        .map_err(|e| jni_err("new Intent(action)", e))?;

    let j_package = jstring(&mut env, package)?;
    call_obj(
        &mut env,
        &intent,
        "setPackage",
        "(Ljava/lang/String;)Landroid/content/Intent;",
        &[JValue::Object(&j_package)],
    )?;

    let pm = call_obj(
        &mut env,
        &ctx,
        "getPackageManager",
        "()Landroid/content/pm/PackageManager;",
        &[],
    )?;
    let info = call_obj(
        &mut env,
        &pm,
        "resolveService",
        "(Landroid/content/Intent;I)Landroid/content/pm/ResolveInfo;",
        &[JValue::Object(&intent), JValue::Int(0)],
    )?;

    Ok(!info.is_null())
}

/// `CustomTabsClient` received through the glue class.
struct AndroidTabClient {
    client: GlobalRef,
}

impl TabClient for AndroidTabClient {
    fn new_session(&self) -> Option<Arc<dyn TabSession>> {
        let result = (|| -> Result<Option<GlobalRef>> {
            let mut env = jni_env()?;
            let session = call_obj(
                &mut env,
                self.client.as_obj(),
                "newSession",
                "(Landroid/support/customtabs/CustomTabsCallback;)Landroid/support/customtabs/CustomTabsSession;",
                &[JValue::Object(&JObject::null())],
            )?;
            if session.is_null() {
                return Ok(None);
            }
            env.new_global_ref(session)
                .map(Some)
                .map_err(|e| jni_err("new_global_ref(session)", e))
        })();

        match result {
            Ok(Some(session)) => Some(Arc::new(AndroidTabSession { session })),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Android: newSession failed: {e}");
                None
            }
        }
    }
}

/// `CustomTabsSession` held as a global reference.
struct AndroidTabSession {
    session: GlobalRef,
}

impl std::fmt::Debug for AndroidTabSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AndroidTabSession").finish_non_exhaustive()
    }
}

impl TabSession for AndroidTabSession {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

// ---------------------------------------------------------------------------
// ActivityProvider — hosting Activity
// ---------------------------------------------------------------------------

impl ActivityProvider for AndroidBridge {
    fn current_activity(&self) -> Option<Arc<dyn Activity>> {
        let activity = CURRENT_ACTIVITY.current()?;
        Some(Arc::new(AndroidActivity { activity }))
    }
}

struct AndroidActivity {
    activity: GlobalRef,
}

impl Activity for AndroidActivity {
    fn launch_tab(&self, launch: &TabLaunch) -> Result<()> {
        let mut env = jni_env()?;

        tracing::info!(
            url = %launch.url,
            package = %launch.package,
            with_session = launch.session.is_some(),
            "Android: launching custom tab"
        );

        // -- CustomTabsIntent.Builder(session) or Builder() -------------------------
        const BUILDER: &str = "android/support/customtabs/CustomTabsIntent$Builder";
        // Only sessions minted by this bridge carry a Java object.
        let session = launch.session.as_ref().and_then(|s| {
            s.as_any()
                .downcast_ref::<AndroidTabSession>()
                .map(|s| s.session.clone())
        });
        let builder = match &session {
            Some(session) => env.new_object(
                BUILDER,
                "(Landroid/support/customtabs/CustomTabsSession;)V",
                &[JValue::Object(session.as_obj())],
            ),
            None => env.new_object(BUILDER, "()V", &[]),
        }
        .map_err(|e| jni_err("new CustomTabsIntent.Builder", e))?;

        let tabs_intent = call_obj(
            &mut env,
            &builder,
            "build",
            "()Landroid/support/customtabs/CustomTabsIntent;",
            &[],
        )?;

        // -- customTabsIntent.intent.setPackage(package) ----------------------------
        let intent = env
            .get_field(&tabs_intent, "intent", "Landroid/content/Intent;")
            .map_err(|e| jni_err("CustomTabsIntent.intent", e))?
            .l()
            .map_err(|e| jni_err("intent->l", e))?;
        let j_package = jstring(&mut env, &launch.package)?;
        call_obj(
            &mut env,
            &intent,
            "setPackage",
            "(Ljava/lang/String;)Landroid/content/Intent;",
            &[JValue::Object(&j_package)],
        )?;

        // -- launchUrl(activity, Uri.parse(url)) ------------------------------------
        let j_url = jstring(&mut env, &launch.url)?;
        let uri = env
            .call_static_method(
                "android/net/Uri",
                "parse",
                "(Ljava/lang/String;)Landroid/net/Uri;",
                &[JValue::Object(&j_url)],
            )
            .map_err(|e| jni_err("Uri.parse", e))?
            .l()
            .map_err(|e| jni_err("parse->l", e))?;

        env.call_method(
            &tabs_intent,
            "launchUrl",
            "(Landroid/content/Context;Landroid/net/Uri;)V",
            &[JValue::Object(self.activity.as_obj()), JValue::Object(&uri)],
        )
        .map_err(|e| jni_err("CustomTabsIntent.launchUrl", e))?;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PushTokenProvider — FirebaseInstanceId
// ---------------------------------------------------------------------------

impl PushTokenProvider for AndroidBridge {
    fn push_token(&self) -> Result<Option<String>> {
        let mut env = jni_env()?;

        let instance = env
            .call_static_method(
                "com/google/firebase/iid/FirebaseInstanceId",
                "getInstance",
                "()Lcom/google/firebase/iid/FirebaseInstanceId;",
                &[],
            )
            .map_err(|e| jni_err("FirebaseInstanceId.getInstance", e))?
            .l()
            .map_err(|e| jni_err("getInstance->l", e))?;

        let token = call_obj(&mut env, &instance, "getToken", "()Ljava/lang/String;", &[])?;
        if token.is_null() {
            return Ok(None);
        }
        let token: String = env
            .get_string(&JString::from(token))
            .map_err(|e| jni_err("get_string(token)", e))?
            .into();
        Ok(Some(token))
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Calls `context.getSharedPreferences(namespace, MODE_PRIVATE)`.
fn shared_preferences<'a>(
    env: &mut JNIEnv<'a>,
    ctx: &JObject<'_>,
    namespace: &str,
) -> Result<JObject<'a>> {
    let j_name = jstring(env, namespace)?;
    call_obj(
        env,
        ctx,
        "getSharedPreferences",
        "(Ljava/lang/String;I)Landroid/content/SharedPreferences;",
        &[JValue::Object(&j_name), JValue::Int(MODE_PRIVATE)],
    )
}

fn notification_manager<'a>(env: &mut JNIEnv<'a>, ctx: &JObject<'_>) -> Result<JObject<'a>> {
    let j_service = jstring(env, "notification")?;
    call_obj(
        env,
        ctx,
        "getSystemService",
        "(Ljava/lang/String;)Ljava/lang/Object;",
        &[JValue::Object(&j_service)],
    )
}

/// Pending intent that brings the launcher activity to the front, reusing
/// the running instance.
fn open_main_pending_intent<'a>(env: &mut JNIEnv<'a>, ctx: &JObject<'_>) -> Result<JObject<'a>> {
    let package = call_obj(env, ctx, "getPackageName", "()Ljava/lang/String;", &[])?;
    let pm = call_obj(
        env,
        ctx,
        "getPackageManager",
        "()Landroid/content/pm/PackageManager;",
        &[],
    )?;
    let launch = call_obj(
        env,
        &pm,
        "getLaunchIntentForPackage",
        "(Ljava/lang/String;)Landroid/content/Intent;",
        &[JValue::Object(&package)],
    )?;
    if launch.is_null() {
        return Err(BridgeError::Notification(
            "application has no launcher activity".into(),
        ));
    }

    call_obj(
        env,
        &launch,
        "setFlags",
        "(I)Landroid/content/Intent;",
        &[JValue::Int(OPEN_MAIN_FLAGS)],
    )?;

    env.call_static_method(
        "android/app/PendingIntent",
        "getActivity",
        "(Landroid/content/Context;ILandroid/content/Intent;I)Landroid/app/PendingIntent;",
        &[
            JValue::Object(ctx),
            JValue::Int(0),
            JValue::Object(&launch),
            JValue::Int(PENDING_INTENT_FLAGS),
        ],
    )
    .map_err(|e| jni_err("PendingIntent.getActivity", e))?
    .l()
    .map_err(|e| jni_err("getActivity->l", e))
}

fn registered_connection() -> Option<Arc<dyn TabServiceConnection>> {
    TAB_CONNECTION.lock().ok().and_then(|slot| slot.clone())
}

// ---------------------------------------------------------------------------
// Callbacks from com.pushbridge.TabServiceGlue
// ---------------------------------------------------------------------------

/// `TabServiceGlue.nativeOnServiceConnected(CustomTabsClient)`.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_pushbridge_TabServiceGlue_nativeOnServiceConnected<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
    client: JObject<'local>,
) {
    let client = match env.new_global_ref(client) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Android: could not retain CustomTabsClient: {e}");
            return;
        }
    };
    match registered_connection() {
        Some(connection) => connection.on_service_connected(Arc::new(AndroidTabClient { client })),
        None => tracing::warn!("Android: tab service connected with no registered listener"),
    }
}

/// `TabServiceGlue.nativeOnServiceDisconnected()`.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_pushbridge_TabServiceGlue_nativeOnServiceDisconnected<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
) {
    if let Some(connection) = registered_connection() {
        connection.on_service_disconnected();
    }
}

// ---------------------------------------------------------------------------
// Callbacks from com.pushbridge.ActivityGlue
// ---------------------------------------------------------------------------

/// `ActivityGlue.nativeOnActivityResumed(Activity)`.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_pushbridge_ActivityGlue_nativeOnActivityResumed<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
    activity: JObject<'local>,
) {
    match env.new_global_ref(activity) {
        Ok(activity) => CURRENT_ACTIVITY.attach(activity),
        Err(e) => tracing::error!("Android: could not retain resumed activity: {e}"),
    }
}

/// `ActivityGlue.nativeOnActivityDestroyed(Activity)`.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_pushbridge_ActivityGlue_nativeOnActivityDestroyed<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
    activity: JObject<'local>,
) {
    let cleared = CURRENT_ACTIVITY.detach_if(|current| {
        env.is_same_object(current.as_obj(), &activity)
            .unwrap_or(false)
    });
    tracing::info!(cleared, "Android: activity destroyed");
}
