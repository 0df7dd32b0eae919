/*

`genesis-display` is free software: you can redistribute it and/or modify it under the terms of one
of the following licenses:

* GNU Lesser General Public License as published by the Free Software Foundation, either
  version 3 of the License, or (at your option) any later version.
* Mozilla Public License as published by the Mozilla Foundation, version 2.

`genesis-display` is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
GNU Lesser General Public License and the Mozilla Public License for more details.

You should have received a copy of the GNU Lesser General Public License and the Mozilla
Public License along with `genesis-display`. If not, see <https://www.gnu.org/licenses/>.

*/

//! Android-specific platform code.
//!
//! There are two ways to use this crate on Android:
//!
//! - From a `NativeActivity`: call [`run`] from `android_main`. It drives the lifecycle through
//!   `android-activity` and queries the window through JNI with a [`JniHost`].
//! - From a Java activity that measures the display itself and calls
//!   `nativeOnDisplayInfoReady`: listen on [`java_display_ready`].

use jni::objects::{GlobalRef, JObject, JValue};
use jni::sys::jint;
use jni::{JNIEnv, JavaVM};
use once_cell::sync::Lazy;

#[doc(inline)]
pub use winit::platform::android::activity;

use activity::{AndroidApp, MainEvent, PollEvent};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fullscreen::{BarsBehavior, CutoutMode, SystemUiFlags};
use crate::geometry::{DisplayInfo, DisplaySize, SafeInsets};
use crate::handler::Handler;
use crate::host::{ApiLevel, Component, DisplayHost};
use crate::logging;
use crate::native;
use crate::shell::{Lifecycle, Shell};

/// Number of local references a single host operation may create.
const LOCAL_FRAME_CAPACITY: i32 = 16;

/// A [`DisplayHost`] that calls into the activity's Java objects.
pub struct JniHost {
    vm: JavaVM,
    activity: GlobalRef,
    api_level: ApiLevel,
}

impl JniHost {
    /// Attach to the app's VM and hold on to its activity.
    pub fn from_app(app: &AndroidApp) -> Result<Self> {
        // SAFETY: android-activity hands out the process's JavaVM pointer.
        let vm = unsafe { JavaVM::from_raw(app.vm_as_ptr() as *mut jni::sys::JavaVM) }?;

        let (activity, api_level) = {
            let mut env = vm.attach_current_thread()?;

            // SAFETY: the activity pointer is a valid jobject for as long as the app runs.
            let activity = unsafe { JObject::from_raw(app.activity_as_ptr() as jni::sys::jobject) };
            let activity = env.new_global_ref(activity)?;
            let sdk_int = env
                .get_static_field("android/os/Build$VERSION", "SDK_INT", "I")?
                .i()?;

            (activity, ApiLevel(sdk_int))
        };

        Ok(Self {
            vm,
            activity,
            api_level,
        })
    }

    /// `System.loadLibrary` each library in turn.
    ///
    /// Failures are logged and skipped. Returns how many libraries loaded.
    pub fn load_libraries<S: AsRef<str>>(&self, names: &[S]) -> usize {
        names
            .iter()
            .map(AsRef::<str>::as_ref)
            .filter(|name| {
                let loaded = self.with_env(|env, _| {
                    let name = env.new_string(*name)?;
                    env.call_static_method(
                        "java/lang/System",
                        "loadLibrary",
                        "(Ljava/lang/String;)V",
                        &[JValue::Object(&name)],
                    )?;
                    Ok(())
                });

                match loaded {
                    Ok(()) => {
                        log::debug!("Loaded library {}", name);
                        true
                    }
                    Err(err) => {
                        log::error!("Failed to load library {}: {}", name, err);
                        false
                    }
                }
            })
            .count()
    }

    /// Run `f` on an attached thread inside its own local reference frame.
    ///
    /// A Java exception left behind by `f` is cleared before returning.
    fn with_env<T>(
        &self,
        f: impl FnOnce(&mut JNIEnv<'_>, &JObject<'_>) -> Result<T>,
    ) -> Result<T> {
        let mut env = self.vm.attach_current_thread()?;
        let activity = self.activity.as_obj();

        let result = env.with_local_frame(LOCAL_FRAME_CAPACITY, |env| f(env, activity));

        if env.exception_check().unwrap_or(false) {
            env.exception_describe().ok();
            env.exception_clear().ok();
        }

        result
    }

    fn display_size_via(&self, method: &'static str) -> Result<DisplaySize> {
        self.with_env(|env, activity| {
            let window_manager = window_manager(env, activity)?;
            let display = env
                .call_method(
                    &window_manager,
                    "getDefaultDisplay",
                    "()Landroid/view/Display;",
                    &[],
                )?
                .l()?;
            if display.is_null() {
                return Err(Error::SizeQuery("no default display".into()));
            }

            let point = env.new_object("android/graphics/Point", "()V", &[])?;
            env.call_method(
                &display,
                method,
                "(Landroid/graphics/Point;)V",
                &[JValue::Object(&point)],
            )
            .map_err(|err| Error::SizeQuery(format!("Display.{}: {}", method, err)))?;

            let width = env.get_field(&point, "x", "I")?.i()?;
            let height = env.get_field(&point, "y", "I")?.i()?;
            Ok(DisplaySize::new(width, height))
        })
    }

    fn require(&self, feature: &'static str, required: ApiLevel) -> Result<()> {
        if self.api_level >= required {
            Ok(())
        } else {
            Err(Error::Unsupported {
                feature,
                required,
                actual: self.api_level,
            })
        }
    }
}

impl DisplayHost for JniHost {
    fn api_level(&self) -> ApiLevel {
        self.api_level
    }

    fn has_window_manager(&self) -> bool {
        match self.with_env(|env, activity| window_manager(env, activity).map(drop)) {
            Ok(()) => true,
            Err(Error::Unavailable(_)) => false,
            Err(err) => {
                log::debug!("Window manager lookup failed: {}", err);
                false
            }
        }
    }

    fn real_display_size(&self) -> Result<DisplaySize> {
        self.display_size_via("getRealSize")
    }

    fn display_size(&self) -> Result<DisplaySize> {
        self.display_size_via("getSize")
    }

    fn cutout_insets(&self) -> Result<SafeInsets> {
        self.with_env(|env, activity| {
            let window = object(env, activity, "getWindow", "()Landroid/view/Window;", Component::Window)?;
            let decor_view =
                object(env, &window, "getDecorView", "()Landroid/view/View;", Component::DecorView)?;
            let insets = object(
                env,
                &decor_view,
                "getRootWindowInsets",
                "()Landroid/view/WindowInsets;",
                Component::WindowInsets,
            )?;

            if !self.api_level.has_display_cutout() {
                return Err(Error::Unavailable(Component::DisplayCutout));
            }

            let cutout = object(
                env,
                &insets,
                "getDisplayCutout",
                "()Landroid/view/DisplayCutout;",
                Component::DisplayCutout,
            )?;

            let mut edge = |method: &str| -> Result<i32> {
                Ok(env.call_method(&cutout, method, "()I", &[])?.i()?)
            };

            Ok(SafeInsets::new(
                edge("getSafeInsetLeft")?,
                edge("getSafeInsetTop")?,
                edge("getSafeInsetRight")?,
                edge("getSafeInsetBottom")?,
            ))
        })
    }

    fn set_cutout_mode(&self, mode: CutoutMode) -> Result<()> {
        self.with_env(|env, activity| {
            let window = object(env, activity, "getWindow", "()Landroid/view/Window;", Component::Window)?;
            self.require("display cutout mode", ApiLevel::P)?;

            let attributes = object(
                env,
                &window,
                "getAttributes",
                "()Landroid/view/WindowManager$LayoutParams;",
                Component::Window,
            )?;
            env.set_field(
                &attributes,
                "layoutInDisplayCutoutMode",
                "I",
                JValue::Int(mode.as_raw()),
            )?;
            env.call_method(
                &window,
                "setAttributes",
                "(Landroid/view/WindowManager$LayoutParams;)V",
                &[JValue::Object(&attributes)],
            )?;
            Ok(())
        })
    }

    fn hide_system_bars(&self, behavior: BarsBehavior) -> Result<()> {
        self.require("WindowInsetsController", ApiLevel::R)?;

        self.with_env(|env, activity| {
            let window = object(env, activity, "getWindow", "()Landroid/view/Window;", Component::Window)?;
            let controller = object(
                env,
                &window,
                "getInsetsController",
                "()Landroid/view/WindowInsetsController;",
                Component::InsetsController,
            )?;

            let system_bars = env
                .call_static_method("android/view/WindowInsets$Type", "systemBars", "()I", &[])?
                .i()?;
            env.call_method(&controller, "hide", "(I)V", &[JValue::Int(system_bars)])?;
            env.call_method(
                &controller,
                "setSystemBarsBehavior",
                "(I)V",
                &[JValue::Int(behavior.as_raw())],
            )?;
            Ok(())
        })
    }

    fn set_system_ui_visibility(&self, flags: SystemUiFlags) -> Result<()> {
        self.with_env(|env, activity| {
            let window = object(env, activity, "getWindow", "()Landroid/view/Window;", Component::Window)?;
            let decor_view =
                object(env, &window, "getDecorView", "()Landroid/view/View;", Component::DecorView)?;
            env.call_method(
                &decor_view,
                "setSystemUiVisibility",
                "(I)V",
                &[JValue::Int(flags.bits())],
            )?;
            Ok(())
        })
    }
}

/// Call a no-argument method returning an object, treating `null` as `component` being missing.
fn object<'local>(
    env: &mut JNIEnv<'local>,
    target: &JObject<'_>,
    method: &str,
    sig: &str,
    component: Component,
) -> Result<JObject<'local>> {
    let value = env.call_method(target, method, sig, &[])?.l()?;
    if value.is_null() {
        Err(Error::Unavailable(component))
    } else {
        Ok(value)
    }
}

/// `activity.getSystemService(Context.WINDOW_SERVICE)`.
fn window_manager<'local>(
    env: &mut JNIEnv<'local>,
    activity: &JObject<'_>,
) -> Result<JObject<'local>> {
    let name = env.new_string("window")?;
    let service = env
        .call_method(
            activity,
            "getSystemService",
            "(Ljava/lang/String;)Ljava/lang/Object;",
            &[JValue::Object(&name)],
        )?
        .l()?;

    if service.is_null() {
        Err(Error::Unavailable(Component::WindowManager))
    } else {
        Ok(service)
    }
}

/// The lifecycle event, if any, that a main-thread event corresponds to.
pub fn lifecycle_of(event: &MainEvent<'_>) -> Option<Lifecycle> {
    match event {
        MainEvent::InitWindow { .. } => Some(Lifecycle::WindowCreated),
        MainEvent::WindowResized { .. } => Some(Lifecycle::WindowResized),
        MainEvent::ConfigChanged { .. } => Some(Lifecycle::ConfigChanged),
        MainEvent::InsetsChanged { .. } => Some(Lifecycle::InsetsChanged),
        MainEvent::GainedFocus => Some(Lifecycle::FocusGained),
        MainEvent::Destroy => Some(Lifecycle::Destroyed),
        _ => None,
    }
}

/// Drive a [`Shell`] from the `android-activity` lifecycle until the activity is destroyed.
///
/// Every report is forwarded to the callback registered with
/// [`genesis_display_set_callback`](crate::native::genesis_display_set_callback). `setup` runs
/// before the first event and is the place to connect further listeners.
pub fn run(app: AndroidApp, config: Config, setup: impl FnOnce(&Shell<JniHost>)) -> Result<()> {
    logging::init(&config.log);

    let host = JniHost::from_app(&app)?;
    let loaded = host.load_libraries(&config.libraries);
    log::debug!("Loaded {} of {} libraries", loaded, config.libraries.len());

    let shell = Shell::new(host, config);
    shell.display_ready().connect(|info| {
        native::forward_to_registered(info);
    });
    setup(&shell);

    let mut running = true;
    while running {
        app.poll_events(None, |event| {
            if let PollEvent::Main(event) = event {
                if let Some(lifecycle) = lifecycle_of(&event) {
                    shell.handle(lifecycle);
                    running &= lifecycle != Lifecycle::Destroyed;
                }
            }
        });
    }

    Ok(())
}

static JAVA_DISPLAY_READY: Lazy<Handler<DisplayInfo>> = Lazy::new(Handler::new);

/// Reports delivered by a Java activity through `nativeOnDisplayInfoReady`.
pub fn java_display_ready() -> &'static Handler<DisplayInfo> {
    &JAVA_DISPLAY_READY
}

/// `sh.mki.genesis.MainActivity.nativeOnDisplayInfoReady(int, int, int, int, int, int)`.
#[no_mangle]
pub extern "system" fn Java_sh_mki_genesis_MainActivity_nativeOnDisplayInfoReady(
    _env: JNIEnv<'_>,
    _this: JObject<'_>,
    display_width: jint,
    display_height: jint,
    usable_width: jint,
    usable_height: jint,
    usable_x_offset: jint,
    usable_y_offset: jint,
) {
    let info = DisplayInfo::from_raw([
        display_width,
        display_height,
        usable_width,
        usable_height,
        usable_x_offset,
        usable_y_offset,
    ]);

    log::debug!("Display info from Java: {}", info);
    let listeners = JAVA_DISPLAY_READY.run_with(&info);
    if listeners == 0 {
        native::forward_to_registered(&info);
    }
}
