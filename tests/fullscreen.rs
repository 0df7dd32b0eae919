mod common;

use std::sync::{Arc, Mutex};

use common::MockHost;
use genesis_display::config::Config;
use genesis_display::fullscreen::{BarsBehavior, FullscreenStrategy, SystemUiFlags};
use genesis_display::host::Component;
use genesis_display::{Lifecycle, Shell};

#[test]
fn modern_host_hides_bars_through_the_controller() {
    let shell = Shell::new(MockHost::new(2400, 1080), Config::default());

    assert!(shell.configure_fullscreen());
    assert_eq!(
        shell.host().calls(),
        [
            "set_cutout_mode(ShortEdges)",
            "hide_system_bars(TransientBySwipe)"
        ]
    );
}

#[test]
fn missing_controller_is_a_no_op() {
    let shell = Shell::new(
        MockHost::new(2400, 1080).missing(Component::InsetsController),
        Config::default(),
    );
    let configured = Arc::new(Mutex::new(Vec::new()));
    let sink = configured.clone();
    shell
        .fullscreen_configured()
        .connect(move |strategy| sink.lock().unwrap().push(*strategy));

    assert!(!shell.configure_fullscreen());
    assert!(!shell.host().called("hide_system_bars"));
    assert!(configured.lock().unwrap().is_empty());
}

#[test]
fn legacy_host_sets_visibility_flags() {
    let shell = Shell::new(MockHost::new(1920, 1080).api_level(29), Config::default());

    assert_eq!(
        shell.strategy(),
        FullscreenStrategy::LegacyFlags(SystemUiFlags::IMMERSIVE_FULLSCREEN)
    );
    assert!(shell.configure_fullscreen());
    assert!(shell.host().called("set_system_ui_visibility(0x1006)"));
    assert!(!shell.host().called("hide_system_bars"));
}

#[test]
fn pre_cutout_host_skips_cutout_mode() {
    let shell = Shell::new(MockHost::new(1280, 720).api_level(26), Config::default());

    assert!(shell.configure_fullscreen());
    assert_eq!(shell.host().calls(), ["set_system_ui_visibility(0x1006)"]);
}

#[test]
fn missing_window_changes_nothing() {
    let shell = Shell::new(
        MockHost::new(1280, 720).missing(Component::Window),
        Config::default(),
    );

    assert!(!shell.configure_fullscreen());
    assert!(shell.host().calls().is_empty());
}

#[test]
fn strategy_is_selected_once() {
    let shell = Shell::new(MockHost::new(2400, 1080), Config::default());

    for _ in 0..3 {
        shell.configure_fullscreen();
    }

    assert_eq!(shell.host().api_level_queries.get(), 1);
}

#[test]
fn configured_handler_sees_the_strategy() {
    let shell = Shell::new(MockHost::new(2400, 1080), Config::default());
    let next = shell.fullscreen_configured().wait_once();

    shell.configure_fullscreen();

    assert_eq!(
        futures_lite::future::block_on(next),
        Some(FullscreenStrategy::InsetsController {
            behavior: BarsBehavior::TransientBySwipe
        })
    );
}

#[test]
fn window_created_configures_then_reports() {
    let shell = Shell::new(MockHost::new(2400, 1080), Config::default());

    shell.handle(Lifecycle::WindowCreated);

    let calls = shell.host().calls();
    let hide = calls.iter().position(|c| c.starts_with("hide_system_bars"));
    let report = calls.iter().position(|c| c == "has_window_manager");
    assert!(hide.unwrap() < report.unwrap());
}

#[test]
fn disabled_fullscreen_only_reports() {
    let config = Config::from_toml_str("[fullscreen]\nenabled = false").unwrap();
    let shell = Shell::new(MockHost::new(2400, 1080), config);

    shell.handle(Lifecycle::WindowCreated);
    shell.handle(Lifecycle::FocusGained);

    assert!(!shell.host().called("set_cutout_mode"));
    assert!(!shell.host().called("hide_system_bars"));
    assert!(shell.host().called("has_window_manager"));
}

#[test]
fn lifecycle_triggers_follow_config() {
    let config = Config::from_toml_str(
        r#"
        [report]
        on_window_resized = false
        on_config_changed = true
        on_insets_changed = false
        "#,
    )
    .unwrap();
    let shell = Shell::new(MockHost::new(2400, 1080), config);
    let reports = Arc::new(Mutex::new(0));
    let sink = reports.clone();
    shell.display_ready().connect(move |_| *sink.lock().unwrap() += 1);

    shell.handle(Lifecycle::WindowResized);
    shell.handle(Lifecycle::InsetsChanged);
    assert_eq!(*reports.lock().unwrap(), 0);

    shell.handle(Lifecycle::ConfigChanged);
    assert_eq!(*reports.lock().unwrap(), 1);

    shell.handle(Lifecycle::FocusGained);
    shell.handle(Lifecycle::Destroyed);
    assert_eq!(*reports.lock().unwrap(), 1);
    assert!(shell.host().called("hide_system_bars"));
}
