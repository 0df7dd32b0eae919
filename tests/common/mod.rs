//! An in-memory [`DisplayHost`] that records what was asked of it.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use genesis_display::error::{Error, Result};
use genesis_display::fullscreen::{BarsBehavior, CutoutMode, SystemUiFlags};
use genesis_display::geometry::{DisplaySize, SafeInsets};
use genesis_display::host::{ApiLevel, Component, DisplayHost};

/// What the mock host has available.
pub struct MockHost {
    pub api_level: ApiLevel,
    pub window_manager: bool,
    pub real_size: Option<DisplaySize>,
    pub size: Option<DisplaySize>,
    /// `Err` names the first missing link of the cutout chain.
    pub cutout: std::result::Result<SafeInsets, Component>,
    pub window: bool,
    pub insets_controller: bool,

    pub calls: RefCell<Vec<String>>,
    pub api_level_queries: Cell<usize>,
}

impl MockHost {
    pub fn new(width: i32, height: i32) -> Self {
        let size = DisplaySize::new(width, height);
        Self {
            api_level: ApiLevel(34),
            window_manager: true,
            real_size: Some(size),
            size: Some(size),
            cutout: Err(Component::DisplayCutout),
            window: true,
            insets_controller: true,
            calls: RefCell::new(Vec::new()),
            api_level_queries: Cell::new(0),
        }
    }

    pub fn with_cutout(mut self, insets: SafeInsets) -> Self {
        self.cutout = Ok(insets);
        self
    }

    pub fn missing(mut self, component: Component) -> Self {
        match component {
            Component::WindowManager => self.window_manager = false,
            Component::InsetsController => self.insets_controller = false,
            Component::Window => {
                self.window = false;
                self.cutout = Err(Component::Window);
            }
            other => self.cutout = Err(other),
        }
        self
    }

    pub fn api_level(mut self, level: i32) -> Self {
        self.api_level = ApiLevel(level);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn called(&self, name: &str) -> bool {
        self.calls.borrow().iter().any(|call| call.starts_with(name))
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }
}

impl DisplayHost for MockHost {
    fn api_level(&self) -> ApiLevel {
        self.api_level_queries.set(self.api_level_queries.get() + 1);
        self.api_level
    }

    fn has_window_manager(&self) -> bool {
        self.record("has_window_manager");
        self.window_manager
    }

    fn real_display_size(&self) -> Result<DisplaySize> {
        self.record("real_display_size");
        self.real_size
            .ok_or_else(|| Error::SizeQuery("getRealSize threw".into()))
    }

    fn display_size(&self) -> Result<DisplaySize> {
        self.record("display_size");
        self.size
            .ok_or_else(|| Error::SizeQuery("getSize threw".into()))
    }

    fn cutout_insets(&self) -> Result<SafeInsets> {
        self.record("cutout_insets");
        self.cutout.map_err(Error::Unavailable)
    }

    fn set_cutout_mode(&self, mode: CutoutMode) -> Result<()> {
        if !self.window {
            return Err(Error::Unavailable(Component::Window));
        }
        if !self.api_level.has_display_cutout() {
            return Err(Error::Unsupported {
                feature: "display cutout mode",
                required: ApiLevel::P,
                actual: self.api_level,
            });
        }
        self.record(format!("set_cutout_mode({:?})", mode));
        Ok(())
    }

    fn hide_system_bars(&self, behavior: BarsBehavior) -> Result<()> {
        if !self.insets_controller {
            return Err(Error::Unavailable(Component::InsetsController));
        }
        self.record(format!("hide_system_bars({:?})", behavior));
        Ok(())
    }

    fn set_system_ui_visibility(&self, flags: SystemUiFlags) -> Result<()> {
        if !self.window {
            return Err(Error::Unavailable(Component::DecorView));
        }
        self.record(format!("set_system_ui_visibility({:#x})", flags.bits()));
        Ok(())
    }
}
