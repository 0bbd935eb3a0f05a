use web_sys::Event;
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::config::TriggerSettings;
use crate::scroll::threshold::Threshold;

pub const MOBILE_MAX_WIDTH: f64 = 768.0;
pub const TABLET_MAX_WIDTH: f64 = 1024.0;

/// Mobile entrances run this fraction of their desktop duration and stagger.
pub const MOBILE_PACE: f64 = 0.75;

/// Coarse device classification every animation consumer branches on.
///
/// The default value is what a non-browser environment reports: desktop,
/// not iOS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceClass {
    pub is_mobile: bool,
    pub is_tablet: bool,
    pub is_ios: bool,
}

impl DeviceClass {
    pub fn classify(width: f64, user_agent: &str, platform: &str, max_touch_points: i32) -> Self {
        let is_ios = ["iPad", "iPhone", "iPod"]
            .iter()
            .any(|device| user_agent.contains(device))
            // iPadOS reports itself as a touch-capable Mac
            || (platform == "MacIntel" && max_touch_points > 1);

        Self {
            is_mobile: width < MOBILE_MAX_WIDTH,
            is_tablet: (MOBILE_MAX_WIDTH..TABLET_MAX_WIDTH).contains(&width),
            is_ios,
        }
    }

    pub fn detect() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let Some(width) = window.inner_width().ok().and_then(|width| width.as_f64()) else {
            return Self::default();
        };

        let navigator = window.navigator();
        let user_agent = navigator.user_agent().unwrap_or_default();
        let platform = navigator.platform().unwrap_or_default();
        Self::classify(width, &user_agent, &platform, navigator.max_touch_points())
    }

    /// Multiplier for entrance durations and staggers.
    pub fn pace(&self) -> f64 {
        if self.is_mobile {
            MOBILE_PACE
        } else {
            1.0
        }
    }

    /// Picks the value for this device's tier.
    pub fn pick<T>(&self, mobile: T, tablet: T, desktop: T) -> T {
        if self.is_mobile {
            mobile
        } else if self.is_tablet {
            tablet
        } else {
            desktop
        }
    }
}

/// A section-specific value with its own mobile variant. Tablets use the
/// desktop value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adaptive<T> {
    pub desktop: T,
    pub mobile: T,
}

impl<T: Copy> Adaptive<T> {
    pub const fn new(desktop: T, mobile: T) -> Self {
        Self { desktop, mobile }
    }

    pub fn get(&self, device: DeviceClass) -> T {
        if device.is_mobile {
            self.mobile
        } else {
            self.desktop
        }
    }
}

/// Device-dependent entrance parameters. Mobile values are never larger
/// than desktop ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionProfile {
    /// Vertical distance (px) content travels while fading in.
    pub y_offset: f64,
    /// Seconds.
    pub duration: f64,
    /// Seconds between consecutive staggered targets.
    pub stagger: f64,
    pub start: Threshold,
}

impl MotionProfile {
    pub fn for_device(device: DeviceClass, triggers: &TriggerSettings) -> Self {
        if device.is_mobile {
            Self {
                y_offset: 15.0,
                duration: 0.5,
                stagger: 0.03,
                start: triggers.mobile_start,
            }
        } else {
            Self {
                y_offset: 20.0,
                duration: 0.7,
                stagger: 0.05,
                start: triggers.desktop_start,
            }
        }
    }

    /// Mount-time banner reveal, which travels further than scroll entrances.
    pub fn hero(device: DeviceClass) -> Self {
        if device.is_mobile {
            Self {
                y_offset: 30.0,
                duration: 0.8,
                stagger: 0.03,
                start: Threshold::top(1.0),
            }
        } else {
            Self {
                y_offset: 50.0,
                duration: 1.0,
                stagger: 0.05,
                start: Threshold::top(1.0),
            }
        }
    }
}

/// Current device class, re-derived whenever the window is resized.
#[hook]
pub fn use_device_class() -> DeviceClass {
    let device = use_state_eq(DeviceClass::detect);

    {
        let device = device.clone();
        use_event_with_window("resize", move |_: Event| {
            device.set(DeviceClass::detect());
        });
    }

    *device
}
