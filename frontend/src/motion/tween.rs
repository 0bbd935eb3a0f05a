use serde::Serialize;

use crate::error::Result;
use crate::motion::ease::Ease;

/// Visual state of an element along an entrance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub opacity: f64,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub scale_y: f64,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            scale_y: 1.0,
        }
    }
}

impl Pose {
    pub fn hidden() -> Self {
        Self {
            opacity: 0.0,
            ..Self::default()
        }
    }

    pub fn shifted_x(self, x: f64) -> Self {
        Self { x, ..self }
    }

    pub fn shifted_y(self, y: f64) -> Self {
        Self { y, ..self }
    }

    pub fn scaled(self, scale: f64) -> Self {
        Self { scale, ..self }
    }

    pub fn scaled_y(self, scale_y: f64) -> Self {
        Self { scale_y, ..self }
    }

    pub fn transform(&self) -> String {
        format!(
            "translate3d({}px, {}px, 0px) scale({}, {})",
            self.x,
            self.y,
            self.scale,
            self.scale * self.scale_y
        )
    }
}

/// One Web Animations keyframe; unset properties are left to the stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_position: Option<String>,
}

impl From<Pose> for Keyframe {
    fn from(pose: Pose) -> Self {
        Self {
            opacity: Some(pose.opacity),
            transform: Some(pose.transform()),
            background_position: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Repeat {
    Once,
    /// Runs forever, alternating direction when `yoyo` is set.
    Forever { yoyo: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub enum TimingValue {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub from: Keyframe,
    pub to: Keyframe,
    /// Seconds.
    pub duration: f64,
    /// Seconds.
    pub delay: f64,
    pub ease: Ease,
    pub repeat: Repeat,
}

impl Tween {
    /// Plays from `from` into the element's natural state.
    pub fn entrance(from: Pose, duration: f64, ease: Ease) -> Self {
        Self::between(from, Pose::default(), duration, ease)
    }

    pub fn between(from: Pose, to: Pose, duration: f64, ease: Ease) -> Self {
        Self::keyframes(from.into(), to.into(), duration, ease)
    }

    pub fn keyframes(from: Keyframe, to: Keyframe, duration: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration,
            delay: 0.0,
            ease,
            repeat: Repeat::Once,
        }
    }

    pub fn delayed(self, delay: f64) -> Self {
        Self { delay, ..self }
    }

    pub fn forever(self, yoyo: bool) -> Self {
        Self {
            repeat: Repeat::Forever { yoyo },
            ..self
        }
    }

    /// Web Animations timing options, durations in milliseconds.
    pub fn timing(&self) -> Vec<(&'static str, TimingValue)> {
        let mut timing = vec![
            ("duration", TimingValue::Number(self.duration * 1000.0)),
            ("delay", TimingValue::Number(self.delay * 1000.0)),
            ("easing", TimingValue::Text(self.ease.css())),
        ];
        match self.repeat {
            Repeat::Once => timing.push(("fill", TimingValue::Text("both".to_string()))),
            Repeat::Forever { yoyo } => {
                timing.push(("iterations", TimingValue::Number(f64::INFINITY)));
                if yoyo {
                    timing.push(("direction", TimingValue::Text("alternate".to_string())));
                }
            }
        }
        timing
    }

    pub fn keyframes_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&[&self.from, &self.to])?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_pose_transform() {
        assert_eq!(
            Pose::default().transform(),
            "translate3d(0px, 0px, 0px) scale(1, 1)"
        );
    }

    #[test]
    fn scale_y_multiplies_uniform_scale() {
        let pose = Pose::default().scaled(0.5).scaled_y(0.0);
        assert_eq!(pose.transform(), "translate3d(0px, 0px, 0px) scale(0.5, 0)");
    }

    #[test]
    fn keyframes_skip_unset_properties() {
        let tween = Tween::keyframes(
            Keyframe {
                background_position: Some("center".into()),
                ..Keyframe::default()
            },
            Keyframe {
                background_position: Some("center 40%".into()),
                ..Keyframe::default()
            },
            6.0,
            Ease::SineInOut,
        );
        assert_eq!(
            tween.keyframes_json().unwrap(),
            r#"[{"backgroundPosition":"center"},{"backgroundPosition":"center 40%"}]"#
        );
    }

    #[test]
    fn entrance_ends_at_rest() {
        let tween = Tween::entrance(Pose::hidden().shifted_y(50.0), 0.8, Ease::BACK_OUT).delayed(0.5);
        assert_eq!(tween.to, Keyframe::from(Pose::default()));
        assert_eq!(tween.from.opacity, Some(0.0));
        assert_eq!(tween.delay, 0.5);
    }

    #[test]
    fn one_shot_timing_holds_both_ends() {
        let tween = Tween::entrance(Pose::hidden(), 0.8, Ease::Linear).delayed(0.25);
        assert_eq!(
            tween.timing(),
            vec![
                ("duration", TimingValue::Number(800.0)),
                ("delay", TimingValue::Number(250.0)),
                ("easing", TimingValue::Text("linear".to_string())),
                ("fill", TimingValue::Text("both".to_string())),
            ]
        );
    }

    #[test]
    fn looping_timing_alternates_only_with_yoyo() {
        let pulse = Tween::entrance(Pose::hidden(), 1.5, Ease::SineInOut).forever(true);
        let timing = pulse.timing();
        assert!(timing.contains(&("iterations", TimingValue::Number(f64::INFINITY))));
        assert!(timing.contains(&("direction", TimingValue::Text("alternate".to_string()))));
        assert!(!timing.iter().any(|(key, _)| *key == "fill"));

        let pan = Tween::entrance(Pose::hidden(), 6.0, Ease::SineInOut).forever(false);
        assert!(!pan.timing().iter().any(|(key, _)| *key == "direction"));
    }
}
