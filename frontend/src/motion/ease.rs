use std::f64::consts::PI;

/// Number of samples used when a curve has no cubic-bezier equivalent.
const CSS_SAMPLES: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    Linear,
    Power2Out,
    Power3Out,
    Power2InOut,
    SineInOut,
    /// Overshoot amount; 1.7 is the usual "back" feel.
    BackOut(f64),
    ElasticOut { amplitude: f64, period: f64 },
}

impl Ease {
    pub const BACK_OUT: Ease = Ease::BackOut(1.7);

    /// Progress of the eased value at time `t` in `0.0..=1.0`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match self {
            Ease::Linear => t,
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power3Out => 1.0 - (1.0 - t).powi(4),
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t.powi(3)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Ease::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Ease::BackOut(overshoot) => {
                let u = t - 1.0;
                1.0 + (overshoot + 1.0) * u.powi(3) + overshoot * u.powi(2)
            }
            Ease::ElasticOut { amplitude, period } => {
                let amplitude = amplitude.max(1.0);
                let phase = period / (2.0 * PI) * (1.0 / amplitude).asin();
                amplitude * 2f64.powf(-10.0 * t) * ((t - phase) * 2.0 * PI / period).sin() + 1.0
            }
        }
    }

    /// CSS timing function for Web Animations playback.
    pub fn css(self) -> String {
        match self {
            Ease::Linear => "linear".to_string(),
            Ease::Power2Out => "cubic-bezier(0.215, 0.61, 0.355, 1)".to_string(),
            Ease::Power3Out => "cubic-bezier(0.165, 0.84, 0.44, 1)".to_string(),
            Ease::Power2InOut => "cubic-bezier(0.645, 0.045, 0.355, 1)".to_string(),
            Ease::SineInOut => "cubic-bezier(0.445, 0.05, 0.55, 0.95)".to_string(),
            Ease::BackOut(_) | Ease::ElasticOut { .. } => self.sampled_css(),
        }
    }

    fn sampled_css(self) -> String {
        let points: Vec<String> = (0..=CSS_SAMPLES)
            .map(|i| {
                let value = self.apply(i as f64 / CSS_SAMPLES as f64);
                format!("{:.4}", value)
            })
            .collect();
        format!("linear({})", points.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 7] = [
        Ease::Linear,
        Ease::Power2Out,
        Ease::Power3Out,
        Ease::Power2InOut,
        Ease::SineInOut,
        Ease::BACK_OUT,
        Ease::ElasticOut {
            amplitude: 1.0,
            period: 0.5,
        },
    ];

    #[test]
    fn curves_start_at_zero_and_end_at_one() {
        for ease in ALL {
            assert_eq!(ease.apply(0.0), 0.0, "{:?}", ease);
            assert_eq!(ease.apply(1.0), 1.0, "{:?}", ease);
            assert_eq!(ease.apply(-3.0), 0.0, "{:?}", ease);
            assert_eq!(ease.apply(7.0), 1.0, "{:?}", ease);
        }
    }

    #[test]
    fn out_curves_lead_linear() {
        for ease in [Ease::Power2Out, Ease::Power3Out, Ease::BACK_OUT] {
            assert!(ease.apply(0.3) > 0.3, "{:?}", ease);
        }
        assert!(Ease::Power3Out.apply(0.3) > Ease::Power2Out.apply(0.3));
    }

    #[test]
    fn back_and_elastic_overshoot() {
        let peak = |ease: Ease| (1..100).map(|i| ease.apply(i as f64 / 100.0)).fold(0.0, f64::max);
        assert!(peak(Ease::BACK_OUT) > 1.0);
        assert!(peak(Ease::ElasticOut {
            amplitude: 1.0,
            period: 0.5
        }) > 1.0);
        assert!(peak(Ease::Power2Out) <= 1.0);
    }

    #[test]
    fn in_out_is_symmetric() {
        for ease in [Ease::Power2InOut, Ease::SineInOut] {
            assert!((ease.apply(0.5) - 0.5).abs() < 1e-12);
            assert!((ease.apply(0.2) + ease.apply(0.8) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn css_uses_bezier_or_sampled_linear() {
        assert!(Ease::Power2Out.css().starts_with("cubic-bezier("));
        let sampled = Ease::BACK_OUT.css();
        assert!(sampled.starts_with("linear(0.0000, "));
        assert!(sampled.ends_with(", 1.0000)"));
        assert_eq!(sampled.matches(',').count(), CSS_SAMPLES);
    }
}
