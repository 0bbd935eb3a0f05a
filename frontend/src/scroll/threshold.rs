use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::SiteError;

/// Which edge of the trigger element is compared against the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
}

impl Edge {
    fn fraction(self) -> f64 {
        match self {
            Edge::Top => 0.0,
            Edge::Center => 0.5,
            Edge::Bottom => 1.0,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            Edge::Top => "top",
            Edge::Center => "center",
            Edge::Bottom => "bottom",
        }
    }
}

/// Vertical span of an element in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn height(&self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }
}

/// A point where an element edge meets a line across the viewport, written
/// the same way in config files: `"top 85%"`, `"bottom center"`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Threshold {
    pub edge: Edge,
    /// Fraction of the viewport height measured from its top.
    pub viewport: f64,
}

impl Threshold {
    pub const DESKTOP_ENTRANCE: Threshold = Threshold::new(Edge::Top, 0.85);
    pub const MOBILE_ENTRANCE: Threshold = Threshold::new(Edge::Top, 0.9);

    pub const fn new(edge: Edge, viewport: f64) -> Self {
        Self { edge, viewport }
    }

    pub const fn top(viewport: f64) -> Self {
        Self::new(Edge::Top, viewport)
    }

    /// Scroll offset at which an element spanning `bounds` crosses this threshold.
    pub fn scroll_offset(&self, bounds: Bounds, viewport_height: f64) -> f64 {
        bounds.top + bounds.height() * self.edge.fraction() - viewport_height * self.viewport
    }
}

impl FromStr for Threshold {
    type Err = SiteError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| SiteError::Threshold {
            input: input.to_string(),
            reason,
        };

        let mut parts = input.split_whitespace();
        let edge = match parts.next() {
            Some("top") => Edge::Top,
            Some("center") => Edge::Center,
            Some("bottom") => Edge::Bottom,
            Some(_) => return Err(invalid("element edge must be top, center or bottom")),
            None => return Err(invalid("empty threshold")),
        };

        let viewport = match parts.next() {
            Some("top") => 0.0,
            Some("center") => 0.5,
            Some("bottom") => 1.0,
            Some(value) => {
                let percent = value
                    .strip_suffix('%')
                    .ok_or_else(|| invalid("viewport position must be a keyword or percentage"))?;
                let percent: f64 = percent
                    .parse()
                    .map_err(|_| invalid("viewport percentage is not a number"))?;
                if !(0.0..=100.0).contains(&percent) {
                    return Err(invalid("viewport percentage must be within 0%..100%"));
                }
                percent / 100.0
            }
            None => return Err(invalid("missing viewport position")),
        };

        if parts.next().is_some() {
            return Err(invalid("unexpected trailing input"));
        }

        Ok(Threshold::new(edge, viewport))
    }
}

impl TryFrom<String> for Threshold {
    type Error = SiteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}%", self.edge.keyword(), self.viewport * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_percentages_and_keywords() {
        assert_eq!("top 85%".parse::<Threshold>().unwrap(), Threshold::top(0.85));
        assert_eq!(
            "bottom 20%".parse::<Threshold>().unwrap(),
            Threshold::new(Edge::Bottom, 0.2)
        );
        assert_eq!(
            "top center".parse::<Threshold>().unwrap(),
            Threshold::new(Edge::Top, 0.5)
        );
        assert_eq!(
            "  center   bottom ".parse::<Threshold>().unwrap(),
            Threshold::new(Edge::Center, 1.0)
        );
    }

    #[test]
    fn rejects_malformed_thresholds() {
        for input in ["", "top", "left 10%", "top 85", "top abc%", "top 120%", "top 10% extra"] {
            assert!(input.parse::<Threshold>().is_err(), "{input:?} should not parse");
        }
    }

    #[test]
    fn scroll_offset_for_top_edge() {
        let bounds = Bounds { top: 2000.0, bottom: 2400.0 };
        // element top meets 85% of an 800px viewport
        let offset = Threshold::top(0.85).scroll_offset(bounds, 800.0);
        assert!((offset - (2000.0 - 680.0)).abs() < 1e-9);
    }

    #[test]
    fn scroll_offset_for_bottom_edge() {
        let bounds = Bounds { top: 1000.0, bottom: 1500.0 };
        let offset = Threshold::new(Edge::Bottom, 0.2).scroll_offset(bounds, 1000.0);
        assert!((offset - 1300.0).abs() < 1e-9);
    }

    #[test]
    fn display_round_trips_through_parse() {
        let threshold = Threshold::MOBILE_ENTRANCE;
        assert_eq!(threshold.to_string(), "top 90%");
        assert_eq!(threshold.to_string().parse::<Threshold>().unwrap(), threshold);
    }
}
