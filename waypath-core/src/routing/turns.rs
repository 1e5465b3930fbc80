//! Geometric turn classification
//!
//! A local 3-point classifier: it compares the headings of two consecutive
//! segments and buckets the difference into continue / slight / full turns.
//! It knows nothing about road names.

use geo::Point;
use serde::{Deserialize, Serialize};

/// Turns with an absolute angle up to this many degrees are straight
/// continuations (exactly 15 degrees is still a continue)
const CONTINUE_MAX_DEG: f64 = 15.0;

/// Turns with an absolute angle above this many degrees are full turns
/// (exactly 45 degrees is still a slight turn)
const SLIGHT_MAX_DEG: f64 = 45.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManeuverType {
    Depart,
    Arrive,
    Turn,
    Continue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnDirection {
    #[serde(rename = "left")]
    Left,
    #[serde(rename = "right")]
    Right,
    #[serde(rename = "slight left")]
    SlightLeft,
    #[serde(rename = "slight right")]
    SlightRight,
}

/// A classified maneuver as carried by a route step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maneuver {
    #[serde(rename = "type")]
    pub kind: ManeuverType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<TurnDirection>,
}

impl Maneuver {
    #[must_use]
    pub const fn depart() -> Self {
        Self {
            kind: ManeuverType::Depart,
            modifier: None,
        }
    }

    #[must_use]
    pub const fn arrive() -> Self {
        Self {
            kind: ManeuverType::Arrive,
            modifier: None,
        }
    }

    #[must_use]
    pub const fn straight() -> Self {
        Self {
            kind: ManeuverType::Continue,
            modifier: None,
        }
    }

    #[must_use]
    pub const fn turn(direction: TurnDirection) -> Self {
        Self {
            kind: ManeuverType::Turn,
            modifier: Some(direction),
        }
    }

    #[must_use]
    pub fn is_continue(&self) -> bool {
        self.kind == ManeuverType::Continue
    }

    /// Human-readable instruction for this maneuver
    #[must_use]
    pub fn instruction(&self) -> &'static str {
        match (self.kind, self.modifier) {
            (ManeuverType::Depart, _) => "Start walking",
            (ManeuverType::Arrive, _) => "Arrive at your destination",
            (ManeuverType::Turn, Some(TurnDirection::Left)) => "Turn left",
            (ManeuverType::Turn, Some(TurnDirection::Right)) => "Turn right",
            (ManeuverType::Turn, Some(TurnDirection::SlightLeft)) => "Bear left",
            (ManeuverType::Turn, Some(TurnDirection::SlightRight)) => "Bear right",
            (ManeuverType::Turn, None) => "Continue",
            (ManeuverType::Continue, _) => "Continue straight",
        }
    }
}

/// Classifies the turn at `current` between the segments (prev, current)
/// and (current, next).
///
/// Positive turn angles are right-hand turns, negative left-hand. The angle
/// is the heading difference normalized into (-180, 180].
#[must_use]
pub fn classify_turn(prev: Point<f64>, current: Point<f64>, next: Point<f64>) -> Maneuver {
    let approach = segment_angle(prev, current);
    let departure = segment_angle(current, next);
    classify_angle(normalize_turn_angle(departure - approach))
}

/// Heading of a segment in degrees: 0 points north, positive rotates
/// clockwise (east)
fn segment_angle(from: Point<f64>, to: Point<f64>) -> f64 {
    let d_lat = to.y() - from.y();
    let d_lng = to.x() - from.x();
    d_lng.atan2(d_lat).to_degrees()
}

fn normalize_turn_angle(mut angle: f64) -> f64 {
    while angle > 180.0 {
        angle -= 360.0;
    }
    while angle <= -180.0 {
        angle += 360.0;
    }
    angle
}

pub(crate) fn classify_angle(angle: f64) -> Maneuver {
    if angle.abs() <= CONTINUE_MAX_DEG {
        return Maneuver::straight();
    }
    if angle > SLIGHT_MAX_DEG {
        return Maneuver::turn(TurnDirection::Right);
    }
    if angle < -SLIGHT_MAX_DEG {
        return Maneuver::turn(TurnDirection::Left);
    }
    if angle > 0.0 {
        Maneuver::turn(TurnDirection::SlightRight)
    } else {
        Maneuver::turn(TurnDirection::SlightLeft)
    }
}
