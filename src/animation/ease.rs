use std::str::FromStr;

use crate::foundation::error::CineloreError;

/// Easing functions used to map normalized tween progress.
///
/// The power family follows the usual web naming: `power1` is quadratic, `power2` cubic,
/// `power3` quartic and `power4` quintic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ease {
    /// Linear interpolation (`none`).
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Quartic ease-in.
    InQuart,
    /// Quartic ease-out.
    OutQuart,
    /// Quartic ease-in/out.
    InOutQuart,
    /// Quintic ease-in.
    InQuint,
    /// Quintic ease-out.
    OutQuint,
    /// Quintic ease-in/out.
    InOutQuint,
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => ease_in(t, 2),
            Self::OutQuad => ease_out(t, 2),
            Self::InOutQuad => ease_in_out(t, 2),
            Self::InCubic => ease_in(t, 3),
            Self::OutCubic => ease_out(t, 3),
            Self::InOutCubic => ease_in_out(t, 3),
            Self::InQuart => ease_in(t, 4),
            Self::OutQuart => ease_out(t, 4),
            Self::InOutQuart => ease_in_out(t, 4),
            Self::InQuint => ease_in(t, 5),
            Self::OutQuint => ease_out(t, 5),
            Self::InOutQuint => ease_in_out(t, 5),
        }
    }
}

fn ease_in(t: f64, n: i32) -> f64 {
    t.powi(n)
}

fn ease_out(t: f64, n: i32) -> f64 {
    1.0 - (1.0 - t).powi(n)
}

fn ease_in_out(t: f64, n: i32) -> f64 {
    if t < 0.5 {
        2f64.powi(n - 1) * t.powi(n)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(n) / 2.0
    }
}

impl FromStr for Ease {
    type Err = CineloreError;

    /// Parse `none`, `linear`, or `powerN[.in|.out|.inOut]` (`N` in `1..=4`, default `.out`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "none" || s == "linear" {
            return Ok(Self::Linear);
        }
        let (power, dir) = s.split_once('.').unwrap_or((s, "out"));
        let table = match power {
            "power1" => [Self::InQuad, Self::OutQuad, Self::InOutQuad],
            "power2" => [Self::InCubic, Self::OutCubic, Self::InOutCubic],
            "power3" => [Self::InQuart, Self::OutQuart, Self::InOutQuart],
            "power4" => [Self::InQuint, Self::OutQuint, Self::InOutQuint],
            _ => return Err(CineloreError::validation(format!("unknown ease '{s}'"))),
        };
        match dir {
            "in" => Ok(table[0]),
            "out" => Ok(table[1]),
            "inOut" => Ok(table[2]),
            _ => Err(CineloreError::validation(format!("unknown ease '{s}'"))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
