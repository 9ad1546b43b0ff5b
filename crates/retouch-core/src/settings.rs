use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::EditorError;

/// Quantization step applied to committed values. Only 2 and 3 are valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step(i32);

impl Step {
    pub const TWO: Step = Step(2);
    pub const THREE: Step = Step(3);

    pub fn new(step: i32) -> Result<Self, EditorError> {
        match step {
            2 | 3 => Ok(Self(step)),
            other => Err(EditorError::Config(format!(
                "step must be 2 or 3, got {other}"
            ))),
        }
    }

    /// Even suffixes select a step of 2, odd ones a step of 3.
    pub fn from_roll_suffix(suffix: u32) -> Self {
        if suffix % 2 == 0 { Self::TWO } else { Self::THREE }
    }

    pub fn get(self) -> i32 {
        self.0
    }

    pub fn snap(self, value: i32) -> i32 {
        snap(value, self.0)
    }
}

impl Default for Step {
    fn default() -> Self {
        Self::TWO
    }
}

/// Round `value` to the nearest multiple of `step`, ties away from zero.
///
/// Near the ends of the `i32` range the nearest multiple may not fit; the
/// next multiple toward zero is returned instead.
pub fn snap(value: i32, step: i32) -> i32 {
    if step == 0 {
        return value;
    }
    let step = i64::from(step);
    let mut snapped = (value as f64 / step as f64).round() as i64 * step;
    if snapped > i64::from(i32::MAX) {
        snapped -= step.abs();
    } else if snapped < i64::from(i32::MIN) {
        snapped += step.abs();
    }
    snapped as i32
}

/// The filters addressable by the adjustment slider.
///
/// Flip and reset are actions, not filters, so they have no variant here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Brightness,
    Saturation,
    Inversion,
    Grayscale,
    Sepia,
    Blur,
    Rotate,
}

impl FilterKind {
    pub const ALL: [FilterKind; 7] = [
        FilterKind::Brightness,
        FilterKind::Saturation,
        FilterKind::Inversion,
        FilterKind::Grayscale,
        FilterKind::Sepia,
        FilterKind::Blur,
        FilterKind::Rotate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Brightness => "brightness",
            FilterKind::Saturation => "saturation",
            FilterKind::Inversion => "inversion",
            FilterKind::Grayscale => "grayscale",
            FilterKind::Sepia => "sepia",
            FilterKind::Blur => "blur",
            FilterKind::Rotate => "rotate",
        }
    }

    /// Capitalised name used in labels and history entries.
    pub fn label(self) -> &'static str {
        match self {
            FilterKind::Brightness => "Brightness",
            FilterKind::Saturation => "Saturation",
            FilterKind::Inversion => "Inversion",
            FilterKind::Grayscale => "Grayscale",
            FilterKind::Sepia => "Sepia",
            FilterKind::Blur => "Blur",
            FilterKind::Rotate => "Rotate",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            FilterKind::Blur => "px",
            FilterKind::Rotate => "deg",
            _ => "%",
        }
    }

    /// Slider domain for this filter.
    pub fn range(self) -> RangeInclusive<i32> {
        match self {
            FilterKind::Brightness | FilterKind::Saturation => 0..=200,
            FilterKind::Inversion | FilterKind::Grayscale | FilterKind::Sepia => 0..=100,
            FilterKind::Blur => 0..=20,
            FilterKind::Rotate => -180..=180,
        }
    }

    pub fn format_value(self, value: i32) -> String {
        format!("{value}{}", self.unit())
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipAxis {
    Horizontal,
    Vertical,
}

impl FlipAxis {
    pub fn label(self) -> &'static str {
        match self {
            FlipAxis::Horizontal => "Flip Horizontal",
            FlipAxis::Vertical => "Flip Vertical",
        }
    }
}

/// The full set of adjustments applied to the loaded image.
///
/// Always fully populated. `flip_x` and `flip_y` are sign multipliers and
/// only ever hold -1 or +1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSettings {
    /// Percent, 100 is unchanged.
    pub brightness: i32,
    /// Percent, 100 is unchanged.
    pub saturation: i32,
    pub inversion: i32,
    pub grayscale: i32,
    pub sepia: i32,
    /// Blur radius in pixels.
    pub blur: i32,
    /// Rotation in degrees. Unbounded after repeated quarter turns.
    pub rotate: i32,
    pub flip_x: i32,
    pub flip_y: i32,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            brightness: 100,
            saturation: 100,
            inversion: 0,
            grayscale: 0,
            sepia: 0,
            blur: 0,
            rotate: 0,
            flip_x: 1,
            flip_y: 1,
        }
    }
}

impl FilterSettings {
    pub fn get(&self, kind: FilterKind) -> i32 {
        match kind {
            FilterKind::Brightness => self.brightness,
            FilterKind::Saturation => self.saturation,
            FilterKind::Inversion => self.inversion,
            FilterKind::Grayscale => self.grayscale,
            FilterKind::Sepia => self.sepia,
            FilterKind::Blur => self.blur,
            FilterKind::Rotate => self.rotate,
        }
    }

    pub fn set(&mut self, kind: FilterKind, value: i32) {
        let slot = match kind {
            FilterKind::Brightness => &mut self.brightness,
            FilterKind::Saturation => &mut self.saturation,
            FilterKind::Inversion => &mut self.inversion,
            FilterKind::Grayscale => &mut self.grayscale,
            FilterKind::Sepia => &mut self.sepia,
            FilterKind::Blur => &mut self.blur,
            FilterKind::Rotate => &mut self.rotate,
        };
        *slot = value;
    }

    pub fn flip(&mut self, axis: FlipAxis) {
        match axis {
            FlipAxis::Horizontal => self.flip_x = -self.flip_x,
            FlipAxis::Vertical => self.flip_y = -self.flip_y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_identity_filters() {
        let s = FilterSettings::default();
        assert_eq!(s.brightness, 100);
        assert_eq!(s.saturation, 100);
        assert_eq!(s.inversion, 0);
        assert_eq!(s.blur, 0);
        assert_eq!(s.rotate, 0);
        assert_eq!((s.flip_x, s.flip_y), (1, 1));
    }

    #[test]
    fn snap_rounds_to_nearest_multiple() {
        assert_eq!(snap(151, 2), 152);
        assert_eq!(snap(150, 2), 150);
        assert_eq!(snap(100, 3), 99);
        assert_eq!(snap(101, 3), 102);
        assert_eq!(snap(90, 2), 90);
    }

    #[test]
    fn snap_ties_round_away_from_zero() {
        assert_eq!(snap(1, 2), 2);
        assert_eq!(snap(-1, 2), -2);
        assert_eq!(snap(-91, 2), -92);
    }

    #[test]
    fn snap_is_idempotent() {
        for step in [2, 3] {
            for v in -400..=400 {
                let once = snap(v, step);
                assert_eq!(snap(once, step), once, "v={v} step={step}");
            }
        }
    }

    #[test]
    fn snap_stays_in_range_at_i32_limits() {
        assert_eq!(snap(i32::MAX, 2), i32::MAX - 1);
        assert_eq!(snap(i32::MAX, 3), i32::MAX - 1);
        assert_eq!(snap(i32::MIN, 2), i32::MIN);
        assert_eq!(snap(i32::MIN, 3), i32::MIN + 2);
        for step in [2, 3] {
            for v in [i32::MIN, i32::MIN + 1, i32::MAX - 1, i32::MAX] {
                let once = snap(v, step);
                assert_eq!(once % step, 0, "v={v} step={step}");
                assert_eq!(snap(once, step), once, "v={v} step={step}");
            }
        }
    }

    #[test]
    fn step_accepts_only_two_or_three() {
        assert_eq!(Step::new(2).unwrap(), Step::TWO);
        assert_eq!(Step::new(3).unwrap(), Step::THREE);
        assert!(Step::new(4).is_err());
        assert!(Step::new(0).is_err());
    }

    #[test]
    fn step_from_roll_suffix_parity() {
        assert_eq!(Step::from_roll_suffix(4), Step::TWO);
        assert_eq!(Step::from_roll_suffix(0), Step::TWO);
        assert_eq!(Step::from_roll_suffix(7), Step::THREE);
    }

    #[test]
    fn set_replaces_one_field() {
        let mut s = FilterSettings::default();
        s.set(FilterKind::Sepia, 40);
        assert_eq!(s.get(FilterKind::Sepia), 40);
        let expected = FilterSettings {
            sepia: 40,
            ..Default::default()
        };
        assert_eq!(s, expected);
    }

    #[test]
    fn flip_toggles_sign() {
        let mut s = FilterSettings::default();
        s.flip(FlipAxis::Horizontal);
        assert_eq!(s.flip_x, -1);
        assert_eq!(s.flip_y, 1);
        s.flip(FlipAxis::Horizontal);
        assert_eq!(s.flip_x, 1);
    }

    #[test]
    fn units_and_ranges() {
        assert_eq!(FilterKind::Blur.format_value(4), "4px");
        assert_eq!(FilterKind::Rotate.format_value(-90), "-90deg");
        assert_eq!(FilterKind::Sepia.format_value(30), "30%");
        assert_eq!(FilterKind::Brightness.range(), 0..=200);
        assert_eq!(FilterKind::Grayscale.range(), 0..=100);
        assert_eq!(FilterKind::Rotate.range(), -180..=180);
    }

    #[test]
    fn settings_serialization_roundtrip() {
        let settings = FilterSettings {
            brightness: 152,
            rotate: -270,
            flip_y: -1,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"flipY\":-1"));
        let back: FilterSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
