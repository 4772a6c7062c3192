//! Moderator note summarizing a retime

use serde::{Deserialize, Serialize};
use std::fmt;

use super::RetimeCalculator;
use crate::estimation::{TimeQuantizer, format_secs};
use crate::types::Split;

/// Frame numbers and totals for one retimed run
///
/// Renders as the single line moderators paste under a run:
///
/// ```rust
/// use splitframe::{ModNote, Split};
///
/// let splits = [Split::with_bounds(1.0, 61.5)];
/// let note = ModNote::build(&splits, 60, 0.0).unwrap();
/// assert_eq!(
///     note.to_string(),
///     "Mod Note: Retimed (Start Frame: 60, End Frame: 3690, FPS: 60, RTA: 1:00.500)"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct ModNote {
    /// `(start, end)` frame numbers per split
    ///
    /// `i32` keeps the type exportable to TypeScript as a plain number.
    pub frames: Vec<(i32, i32)>,
    pub fps: u32,
    pub extra_time: f64,
    pub rta: f64,
    /// Only reported when the run has more than one split
    pub igt: Option<f64>,
}

impl ModNote {
    /// Build the note, or `None` when the splits do not retime successfully
    pub fn build(splits: &[Split], fps: u32, extra_time: f64) -> Option<Self> {
        let quantizer = TimeQuantizer::new(fps);
        let retime =
            RetimeCalculator::with_quantizer(quantizer).calculate(splits, extra_time).retime()?;

        let frames = splits
            .iter()
            .map(|split| (frame_number(&quantizer, split.start), frame_number(&quantizer, split.end)))
            .collect();

        Some(Self {
            frames,
            fps: quantizer.fps(),
            extra_time,
            rta: retime.rta,
            igt: (splits.len() > 1).then_some(retime.igt),
        })
    }
}

/// Frame index of `seconds`, saturated to the `i32` range
fn frame_number(quantizer: &TimeQuantizer, seconds: f64) -> i32 {
    let frame = quantizer.estimate_frame(seconds);
    i32::try_from(frame).unwrap_or(if frame < 0 { i32::MIN } else { i32::MAX })
}

impl fmt::Display for ModNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut details = Vec::with_capacity(self.frames.len() + 4);

        for (i, (start, end)) in self.frames.iter().enumerate() {
            let n = if i == 0 { String::new() } else { format!(" #{}", i + 1) };
            details.push(format!("Start Frame{n}: {start}, End Frame{n}: {end}"));
        }

        details.push(format!("FPS: {}", self.fps));

        if self.extra_time != 0.0 {
            details.push(format!("Extra time: {}", format_secs(self.extra_time)));
        }

        details.push(format!("RTA: {}", format_secs(self.rta)));

        if let Some(igt) = self.igt {
            details.push(format!("IGT: {}", format_secs(igt)));
        }

        write!(f, "Mod Note: Retimed ({})", details.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_split_note_lists_every_split_and_igt() {
        let splits = [Split::with_bounds(0.5, 2.0), Split::with_bounds(3.0, 5.0)];
        let note = ModNote::build(&splits, 30, 0.0).unwrap();

        assert_eq!(note.frames, vec![(15, 60), (90, 150)]);
        assert_eq!(
            note.to_string(),
            "Mod Note: Retimed (Start Frame: 15, End Frame: 60, \
             Start Frame #2: 90, End Frame #2: 150, FPS: 30, RTA: 0:04.500, IGT: 0:03.500)"
        );
    }

    #[test]
    fn extra_time_appears_when_nonzero() {
        let splits = [Split::with_bounds(0.0, 2.0), Split::with_bounds(2.0, 4.0)];
        let note = ModNote::build(&splits, 60, 1.25).unwrap();

        assert_eq!(
            note.to_string(),
            "Mod Note: Retimed (Start Frame: 0, End Frame: 120, \
             Start Frame #2: 120, End Frame #2: 240, FPS: 60, \
             Extra time: 0:01.250, RTA: 0:04.000, IGT: 0:05.250)"
        );
    }

    #[test]
    fn single_split_omits_igt() {
        let note = ModNote::build(&[Split::with_bounds(2.0, 92.0)], 60, 0.0).unwrap();
        assert_eq!(note.igt, None);
        assert!(note.to_string().ends_with("FPS: 60, RTA: 1:30.000)"));
    }

    #[test]
    fn frame_numbers_saturate_instead_of_wrapping() {
        let note = ModNote::build(&[Split::with_bounds(1.0, 1.0e9)], 60, 0.0).unwrap();
        assert_eq!(note.frames, vec![(60, i32::MAX)]);
    }

    #[test]
    fn invalid_splits_have_no_note() {
        assert!(ModNote::build(&[Split::new()], 60, 0.0).is_none());
        let overlapping = [Split::with_bounds(0.0, 2.0), Split::with_bounds(1.0, 3.0)];
        assert!(ModNote::build(&overlapping, 60, 0.0).is_none());
    }
}
