use ocular_deviation::regions::RegionType;
use ocular_deviation::types::{Coordinate, Eye, EyeMessage, Sample};
use ocular_deviation::Recording;

/// Alternating cover test: both eyes open for `lead_in` frames, then
/// `regions` back-to-back occlusion regions of `region_len` frames starting
/// with OS covered, then both eyes open for `tail` frames.
///
/// The covered eye drifts by `(shift_x, shift_y)` pixels from its fixation
/// position; every trace is otherwise flat.
#[derive(Clone, Debug)]
pub struct CoverTest {
    pub lead_in: usize,
    pub region_len: usize,
    pub regions: usize,
    pub tail: usize,
    pub shift_x: f64,
    pub shift_y: f64,
}

pub const OD_FIXATION: (f64, f64) = (100.0, 60.0);
pub const OS_FIXATION: (f64, f64) = (200.0, 62.0);

impl Default for CoverTest {
    fn default() -> Self {
        Self {
            lead_in: 20,
            region_len: 40,
            regions: 8,
            tail: 15,
            shift_x: 8.0,
            shift_y: 4.0,
        }
    }
}

impl CoverTest {
    pub fn frame_count(&self) -> usize {
        self.lead_in + self.region_len * self.regions + self.tail
    }

    /// Type of the `n`-th (0-based) occlusion region.
    pub fn region_type(&self, n: usize) -> RegionType {
        if n % 2 == 0 {
            RegionType::OsHideOdShow
        } else {
            RegionType::OdHideOsShow
        }
    }

    /// Inclusive frame range of the `n`-th (0-based) occlusion region.
    pub fn region_bounds(&self, n: usize) -> (usize, usize) {
        let start = self.lead_in + n * self.region_len;
        (start, start + self.region_len - 1)
    }

    fn covered_at(&self, frame: usize) -> Option<Eye> {
        if frame < self.lead_in {
            return None;
        }
        let n = (frame - self.lead_in) / self.region_len;
        (n < self.regions).then(|| self.region_type(n).hidden_eye())
    }

    pub fn samples(&self, eye: Eye) -> Vec<Sample> {
        let (x0, y0) = match eye {
            Eye::Od => OD_FIXATION,
            Eye::Os => OS_FIXATION,
        };
        (0..self.frame_count())
            .map(|frame| {
                let hidden = self.covered_at(frame) == Some(eye);
                let (dx, dy) = if hidden { (self.shift_x, self.shift_y) } else { (0.0, 0.0) };
                Sample::new(frame, x0 + dx, y0 + dy, hidden)
            })
            .collect()
    }

    pub fn recording(&self) -> Recording {
        Recording::from_samples(&self.samples(Eye::Od), &self.samples(Eye::Os))
    }

    /// Interleaved message stream, OS first within each frame.
    pub fn messages(&self) -> Vec<EyeMessage> {
        let od = self.samples(Eye::Od);
        let os = self.samples(Eye::Os);
        os.iter()
            .zip(&od)
            .flat_map(|(s, d)| [message(Eye::Os, s), message(Eye::Od, d)])
            .collect()
    }
}

pub fn message(eye: Eye, s: &Sample) -> EyeMessage {
    EyeMessage {
        frame_index: s.frame_index,
        eye,
        x: s.x,
        y: s.y,
        is_hide: s.is_hide,
    }
}

/// Drops the x coordinate of `frames` in both eyes.
pub fn drop_x(samples: &mut [Sample], frames: &[usize]) {
    for &f in frames {
        samples[f].x = Coordinate::Missing;
    }
}
