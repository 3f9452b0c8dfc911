//! Velocity time-series data model
//!
//! An [`AdvRecord`] is the engine's input contract: an already
//! motion-corrected, earth- (or principal-axis-) referenced velocity record
//! with a fixed sample rate and a shared timestamp axis. The engine never
//! mutates a record; every pipeline stage takes it by reference and returns
//! new data.
//!
//! Channel names follow the upstream motion-correction stage: `vel` is the
//! corrected velocity, `vel_rot` the rotation-rate-induced velocity,
//! `vel_acc` the translational (acceleration-derived) velocity, and
//! `vel_raw` the uncorrected measurement.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Velocity component index: East, North, Up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    /// East (u)
    U,
    /// North (v)
    V,
    /// Up (w)
    W,
}

impl Component {
    /// All components in storage order.
    pub const ALL: [Component; 3] = [Component::U, Component::V, Component::W];

    /// Storage index of this component.
    pub fn index(self) -> usize {
        match self {
            Component::U => 0,
            Component::V => 1,
            Component::W => 2,
        }
    }
}

/// Three equal-length velocity component channels (m/s).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelComponents {
    u: Vec<f64>,
    v: Vec<f64>,
    w: Vec<f64>,
}

impl VelComponents {
    /// Build from three channels, enforcing equal lengths.
    pub fn new(u: Vec<f64>, v: Vec<f64>, w: Vec<f64>) -> Result<Self> {
        if u.is_empty() {
            return Err(Error::empty_input("velocity component u"));
        }
        if v.len() != u.len() {
            return Err(Error::shape_mismatch("velocity component v", u.len(), v.len()));
        }
        if w.len() != u.len() {
            return Err(Error::shape_mismatch("velocity component w", u.len(), w.len()));
        }
        Ok(Self { u, v, w })
    }

    /// Number of samples per component.
    pub fn len(&self) -> usize {
        self.u.len()
    }

    /// True when the channels hold no samples.
    pub fn is_empty(&self) -> bool {
        self.u.is_empty()
    }

    /// Borrow one component channel.
    pub fn component(&self, c: Component) -> &[f64] {
        match c {
            Component::U => &self.u,
            Component::V => &self.v,
            Component::W => &self.w,
        }
    }

    /// Borrow all three channels in storage order.
    pub fn channels(&self) -> [&[f64]; 3] {
        [&self.u, &self.v, &self.w]
    }

    /// Element-wise sum of two channel sets.
    ///
    /// Used to form the total motion-induced velocity
    /// (`vel_rot + vel_acc`) from its two parts.
    pub fn sum(&self, other: &VelComponents) -> Result<VelComponents> {
        if other.len() != self.len() {
            return Err(Error::shape_mismatch("channel sum", self.len(), other.len()));
        }
        let add = |a: &[f64], b: &[f64]| a.iter().zip(b).map(|(x, y)| x + y).collect();
        Ok(Self {
            u: add(&self.u, &other.u),
            v: add(&self.v, &other.v),
            w: add(&self.w, &other.w),
        })
    }
}

/// A motion-corrected ADV velocity record.
///
/// All channels share one length and one timestamp axis (`time`, seconds).
/// The optional channels are carried through binning when present so their
/// spectra can be compared against the corrected velocity's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvRecord {
    /// Sample rate in Hz.
    pub fs: f64,
    /// Timestamp axis in seconds, one entry per sample.
    pub time: Vec<f64>,
    /// Earth-referenced, motion-corrected velocity.
    pub vel: VelComponents,
    /// Rotation-rate-induced velocity (IMU records only).
    pub vel_rot: Option<VelComponents>,
    /// Translational (acceleration-derived) velocity (IMU records only).
    pub vel_acc: Option<VelComponents>,
    /// Uncorrected velocity as measured.
    pub vel_raw: Option<VelComponents>,
}

impl AdvRecord {
    /// Build a record from the mandatory channels and validate it.
    pub fn new(fs: f64, time: Vec<f64>, vel: VelComponents) -> Result<Self> {
        let rec = Self {
            fs,
            time,
            vel,
            vel_rot: None,
            vel_acc: None,
            vel_raw: None,
        };
        rec.validate()?;
        Ok(rec)
    }

    /// Attach the motion-induced velocity channels.
    pub fn with_motion(mut self, vel_rot: VelComponents, vel_acc: VelComponents) -> Result<Self> {
        self.vel_rot = Some(vel_rot);
        self.vel_acc = Some(vel_acc);
        self.validate()?;
        Ok(self)
    }

    /// Attach the uncorrected velocity channel.
    pub fn with_raw(mut self, vel_raw: VelComponents) -> Result<Self> {
        self.vel_raw = Some(vel_raw);
        self.validate()?;
        Ok(self)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// True when the record holds no samples.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Total motion-induced velocity, `vel_rot + vel_acc`.
    ///
    /// `None` unless both parts are present.
    pub fn vel_mot(&self) -> Result<Option<VelComponents>> {
        match (&self.vel_rot, &self.vel_acc) {
            (Some(rot), Some(acc)) => Ok(Some(rot.sum(acc)?)),
            _ => Ok(None),
        }
    }

    /// Check the input contract: positive finite sample rate, non-empty
    /// channels, and one shared length across every channel and the time
    /// axis.
    pub fn validate(&self) -> Result<()> {
        if !self.fs.is_finite() || self.fs <= 0.0 {
            return Err(Error::BadSampleRate(self.fs));
        }
        if self.time.is_empty() {
            return Err(Error::empty_input("time axis"));
        }
        let n = self.time.len();
        if self.vel.len() != n {
            return Err(Error::shape_mismatch("vel", n, self.vel.len()));
        }
        for (name, chan) in [
            ("vel_rot", &self.vel_rot),
            ("vel_acc", &self.vel_acc),
            ("vel_raw", &self.vel_raw),
        ] {
            if let Some(c) = chan {
                if c.len() != n {
                    return Err(Error::shape_mismatch(name, n, c.len()));
                }
            }
        }
        Ok(())
    }
}
