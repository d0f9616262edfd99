//! Patient state and vital-sign measurement simulation.
//!
//! Patients random-walk inside condition bands; bedside monitors keep a
//! bounded history of measurements. All of it is tickable state driven by
//! a caller-owned [`WardClock`]. The geometry/topology core never sees
//! any of this, and the clock only reads device identities.

use std::collections::{HashMap, HashSet, VecDeque};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use wardnet_topology::DeviceId;

/// A vital sign a monitor can measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vital {
    HeartRate,
    Spo2,
}

impl Vital {
    /// Every measurable vital.
    pub const ALL: [Vital; 2] = [Vital::HeartRate, Vital::Spo2];

    /// Display unit.
    pub const fn unit(&self) -> &'static str {
        match self {
            Vital::HeartRate => "bpm",
            Vital::Spo2 => "%",
        }
    }
}

impl std::fmt::Display for Vital {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Vital::HeartRate => f.write_str("hr"),
            Vital::Spo2 => f.write_str("spo2"),
        }
    }
}

/// Inclusive value band a vital stays inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub min: i32,
    pub max: i32,
}

impl Band {
    /// Whether a value falls inside the band.
    pub const fn contains(&self, value: i32) -> bool {
        self.min <= value && value <= self.max
    }
}

/// A patient's general condition, expressed as per-vital bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub hr: Band,
    pub spo2: Band,
}

impl Condition {
    pub const RESTING: Self = Self {
        hr: Band { min: 60, max: 80 },
        spo2: Band { min: 95, max: 99 },
    };
    pub const EXCITED: Self = Self {
        hr: Band { min: 70, max: 100 },
        spo2: Band { min: 95, max: 99 },
    };
    pub const UNWELL: Self = Self {
        hr: Band { min: 50, max: 70 },
        spo2: Band { min: 80, max: 94 },
    };

    /// The band for one vital.
    pub const fn band(&self, vital: Vital) -> Band {
        match vital {
            Vital::HeartRate => self.hr,
            Vital::Spo2 => self.spo2,
        }
    }
}

/// Readings produced while a sensor is faulty.
///
/// Disconnected or misbehaving sensors report "special" values (-1) or
/// unlikely ones (single-digit saturation).
const fn faulty_band(vital: Vital) -> Band {
    match vital {
        Vital::HeartRate => Band { min: -1, max: -1 },
        Vital::Spo2 => Band { min: 0, max: 5 },
    }
}

/// Simulated patient state.
#[derive(Debug, Clone)]
pub struct Patient {
    pub id: u32,
    pub condition: Condition,
    state: HashMap<Vital, i32>,
}

impl Patient {
    /// Create a patient with state seeded inside the condition's bands.
    pub fn new(id: u32, condition: Condition, rng: &mut SmallRng) -> Self {
        let mut patient = Self {
            id,
            condition,
            state: HashMap::new(),
        };
        patient.tick(rng);
        patient
    }

    /// Advance one time step: each vital walks ±1, clamped to its band.
    pub fn tick(&mut self, rng: &mut SmallRng) {
        for vital in Vital::ALL {
            let band = self.condition.band(vital);
            let value = match self.state.get(&vital) {
                Some(&current) => (current + rng.gen_range(-1..=1)).clamp(band.min, band.max),
                None => rng.gen_range(band.min..=band.max),
            };
            self.state.insert(vital, value);
        }
    }

    /// The current value of a vital.
    pub fn measure(&self, vital: Vital) -> i32 {
        self.state.get(&vital).copied().unwrap_or_default()
    }
}

/// A recorded measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub timestamp: u64,
    pub value: i32,
}

/// A bedside monitor: a patient plus bounded measurement history.
#[derive(Debug, Clone)]
pub struct PatientMonitor {
    pub device: DeviceId,
    pub patient: Patient,
    buffer: HashMap<Vital, VecDeque<Measurement>>,
    faulty: HashSet<Vital>,
    depth: usize,
}

impl PatientMonitor {
    /// How many measurements per vital a monitor retains.
    pub const DEFAULT_DEPTH: usize = 10;

    /// Create a monitor bound to a device.
    pub fn new(device: DeviceId, patient: Patient) -> Self {
        Self {
            device,
            patient,
            buffer: HashMap::new(),
            faulty: HashSet::new(),
            depth: Self::DEFAULT_DEPTH,
        }
    }

    /// Record a measurement and return the value.
    ///
    /// A faulty sensor reports from the fault band instead of reading the
    /// patient.
    pub fn record(&mut self, timestamp: u64, vital: Vital, rng: &mut SmallRng) -> i32 {
        let value = if self.faulty.contains(&vital) {
            let band = faulty_band(vital);
            rng.gen_range(band.min..=band.max)
        } else {
            self.patient.measure(vital)
        };

        let history = self.buffer.entry(vital).or_default();
        if history.len() == self.depth {
            history.pop_front();
        }
        history.push_back(Measurement { timestamp, value });
        value
    }

    /// Mark one sensor as faulty.
    pub fn mark_faulty(&mut self, vital: Vital) {
        self.faulty.insert(vital);
    }

    /// Restore a faulty sensor.
    pub fn clear_faulty(&mut self, vital: Vital) {
        self.faulty.remove(&vital);
    }

    /// The most recent measurement of a vital.
    pub fn last_measurement(&self, vital: Vital) -> Option<Measurement> {
        self.buffer.get(&vital).and_then(|h| h.back()).copied()
    }

    /// Measurement history of a vital, oldest first.
    pub fn history(&self, vital: Vital) -> Vec<Measurement> {
        self.buffer
            .get(&vital)
            .map(|h| h.iter().copied().collect())
            .unwrap_or_default()
    }
}

/// Caller-owned time step driving all patient state.
///
/// Owns the tick counter and the RNG, so a fixed seed reproduces an
/// entire run. Measuring the same vital twice within one tick records
/// only once.
#[derive(Debug)]
pub struct WardClock {
    monitors: Vec<PatientMonitor>,
    timestamp: u64,
    measured: HashSet<Vital>,
    rng: SmallRng,
    next_patient: u32,
}

impl WardClock {
    /// Create a clock with an explicit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            monitors: Vec::new(),
            timestamp: 0,
            measured: HashSet::new(),
            rng: SmallRng::seed_from_u64(seed),
            next_patient: 0,
        }
    }

    /// Admit a patient and bind a monitor to a device.
    pub fn admit(&mut self, device: DeviceId, condition: Condition) -> u32 {
        let patient_id = self.next_patient;
        self.next_patient += 1;
        let patient = Patient::new(patient_id, condition, &mut self.rng);
        self.monitors.push(PatientMonitor::new(device, patient));
        patient_id
    }

    /// Move time forward and mutate every patient's state.
    pub fn tick(&mut self) {
        self.timestamp += 1;
        self.measured.clear();
        for monitor in &mut self.monitors {
            monitor.patient.tick(&mut self.rng);
        }
    }

    /// Measure a vital on every monitor, once per tick.
    pub fn measure(&mut self, vital: Vital) {
        if !self.measured.insert(vital) {
            return;
        }
        for monitor in &mut self.monitors {
            monitor.record(self.timestamp, vital, &mut self.rng);
        }
    }

    /// Current tick count.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// All monitors, in admission order.
    pub fn monitors(&self) -> &[PatientMonitor] {
        &self.monitors
    }

    /// Mutable access to one device's monitor.
    pub fn monitor_mut(&mut self, device: DeviceId) -> Option<&mut PatientMonitor> {
        self.monitors.iter_mut().find(|m| m.device == device)
    }
}
