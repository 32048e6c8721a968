//! Shared single-cycle sine wavetable.
//!
//! One table of [`SINE_TABLE_SIZE`] samples spans a full sine period. It is
//! built lazily the first time [`sine_table`] is called and never changes
//! afterwards, so every voice of every pool reads the same memory.
//!
//! Initialisation runs inside a critical section: concurrent first calls
//! cannot build the table twice, and later calls only read a cached
//! reference.
//!
//! # Lookup
//!
//! ```text
//! index = floor(phase * SIZE) mod SIZE
//! ```
//!
//! `SIZE` is a power of two, so the modulo is a bitmask and any phase
//! (negative, or beyond one cycle) wraps instead of being rejected.

use crate::config::SINE_TABLE_SIZE;
use core::cell::Cell;
use critical_section::Mutex;
use static_cell::StaticCell;

/// One period of a sine wave sampled at [`SINE_TABLE_SIZE`] points.
#[derive(Debug, Clone)]
pub struct SineTable {
    samples: [f32; SINE_TABLE_SIZE],
}

impl SineTable {
    /// Compute the table.
    ///
    /// Prefer [`sine_table`], which builds it once per process.
    pub fn build() -> Self {
        let mut samples = [0.0; SINE_TABLE_SIZE];
        for (i, s) in samples.iter_mut().enumerate() {
            *s = libm::sinf(core::f32::consts::TAU * i as f32 / SINE_TABLE_SIZE as f32);
        }
        Self { samples }
    }

    /// Look up the sine value for a normalized phase.
    ///
    /// `phase01` is expected in `[0, 1)` but any finite value wraps.
    #[inline]
    pub fn lookup(&self, phase01: f32) -> f32 {
        let idx = libm::floorf(phase01 * SINE_TABLE_SIZE as f32) as i64;
        self.samples[(idx & (SINE_TABLE_SIZE as i64 - 1)) as usize]
    }

    /// Number of entries in the table.
    pub const fn len(&self) -> usize {
        SINE_TABLE_SIZE
    }

    /// Always false; the table has a fixed non-zero size.
    pub const fn is_empty(&self) -> bool {
        false
    }
}

static STORAGE: StaticCell<SineTable> = StaticCell::new();
static TABLE: Mutex<Cell<Option<&'static SineTable>>> = Mutex::new(Cell::new(None));

/// Returns the process-wide sine table, building it on first use.
///
/// Repeated calls are cheap and return the same reference.
pub fn sine_table() -> &'static SineTable {
    critical_section::with(|cs| {
        let slot = TABLE.borrow(cs);
        if let Some(table) = slot.get() {
            return table;
        }
        let table: &'static SineTable = STORAGE.init(SineTable::build());
        slot.set(Some(table));
        #[cfg(feature = "tracing")]
        tracing::debug!(size = SINE_TABLE_SIZE, "sine table built");
        table
    })
}
