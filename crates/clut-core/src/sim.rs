// crates/clut-core/src/sim.rs
//
// Two-counter playback of one packed table cell, frame by frame:
//   outer: bits 0-6 slot index in the row, bit 7 double-buffer flag (0 = idle)
//   inner: bits 0-5 remaining run (end bit included), bits 6-7 phase
// The phase written while stepping lands in the buffer slot emitted on the
// next frame.

use crate::clut::band::ClutBand;
use crate::error::{ClutError, Result};
use crate::waveform::mode::LutMode;

const DOUBLE_BUFFER: u8 = 0x80;
const INDEX_MASK: u8 = 0x7f;
const RUN_FIELD: u8 = 0x3f;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Slot {
    Previous,
    Current,
}

/// Two phase slots; the active one is written by the state machine and
/// emitted by the next frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseBuffers {
    previous: u8,
    current: u8,
    active: Slot,
}

impl Default for PhaseBuffers {
    fn default() -> Self {
        Self {
            previous: 0,
            current: 0,
            active: Slot::Previous,
        }
    }
}

impl PhaseBuffers {
    pub fn active_slot(&self) -> Slot {
        self.active
    }

    pub fn active(&self) -> u8 {
        match self.active {
            Slot::Previous => self.previous,
            Slot::Current => self.current,
        }
    }

    pub fn set(&mut self, phase: u8) {
        match self.active {
            Slot::Previous => self.previous = phase,
            Slot::Current => self.current = phase,
        }
    }

    /// Flip the active slot and return the new one.
    pub fn swap(&mut self) -> Slot {
        self.active = match self.active {
            Slot::Previous => Slot::Current,
            Slot::Current => Slot::Previous,
        };
        self.active
    }
}

pub struct Sim<'a> {
    band: &'a ClutBand,
    row: &'a [u8],
    outer: u8,
    inner: u8,
    buffers: PhaseBuffers,
    history: Vec<u8>,
}

impl<'a> Sim<'a> {
    pub fn new(band: &'a ClutBand) -> Self {
        Self {
            band,
            row: &[],
            outer: 0,
            inner: 0,
            buffers: PhaseBuffers::default(),
            history: Vec::new(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.outer == 0
    }

    pub fn outer(&self) -> u8 {
        self.outer
    }

    pub fn inner(&self) -> u8 {
        self.inner
    }

    pub fn history(&self) -> &[u8] {
        &self.history
    }

    /// Start the (src, dst) sequence of `mode`. Ignored unless idle; returns
    /// whether it took effect.
    pub fn schedule(&mut self, src: u8, dst: u8, mode: LutMode) -> Result<bool> {
        if self.inner != 0 || self.outer != 0 {
            return Ok(false);
        }
        let row = self.band.row(src, dst)?;
        let offset = self.band.offset(mode);
        let t = *row.get(offset).ok_or_else(|| {
            ClutError::Range(format!("{mode} offset {offset} is past the end of the row"))
        })?;

        self.row = row;
        self.outer = (offset as u8 & INDEX_MASK) | if t & RUN_FIELD > 1 { DOUBLE_BUFFER } else { 0 };
        self.buffers.set(t >> 6);
        self.inner = t;
        Ok(true)
    }

    /// Advance the counters by one frame. Slots past the row end read as empty.
    pub fn evolve(&mut self) {
        let run = self.inner & RUN_FIELD;
        let phase = self.inner >> 6;

        if self.outer == 0 {
            return;
        }
        if run > 1 && self.outer & DOUBLE_BUFFER != 0 {
            self.buffers.set(phase);
            self.outer &= INDEX_MASK;
            self.inner -= 1;
        } else if run == 1 {
            let idx = (self.outer & INDEX_MASK) + 1;
            let t = self.row.get(idx as usize).copied().unwrap_or(0);
            self.outer = idx | DOUBLE_BUFFER;
            self.buffers.set(t >> 6);
            self.inner = t;
        } else if run == 0 {
            self.outer = 0;
            self.buffers.set(0);
        } else {
            self.inner -= 1;
        }
    }

    /// Emit the active slot, then swap slots.
    pub fn frame(&mut self) {
        self.history.push(self.buffers.active());
        self.buffers.swap();
    }

    /// Fresh playback of one cell for `steps` frames.
    pub fn run(&mut self, steps: usize, src: u8, dst: u8, mode: LutMode) -> Result<&[u8]> {
        self.row = &[];
        self.outer = 0;
        self.inner = 0;
        self.buffers = PhaseBuffers::default();
        self.history.clear();

        self.schedule(src, dst, mode)?;
        for _ in 0..steps {
            self.frame();
            self.evolve();
        }
        Ok(&self.history)
    }
}
