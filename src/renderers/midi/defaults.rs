//! Default values for MIDI export

/// Default MIDI velocity (1-127, where 64 is "normal")
pub const DEFAULT_VELOCITY: u8 = 64;

/// General MIDI program 25: Acoustic Guitar (steel), 0-based
pub const GUITAR_PROGRAM: u8 = 25;

/// Guitar track channel
pub const GUITAR_CHANNEL: u8 = 0;

/// Default ticks per quarter note (MIDI resolution)
pub const DEFAULT_TPQ: u16 = 480;

/// A measure is one bar of 4/4; each of its 16 positions is a sixteenth
pub const BEATS_PER_MEASURE: u8 = 4;
pub const BEAT_UNIT: u8 = 4;

/// Ticks covered by one grid position
pub fn ticks_per_position(tpq: u16) -> u32 {
    tpq as u32 / 4
}
