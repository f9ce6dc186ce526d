use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind};

use super::converter::TimedNote;
use super::defaults::{BEATS_PER_MEASURE, BEAT_UNIT, GUITAR_CHANNEL, GUITAR_PROGRAM};
use crate::error::{EditorError, Result};

/// Write notes to a Standard MIDI File (SMF) Format 1
///
/// Track 0 carries tempo and time signature; track 1 is the guitar.
pub fn write_smf(notes: &[TimedNote], tpq: u16, tempo_bpm: u16, length_ticks: u32, out: &mut Vec<u8>) -> Result<()> {
    let tracks = vec![
        build_conductor_track(tempo_bpm, length_ticks),
        build_guitar_track(notes, length_ticks),
    ];

    let smf = Smf {
        header: Header {
            format: Format::Parallel,
            timing: Timing::Metrical(tpq.into()),
        },
        tracks,
    };

    smf.write(out)
        .map_err(|e| EditorError::Midi(format!("failed to write MIDI: {}", e)))
}

fn build_conductor_track<'a>(tempo_bpm: u16, length_ticks: u32) -> Track<'a> {
    let microseconds_per_quarter = 60_000_000 / tempo_bpm.max(1) as u32;
    // Denominator is stored as a power of two
    let denominator_power = BEAT_UNIT.trailing_zeros() as u8;

    let mut events = vec![
        TrackEvent {
            delta: 0.into(),
            kind: TrackEventKind::Meta(MetaMessage::Tempo(microseconds_per_quarter.into())),
        },
        TrackEvent {
            delta: 0.into(),
            kind: TrackEventKind::Meta(MetaMessage::TimeSignature(BEATS_PER_MEASURE, denominator_power, 24, 8)),
        },
    ];
    events.push(TrackEvent {
        delta: length_ticks.into(),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    events
}

fn build_guitar_track(notes: &[TimedNote], length_ticks: u32) -> Track<'static> {
    // (absolute tick, event); note-offs sort before note-ons at the same tick
    let mut timed: Vec<(u32, u8, TrackEventKind<'static>)> = Vec::with_capacity(notes.len() * 2 + 2);

    timed.push((
        0,
        0,
        TrackEventKind::Meta(MetaMessage::TrackName(&b"Guitar"[..])),
    ));
    timed.push((
        0,
        0,
        TrackEventKind::Midi {
            channel: GUITAR_CHANNEL.into(),
            message: MidiMessage::ProgramChange {
                program: GUITAR_PROGRAM.into(),
            },
        },
    ));

    for note in notes {
        timed.push((
            note.start_tick,
            2,
            TrackEventKind::Midi {
                channel: GUITAR_CHANNEL.into(),
                message: MidiMessage::NoteOn {
                    key: note.pitch.into(),
                    vel: note.vel.into(),
                },
            },
        ));
        timed.push((
            note.start_tick + note.dur_tick,
            1,
            TrackEventKind::Midi {
                channel: GUITAR_CHANNEL.into(),
                message: MidiMessage::NoteOff {
                    key: note.pitch.into(),
                    vel: 0.into(),
                },
            },
        ));
    }

    timed.sort_by_key(|(tick, order, _)| (*tick, *order));

    let mut events = Vec::with_capacity(timed.len() + 1);
    let mut prev_tick = 0u32;
    for (tick, _, kind) in timed {
        events.push(TrackEvent {
            delta: tick.saturating_sub(prev_tick).into(),
            kind,
        });
        prev_tick = tick;
    }

    // End of track at the end of the last measure, even if it is silent
    events.push(TrackEvent {
        delta: length_ticks.saturating_sub(prev_tick).into(),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    events
}
