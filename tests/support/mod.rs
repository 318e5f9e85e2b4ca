#![allow(dead_code)]

use disparate::{
    avec::edges::Edges,
    sans::{
        disparity::RunningDisparity,
        table::{self, Octet},
        window::BitSample,
    },
    settings::Settings,
};

pub const SAMPLE_RATE: u32 = 96_000;
pub const BIT_RATE: u32 = 9600;
pub const SAMPLES_PER_BIT: f64 = 10.0;

/// Idle samples before the first transition.
pub const LEAD: u64 = 40;

const PREAMBLE: [bool; 4] = [true, false, true, false];
const POSTAMBLE: [bool; 4] = [true, false, true, false];

pub fn settings(drop_idle_frames: bool) -> Settings {
    Settings {
        input_channel: Some(0),
        bit_rate: BIT_RATE,
        drop_idle_frames,
    }
}

/// Encode octets starting from negative running disparity.
pub fn encode(octets: &[Octet]) -> Vec<u16> {
    let mut running = RunningDisparity::Negative;

    octets
        .iter()
        .map(|&octet| {
            let codeword = table::encode(octet, running).unwrap();
            if codeword.ones() != 5 {
                running = match running {
                    RunningDisparity::Negative => RunningDisparity::Positive,
                    RunningDisparity::Positive => RunningDisparity::Negative,
                };
            }
            codeword.raw()
        })
        .collect()
}

/// Bits of codewords in line order.
pub fn bits(codewords: &[u16]) -> impl Iterator<Item = bool> + '_ {
    codewords
        .iter()
        .flat_map(|&c| (0..10).rev().map(move |i| c >> i & 1 == 1))
}

/// Bit samples of codewords, centred on a ten-sample grid.
pub fn samples(codewords: &[u16]) -> Vec<BitSample> {
    bits(codewords)
        .enumerate()
        .map(|(i, level)| BitSample {
            level,
            center: 10 * i as u64 + 5,
        })
        .collect()
}

pub struct Waveform {
    pub initial: bool,
    pub transitions: Vec<u64>,
}

impl Waveform {
    pub fn edges(&self) -> Edges<'_> {
        Edges::new(self.initial, &self.transitions).unwrap()
    }
}

/// A captured line carrying codewords, framed by a short alternating preamble
/// and postamble. The first codeword bit starts `LEAD + 4` bits in.
pub fn waveform(codewords: &[u16], samples_per_bit: f64) -> Waveform {
    let bits = PREAMBLE
        .into_iter()
        .chain(bits(codewords))
        .chain(POSTAMBLE);

    let mut level = false;
    let mut transitions = vec![];

    for (k, bit) in bits.enumerate() {
        if bit != level {
            transitions.push(LEAD + (k as f64 * samples_per_bit).round() as u64);
            level = bit;
        }
    }

    Waveform {
        initial: false,
        transitions,
    }
}
