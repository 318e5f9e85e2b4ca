mod support;

use disparate::sans::{
    Decoder,
    disparity::{RunningDisparity, Violation},
    symbol::{Kind, Symbol},
    sync::Synchronized,
    table::{Codeword, Octet},
    window::{BitSample, Window},
};
use either::Either::{Left, Right};

const HALF_BIT: u64 = 5;

fn synchronize(samples: &[BitSample]) -> Option<(Symbol, Synchronized, usize)> {
    let mut state = Decoder::new(HALF_BIT);

    for (i, &sample) in samples.iter().enumerate() {
        state = match state.advance(sample) {
            Left(state) => state,
            Right((symbol, state)) => return Some((symbol, state, i + 1)),
        };
    }

    None
}

#[test]
fn no_false_lock() {
    for raw in 0..1024 {
        let codeword = Codeword::new(raw);
        let found = synchronize(&support::samples(&[raw]));
        assert_eq!(found.is_some(), codeword.is_comma(), "{raw:#012b}");
    }
}

#[test]
fn lock_on_either_comma() {
    for comma in [Codeword::COMMA_MINUS, Codeword::COMMA_PLUS] {
        let (symbol, _, consumed) = synchronize(&support::samples(&[comma.raw()])).unwrap();

        assert_eq!(consumed, 10);
        assert_eq!(symbol.kind, Kind::Control);
        assert_eq!(symbol.octet(), Some(Octet::K28_5));
        assert_eq!(symbol.value(), 0x1BC);
        assert_eq!(symbol.violation, None);
        assert_eq!((symbol.start, symbol.end), (0, 100));
    }
}

#[test]
fn lock_mid_stream() {
    // Four stray bits ahead of the comma.
    let mut samples = support::samples(&[0b1010, Codeword::COMMA_MINUS.raw()]);
    samples.drain(..6);

    let (symbol, _, consumed) = synchronize(&samples).unwrap();
    assert_eq!(consumed, 14);
    assert_eq!(symbol.start, 100);
}

#[test]
fn ten_bit_cadence() {
    let codewords = [0x0FA, 0x18B, 0x189, 0x0FA];
    let samples = support::samples(&codewords);
    let (_, mut state, consumed) = synchronize(&samples).unwrap();

    let mut symbols = vec![];
    for (i, &sample) in samples[consumed..].iter().enumerate() {
        let (symbol, next) = state.advance(sample);
        state = next;

        assert_eq!(symbol.is_some(), (i + 1) % 10 == 0);
        symbols.extend(symbol);
    }

    assert_eq!(symbols.len(), 3);
    assert_eq!(symbols[0].value(), 0x000);
    assert_eq!(symbols[1].value(), 0x020);

    // A later comma is just another control character.
    assert_eq!(symbols[2].kind, Kind::Control);
    assert_eq!(symbols[2].value(), 0x1BC);

    let starts: Vec<u64> = symbols.iter().map(|s| s.start).collect();
    assert_eq!(starts, [100, 200, 300]);
}

#[test]
fn running_disparity_follows_symbols() {
    let codewords = [0x0FA, 0x18B, 0x189];
    let samples = support::samples(&codewords);
    let (first, mut state, _) = synchronize(&samples).unwrap();

    let mut running = vec![first.running_disparity];
    for &sample in &samples[10..] {
        let (symbol, next) = state.advance(sample);
        state = next;
        running.extend(symbol.map(|s| s.running_disparity));
    }

    assert_eq!(
        running,
        [
            RunningDisparity::Positive,
            RunningDisparity::Positive,
            RunningDisparity::Negative
        ]
    );
    assert_eq!(
        state.validator().running_disparity(),
        RunningDisparity::Negative
    );
}

#[test]
fn violation_is_annotated() {
    let samples = support::samples(&[0x0FA, 0x18B, 0x279]);
    let (_, mut state, _) = synchronize(&samples).unwrap();

    let mut symbols = vec![];
    for &sample in &samples[10..] {
        let (symbol, next) = state.advance(sample);
        state = next;
        symbols.extend(symbol);
    }

    assert_eq!(symbols[0].violation, None);
    assert_eq!(symbols[1].violation, Some(Violation::ExcessOnes));
    assert_eq!(symbols[1].kind, Kind::Data);
    assert_eq!(symbols[1].value(), 0x020);
}

#[test]
fn window() {
    let mut window = Window::new();
    assert!(window.is_empty());

    for sample in support::samples(&[0x0FA]) {
        window.push(sample);
    }

    assert!(window.is_full());
    assert_eq!(window.codeword(), Codeword::COMMA_MINUS);
    assert_eq!(window.span(5), (0, 100));

    window.push(BitSample {
        level: true,
        center: 105,
    });
    assert_eq!(window.len(), 10);
    assert_eq!(window.codeword().raw(), 0b0111110101);
    assert_eq!(window.span(5), (10, 110));

    window.clear();
    assert!(window.is_empty());
}
