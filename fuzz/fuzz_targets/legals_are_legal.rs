#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use ruleboard::{Move, Position, Variant, VariantPosition};

#[derive(Debug, Arbitrary)]
struct Data {
    variant: Variant,
    choices: Vec<u8>,
    candidate: Move,
}

fuzz_target!(|data: Data| {
    let mut pos = VariantPosition::new(data.variant);
    for choice in data.choices.into_iter().take(40) {
        let legals = pos.legal_moves();
        if legals.is_empty() {
            break;
        }
        pos.play_unchecked(legals[usize::from(choice) % legals.len()]);
    }

    let legals = pos.legal_moves();
    assert_eq!(
        legals.contains(&data.candidate),
        pos.is_legal(data.candidate)
    );
    assert!(legals.iter().all(|&m| pos.is_legal(m)));
    assert_eq!(legals.is_empty(), !pos.has_any_legal_moves());
});
