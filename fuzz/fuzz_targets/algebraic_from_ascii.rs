#![no_main]

use libfuzzer_sys::fuzz_target;
use ruleboard::Dimensions;

fuzz_target!(|data: &[u8]| {
    for dims in [Dimensions::CHESS, Dimensions::XIANGQI] {
        if let Ok(square) = dims.parse_algebraic_ascii(data) {
            let name = dims.algebraic(square).expect("on board");
            assert_eq!(name.as_bytes(), data);
        }
    }
});
