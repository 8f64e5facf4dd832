#![no_main]

use libfuzzer_sys::fuzz_target;
use ruleboard::{uci::Uci, Dimensions};

fuzz_target!(|data: &[u8]| {
    for dims in [Dimensions::CHESS, Dimensions::XIANGQI] {
        let Ok(uci) = Uci::from_ascii(data, dims) else {
            continue;
        };
        let roundtripped =
            Uci::from_ascii(uci.display(dims).to_string().as_bytes(), dims).expect("roundtrip");
        assert_eq!(uci, roundtripped);
    }
});
