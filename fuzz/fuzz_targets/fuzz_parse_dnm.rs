#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Batch decoding
    let _ = surfdnm::parser::parse_dnm_reader(data);

    // Streaming decoding must stop cleanly after the first error
    for record in surfdnm::streaming::DnmReader::new(data) {
        if record.is_err() {
            break;
        }
    }
});
