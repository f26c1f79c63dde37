#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must also encode and decode again
    if let Ok(surface) = surfdnm::parser::parse_surf_reader(data, "fuzz.srf") {
        if let Ok(text) = surface.to_surf_string() {
            let _ = surfdnm::parser::parse_surf(&text, "fuzz.srf");
        }
    }
});
