#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = bmpdecode::Limits {
        max_pixels: Some(1 << 22),
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };

    // Must never panic; when both succeed they must agree on dimensions.
    let config = bmpdecode::decode_config(&mut &data[..]);
    let decoded = bmpdecode::DecodeRequest::new(&mut &data[..])
        .with_limits(&limits)
        .decode(enough::Unstoppable);

    if let (Ok(config), Ok(image)) = (config, decoded) {
        assert_eq!(config.width, image.width());
        assert_eq!(config.height, image.height());
        assert_eq!(config.color_model, image.color_model());
    }
});
