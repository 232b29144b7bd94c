use pairs_core::Seconds;

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// `m:ss`
pub(crate) fn format_clock(secs: Seconds) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Columns of the smallest square-ish grid that fits `cards`.
pub(crate) fn grid_columns(cards: usize) -> usize {
    let mut columns = 1;
    while columns * columns < cards {
        columns += 1;
    }
    columns
}
