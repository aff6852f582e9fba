//! Viridis colour ramp shared by the interactive and static charts.

const VIRIDIS: [(u8, u8, u8); 10] = [
    (68, 1, 84),
    (72, 40, 120),
    (62, 74, 137),
    (49, 104, 142),
    (38, 130, 142),
    (31, 158, 137),
    (53, 183, 121),
    (109, 205, 89),
    (180, 222, 44),
    (253, 231, 37),
];

/// Line colour for yearly counts
pub const LINE_RGB: (u8, u8, u8) = (31, 119, 180);

/// Colour `index` of `count` evenly spaced samples along the ramp.
pub fn viridis(index: usize, count: usize) -> (u8, u8, u8) {
    if count <= 1 {
        return VIRIDIS[0];
    }
    let pos = index.min(count - 1) as f64 / (count - 1) as f64;
    VIRIDIS[(pos * (VIRIDIS.len() - 1) as f64).round() as usize]
}
