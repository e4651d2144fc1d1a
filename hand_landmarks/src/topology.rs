//! MediaPipe 21-point hand topology.

pub const WRIST:            u8 = 0;
pub const THUMB_TIP:        u8 = 4;
pub const INDEX_FINGER_TIP: u8 = 8;

/// Landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

/// Bones drawn when annotating a hand, as `(from, to)` landmark ids.
pub const HAND_CONNECTIONS: [(u8, u8); 21] = [
    // palm
    (0, 1), (0, 5), (9, 13), (13, 17), (5, 9), (0, 17),
    // thumb
    (1, 2), (2, 3), (3, 4),
    // index
    (5, 6), (6, 7), (7, 8),
    // middle
    (9, 10), (10, 11), (11, 12),
    // ring
    (13, 14), (14, 15), (15, 16),
    // pinky
    (17, 18), (18, 19), (19, 20),
];
