//! Embedded validator modules.
//!
//! Each stage that checks its digit in the sandbox carries its own module,
//! stored in a different way so that recovering one says little about the next.

/// Stage 2, handed to the sandbox by reference. Exports `oh_no`.
pub const STAGE_TWO_MODULE: &[u8] = &[
    0, 97, 115, 109, 1, 0, 0, 0, 1, 134, 128, 128, 128, 0, 1, 96,
    1, 127, 1, 127, 3, 130, 128, 128, 128, 0, 1, 0, 4, 132, 128, 128,
    128, 0, 1, 112, 0, 0, 5, 131, 128, 128, 128, 0, 1, 0, 1, 6,
    129, 128, 128, 128, 0, 0, 7, 146, 128, 128, 128, 0, 2, 6, 109, 101,
    109, 111, 114, 121, 2, 0, 5, 111, 104, 95, 110, 111, 0, 0, 10, 141,
    128, 128, 128, 0, 1, 135, 128, 128, 128, 0, 0, 32, 0, 65, 9, 70,
    11,
];

/// Stage 3, copied into a staging buffer before decoding. Exports `_oh_no`.
pub const STAGE_THREE_MODULE: &[u8] = &[
    0x00, 0x61, 0x73, 0x6d, 0x01, 0x00, 0x00, 0x00, 0x01, 0x06, 0x01, 0x60,
    0x01, 0x7f, 0x01, 0x7f, 0x03, 0x02, 0x01, 0x00, 0x07, 0x0a, 0x01, 0x06,
    0x5f, 0x6f, 0x68, 0x5f, 0x6e, 0x6f, 0x00, 0x00, 0x0a, 0x09, 0x01, 0x07,
    0x00, 0x20, 0x00, 0x41, 0x04, 0x46, 0x0b,
];

/// Stage 4, XOR-obscured with `STATIC_XOR_KEY`. Exports `oh_no`.
pub const STAGE_FOUR_OBSCURED: &[u8] = &[
    170, 203, 217, 199, 171, 170, 170, 170, 171, 44, 42, 42, 42, 170, 171, 202,
    171, 213, 171, 213, 169, 40, 42, 42, 42, 170, 171, 170, 174, 46, 42, 42,
    42, 170, 171, 218, 170, 170, 175, 41, 42, 42, 42, 170, 171, 170, 171, 172,
    43, 42, 42, 42, 170, 170, 173, 56, 42, 42, 42, 170, 168, 172, 199, 207,
    199, 197, 216, 211, 168, 170, 175, 197, 194, 245, 196, 197, 170, 170, 160, 39,
    42, 42, 42, 170, 171, 45, 42, 42, 42, 170, 170, 138, 170, 235, 173, 236,
    161,
];

/// Single-byte transform used to decode `STAGE_FIVE_OBSCURED`. Exports `lolwat`.
pub const XOR_ORACLE_MODULE: &[u8] = &[
    0, 97, 115, 109, 1, 0, 0, 0, 1, 134, 128, 128, 128, 0, 1, 96,
    1, 127, 1, 127, 3, 130, 128, 128, 128, 0, 1, 0, 4, 132, 128, 128,
    128, 0, 1, 112, 0, 0, 5, 131, 128, 128, 128, 0, 1, 0, 1, 6,
    129, 128, 128, 128, 0, 0, 7, 147, 128, 128, 128, 0, 2, 6, 109, 101,
    109, 111, 114, 121, 2, 0, 6, 108, 111, 108, 119, 97, 116, 0, 0, 10,
    142, 128, 128, 128, 0, 1, 136, 128, 128, 128, 0, 0, 32, 0, 65, 187,
    1, 115, 11,
];

/// Stage 5, obscured with `ORACLE_XOR_KEY` and only readable through the oracle. Exports `wetsand`.
pub const STAGE_FIVE_OBSCURED: &[u8] = &[
    187, 218, 200, 214, 186, 187, 187, 187, 186, 61, 59, 59, 59, 187, 186, 219,
    186, 196, 186, 196, 184, 57, 59, 59, 59, 187, 186, 187, 191, 63, 59, 59,
    59, 187, 186, 203, 187, 187, 190, 56, 59, 59, 59, 187, 186, 187, 186, 189,
    58, 59, 59, 59, 187, 187, 188, 47, 59, 59, 59, 187, 185, 189, 214, 222,
    214, 212, 201, 194, 185, 187, 188, 204, 222, 207, 200, 218, 213, 223, 187, 187,
    177, 54, 59, 59, 59, 187, 186, 60, 59, 59, 59, 187, 187, 155, 187, 250,
    191, 253, 176,
];

/// Installed behind the trap hook. `_stage_one` is a bare `unreachable`.
pub const TRAP_MODULE: &[u8] = &[
    0x00, 0x61, 0x73, 0x6d, 0x01, 0x00, 0x00, 0x00, 0x01, 0x06, 0x01, 0x60,
    0x01, 0x7f, 0x01, 0x7f, 0x03, 0x02, 0x01, 0x00, 0x07, 0x0e, 0x01, 0x0a,
    0x5f, 0x73, 0x74, 0x61, 0x67, 0x65, 0x5f, 0x6f, 0x6e, 0x65, 0x00, 0x00,
    0x0a, 0x05, 0x01, 0x03, 0x00, 0x00, 0x0b,
];
