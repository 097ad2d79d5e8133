//! Small dataset generators and the big-endian bit encoding they share with
//! the interactive prompt.

use crate::data::training_data::TrainingData;
use crate::error::{MlpError, Result};

/// Widest input a generator enumerates; `2^bits` examples must fit a `u64`.
pub const MAX_INPUT_BITS: usize = 63;

/// Left-padded big-endian binary encoding of `n` in `width` bits.
/// Returns `None` if `n` does not fit.
pub fn to_bits(n: u64, width: usize) -> Option<Vec<f64>> {
    if width < 64 && n >> width != 0 {
        return None;
    }
    Some(
        (0..width)
            .rev()
            .map(|bit| if bit < 64 && (n >> bit) & 1 == 1 { 1.0 } else { 0.0 })
            .collect(),
    )
}

/// Decodes a big-endian bit vector, rounding each component at 0.5.
pub fn from_bits(bits: &[f64]) -> u64 {
    bits.iter().fold(0, |acc, &b| (acc << 1) | u64::from(b > 0.5))
}

fn check_input_bits(bits: usize) -> Result<()> {
    if bits == 0 || bits > MAX_INPUT_BITS {
        return Err(MlpError::Config(format!(
            "input width must be between 1 and {MAX_INPUT_BITS} bits, got {bits}"
        )));
    }
    Ok(())
}

/// Every `bits`-wide number paired with its popcount encoded in `output_size`
/// bits. Fails if the largest popcount, `bits` itself, needs a wider output.
pub fn bit_count(bits: usize, output_size: usize) -> Result<TrainingData> {
    check_input_bits(bits)?;
    if to_bits(bits as u64, output_size).is_none() {
        return Err(MlpError::Config(format!(
            "a popcount of up to {bits} does not fit in {output_size} output bits"
        )));
    }

    let mut inputs = Vec::new();
    let mut outputs = Vec::new();
    for n in 0..(1u64 << bits) {
        inputs.extend(to_bits(n, bits));
        outputs.extend(to_bits(u64::from(n.count_ones()), output_size));
    }
    Ok(TrainingData { input_size: bits, output_size, inputs, outputs })
}

/// Every `bits`-wide number paired with `[n mod 2]`.
pub fn parity(bits: usize) -> Result<TrainingData> {
    check_input_bits(bits)?;

    let mut inputs = Vec::new();
    let mut outputs = Vec::new();
    for n in 0..(1u64 << bits) {
        inputs.extend(to_bits(n, bits));
        outputs.push(vec![(n % 2) as f64]);
    }
    Ok(TrainingData { input_size: bits, output_size: 1, inputs, outputs })
}
