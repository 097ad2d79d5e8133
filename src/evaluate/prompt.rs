use std::io::{self, BufRead, Write};

use crate::data::to_bits;
use crate::network::Network;

/// Line that ends the prompt.
pub const EXIT_SENTINEL: &str = "e";

/// Reads decimal numbers line by line, encodes each as `input_bits` bits and
/// prints the network's rounded and raw outputs. Stops at `e` or end of input.
pub fn run_prompt<R, W>(
    network: &Network,
    input_bits: usize,
    input: R,
    mut out: W,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "Input bit amount: {input_bits}, Output size: {}", network.output_size)?;
    writeln!(out, "Type '{EXIT_SENTINEL}' to exit.")?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line == EXIT_SENTINEL {
            break;
        }
        if line.is_empty() {
            continue;
        }

        let Ok(n) = line.parse::<u64>() else {
            writeln!(out, "Not a number: {line}")?;
            continue;
        };
        let Some(bits) = to_bits(n, input_bits) else {
            writeln!(out, "{n} does not fit in {input_bits} bits")?;
            continue;
        };

        let prediction = match network.forward(&bits) {
            Ok(p) => p,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };
        let encoded: String = bits.iter().map(|&b| if b > 0.5 { '1' } else { '0' }).collect();
        let rounded: Vec<String> =
            prediction.iter().map(|p| format!("{}", p.round() as i64)).collect();
        let raw: Vec<String> = prediction.iter().map(|p| p.to_string()).collect();

        writeln!(out, "Input: {encoded}")?;
        writeln!(out, "Raw info  R: {}", rounded.join(", "))?;
        writeln!(out, "Raw info nR: {}", raw.join(", "))?;
    }
    Ok(())
}
