use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{MlpError, Result};
use crate::network::network::Network;

/// On-disk form of a [`Network`]: sizes plus nested weight rows.
///
/// Field names follow the model-file schema (`inputSize`, `weightsIh`, ...),
/// so snapshots written by older tooling load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkState {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
    pub weights_ih: Vec<Vec<f64>>,
    pub biases_h: Vec<f64>,
    pub weights_ho: Vec<Vec<f64>>,
    pub biases_o: Vec<f64>,
}

impl From<&Network> for NetworkState {
    fn from(net: &Network) -> Self {
        NetworkState {
            input_size: net.input_size,
            hidden_size: net.hidden_size,
            output_size: net.output_size,
            weights_ih: net.weights_ih.data.clone(),
            biases_h: net.biases_h.clone(),
            weights_ho: net.weights_ho.data.clone(),
            biases_o: net.biases_o.clone(),
        }
    }
}

impl TryFrom<NetworkState> for Network {
    type Error = MlpError;

    fn try_from(state: NetworkState) -> Result<Network> {
        Network::from_parts(
            state.input_size,
            state.hidden_size,
            state.output_size,
            state.weights_ih,
            state.biases_h,
            state.weights_ho,
            state.biases_o,
        )
        .map_err(|e| match e {
            MlpError::ShapeMismatch { what, got, expected } => MlpError::Format(format!(
                "{what} has {got} entries where the declared sizes require {expected}"
            )),
            other => other,
        })
    }
}

impl Network {
    /// Serializes the network to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&NetworkState::from(self))?)
    }

    /// Parses a network from JSON. Missing fields, unparsable content and
    /// inconsistent dimensions are all `Format` errors.
    pub fn from_json(json: &str) -> Result<Network> {
        let state: NetworkState =
            serde_json::from_str(json).map_err(|e| MlpError::Format(e.to_string()))?;
        Network::try_from(state)
    }

    /// Writes a pretty-printed JSON snapshot, replacing whatever is at `path`.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &NetworkState::from(self))?;
        debug!("network saved to {}", path.display());
        Ok(())
    }

    /// Loads a network previously written by [`Network::save_json`].
    pub fn load_json(path: impl AsRef<Path>) -> Result<Network> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let state: NetworkState =
            serde_json::from_reader(reader).map_err(|e| MlpError::Format(e.to_string()))?;
        Network::try_from(state)
    }
}
