use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MlpError, Result};

/// One (input, target) pair. Components are conceptually 0/1.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingExample {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

impl TrainingExample {
    pub fn new(input: Vec<f64>, target: Vec<f64>) -> Self {
        TrainingExample { input, target }
    }
}

/// The training-data file: declared sizes plus parallel input/output lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingData {
    pub input_size: usize,
    pub output_size: usize,
    pub inputs: Vec<Vec<f64>>,
    pub outputs: Vec<Vec<f64>>,
}

impl TrainingData {
    /// Checks that the lists are parallel and every vector has its declared length.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.len() != self.outputs.len() {
            return Err(MlpError::shape("outputs", self.outputs.len(), self.inputs.len()));
        }
        if let Some(bad) = self.inputs.iter().find(|v| v.len() != self.input_size) {
            return Err(MlpError::shape("inputs", bad.len(), self.input_size));
        }
        if let Some(bad) = self.outputs.iter().find(|v| v.len() != self.output_size) {
            return Err(MlpError::shape("outputs", bad.len(), self.output_size));
        }
        Ok(())
    }

    /// Compares the declared sizes against what a network expects.
    pub fn check_sizes(&self, input_size: usize, output_size: usize) -> Result<()> {
        if self.input_size != input_size {
            return Err(MlpError::shape("inputSize", self.input_size, input_size));
        }
        if self.output_size != output_size {
            return Err(MlpError::shape("outputSize", self.output_size, output_size));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn examples(&self) -> Vec<TrainingExample> {
        self.inputs
            .iter()
            .zip(&self.outputs)
            .map(|(i, o)| TrainingExample::new(i.clone(), o.clone()))
            .collect()
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    /// Loads and validates a training-data file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<TrainingData> {
        let reader = BufReader::new(File::open(path)?);
        let data: TrainingData = serde_json::from_reader(reader)?;
        data.validate()?;
        Ok(data)
    }
}
