use crate::{Error, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;

/// Label the sampler gives to pixels nobody painted. These never reach training
pub const BACKGROUND_LABEL: &str = "Unlabled";

/// A labeled point in normalized canvas coordinates
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

impl Sample {
    pub fn new(x: f64, y: f64, label: impl Into<String>) -> Sample {
        Sample {
            x,
            y,
            label: label.into(),
        }
    }

    pub fn is_background(&self) -> bool {
        self.label == BACKGROUND_LABEL
    }
}

/// Read samples from a CSV file with an `x,y,label` header
pub fn parse_samples(path: &str) -> Result<Vec<Sample>> {
    read_samples(File::open(path)?)
}

/// Read samples from any CSV source with an `x,y,label` header.
/// Coordinates must lie in [0, 1]
pub fn read_samples<R: Read>(reader: R) -> Result<Vec<Sample>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut samples = vec![];

    for (line, record) in reader.deserialize().enumerate() {
        let sample: Sample = record?;

        if !((0f64..=1f64).contains(&sample.x) && (0f64..=1f64).contains(&sample.y)) {
            return Err(Error::InvalidInput(format!(
                "sample {} at ({}, {}) lies outside the unit square",
                line, sample.x, sample.y
            )));
        }

        samples.push(sample);
    }

    Ok(samples)
}

/// Drop background samples
pub fn labeled(samples: &[Sample]) -> Vec<&Sample> {
    samples.iter().filter(|s| !s.is_background()).collect()
}

/// Share of each label in percent, in order of first appearance
pub fn class_distribution(samples: &[Sample]) -> Vec<(String, f64)> {
    let mut counts: Vec<(String, usize)> = vec![];

    for sample in samples {
        match counts.iter_mut().find(|(label, _)| *label == sample.label) {
            Some((_, count)) => *count += 1,
            None => counts.push((sample.label.clone(), 1)),
        }
    }

    counts
        .into_iter()
        .map(|(label, count)| (label, count as f64 / samples.len() as f64 * 100f64))
        .collect()
}
