use std::collections::HashMap;

use serde::Deserialize;

pub type GeneId = String;
pub type SampleId = String;

/// One record of a per-gene ICE summary file. Only the two columns we need
/// are deserialized; the rest of the upstream report is ignored.
#[derive(Debug, Deserialize)]
pub struct SummaryRow {
    #[serde(rename = "Label")]
    pub label: String,
    #[serde(rename = "ICE")]
    pub ice: String,
}

/// A single efficiency cell, classified once when the file is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Efficiency {
    Present(i64),
    Absent,
}

impl Efficiency {
    pub fn value(self) -> Option<i64> {
        match self {
            Efficiency::Present(v) => Some(v),
            Efficiency::Absent => None,
        }
    }
}

/// Per-sample scores, keyed by gene in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleScores {
    genes: Vec<(GeneId, Efficiency)>,
    index: HashMap<GeneId, usize>,
}

impl SampleScores {
    /// Returns the value that was replaced, if any.
    pub fn insert(&mut self, gene: GeneId, value: Efficiency) -> Option<Efficiency> {
        match self.index.get(&gene) {
            Some(&pos) => Some(std::mem::replace(&mut self.genes[pos].1, value)),
            None => {
                self.index.insert(gene.clone(), self.genes.len());
                self.genes.push((gene, value));
                None
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, gene: &str) -> Option<Efficiency> {
        self.index.get(gene).map(|&pos| self.genes[pos].1)
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Efficiency)> {
        self.genes.iter().map(|(g, v)| (g.as_str(), *v))
    }
}

/// sample -> (gene -> efficiency). Outer and inner keys iterate in the order
/// they were first inserted; re-inserting a (sample, gene) pair overwrites the
/// value without moving it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedTable {
    samples: Vec<(SampleId, SampleScores)>,
    index: HashMap<SampleId, usize>,
}

impl AggregatedTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sample: &str, gene: GeneId, value: Efficiency) -> Option<Efficiency> {
        self.scores_mut(sample).insert(gene, value)
    }

    /// Scores for `sample`, appended to the end of the table if it is new.
    pub fn scores_mut(&mut self, sample: &str) -> &mut SampleScores {
        let pos = match self.index.get(sample) {
            Some(&pos) => pos,
            None => {
                self.index.insert(sample.to_string(), self.samples.len());
                self.samples.push((sample.to_string(), SampleScores::default()));
                self.samples.len() - 1
            }
        };
        &mut self.samples[pos].1
    }

    #[cfg(test)]
    pub fn get(&self, sample: &str, gene: &str) -> Option<Efficiency> {
        self.sample(sample).and_then(|scores| scores.get(gene))
    }

    pub fn sample(&self, sample: &str) -> Option<&SampleScores> {
        self.index.get(sample).map(|&pos| &self.samples[pos].1)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SampleScores)> {
        self.samples.iter().map(|(s, scores)| (s.as_str(), scores))
    }

    pub fn sample_ids(&self) -> Vec<&str> {
        self.samples.iter().map(|(s, _)| s.as_str()).collect()
    }
}

/// Union of gene keys across `samples`, in first-seen order.
pub fn gene_categories<'a, I>(samples: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a SampleScores>,
{
    let mut seen = std::collections::HashSet::new();
    let mut genes = Vec::new();
    for scores in samples {
        for (gene, _) in scores.iter() {
            if seen.insert(gene) {
                genes.push(gene);
            }
        }
    }
    genes
}
