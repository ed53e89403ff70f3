use crate::error::WordleResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// One submission: the answers a single participant entered, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    #[serde(default)]
    pub answers: Vec<String>,
}

/// The payload served by `/api/fetch_answer/{branch}`: records keyed by an opaque
/// submitter id. Document order is preserved so aggregation is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct AnswerFile {
    records: Vec<(String, AnswerRecord)>,
}

impl TryFrom<Map<String, Value>> for AnswerFile {
    type Error = serde_json::Error;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let records = map
            .into_iter()
            .map(|(id, value)| Ok((id, serde_json::from_value(value)?)))
            .collect::<Result<Vec<_>, serde_json::Error>>()?;
        Ok(Self { records })
    }
}

impl AnswerFile {
    pub fn from_records<I, S>(records: I) -> Self
    where
        I: IntoIterator<Item = (S, AnswerRecord)>,
        S: Into<String>,
    {
        Self {
            records: records
                .into_iter()
                .map(|(id, rec)| (id.into(), rec))
                .collect(),
        }
    }

    pub fn from_json_str(s: &str) -> WordleResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> WordleResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn records(&self) -> impl Iterator<Item = &AnswerRecord> {
        self.records.iter().map(|(_, rec)| rec)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

impl WordCount {
    pub fn new(word: impl Into<String>, count: usize) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Counts exact (case-sensitive, untrimmed) answer strings across all records.
/// Output follows the order in which each word first appears.
pub fn aggregate<'a, I>(records: I) -> Vec<WordCount>
where
    I: IntoIterator<Item = &'a AnswerRecord>,
{
    let mut slots: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<WordCount> = Vec::new();

    for record in records {
        for answer in &record.answers {
            match slots.get(answer.as_str()) {
                Some(&idx) => counts[idx].count += 1,
                None => {
                    slots.insert(answer.as_str(), counts.len());
                    counts.push(WordCount::new(answer.as_str(), 1));
                }
            }
        }
    }

    counts
}

/// Total number of answers represented by a frequency table.
pub fn total(counts: &[WordCount]) -> usize {
    counts.iter().map(|c| c.count).sum()
}
