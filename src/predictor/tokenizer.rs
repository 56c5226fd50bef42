//! Character-level vocabulary fitted on the reference color-name corpus.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use indexmap::IndexMap;
use thiserror::Error;

/// Longest name prefix (in characters) fed to the model.
pub const DEFAULT_MAX_LEN: usize = 25;
const NAME_COLUMN: &str = "name";

/// Result alias for tokenizer construction.
pub type TokenizerResult<T> = Result<T, TokenizerError>;

/// Failures raised while fitting the vocabulary.
#[derive(Debug, Error)]
pub enum TokenizerError {
    /// Corpus file could not be opened or read.
    #[error("failed to read name corpus `{path}`")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// Corpus header does not declare a `name` column.
    #[error("name corpus has no `name` column")]
    MissingNameColumn,
    /// No name in the corpus contributed a single character.
    #[error("name corpus is empty")]
    EmptyCorpus,
    /// Sequence length must be at least one character.
    #[error("maximum name length must be positive")]
    InvalidMaxLength,
}

/// Immutable lookup table mapping characters to one-hot classes.
///
/// Index `0` is reserved for padding. The remaining indices follow descending character
/// frequency in the corpus, ties keeping first-seen order.
#[derive(Debug, Clone)]
pub struct NameTokenizer {
    index: IndexMap<char, usize>,
    max_len: usize,
    num_classes: usize,
}

impl NameTokenizer {
    /// Fit the vocabulary on `names`.
    pub fn fit<I, S>(names: I, max_len: usize) -> TokenizerResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if max_len == 0 {
            return Err(TokenizerError::InvalidMaxLength);
        }

        let lowered = names
            .into_iter()
            .map(|name| name.as_ref().to_lowercase())
            .collect::<Vec<_>>();

        let mut counts: IndexMap<char, usize> = IndexMap::new();
        for c in lowered.iter().flat_map(|name| name.chars()) {
            *counts.entry(c).or_insert(0) += 1;
        }
        if counts.is_empty() {
            return Err(TokenizerError::EmptyCorpus);
        }

        // Stable sort keeps first-seen order among equally frequent characters.
        counts.sort_by(|_, left, _, right| right.cmp(left));
        let index = counts
            .keys()
            .enumerate()
            .map(|(position, c)| (*c, position + 1))
            .collect::<IndexMap<_, _>>();

        let mut tokenizer = Self {
            index,
            max_len,
            num_classes: 0,
        };
        let largest = lowered
            .iter()
            .filter_map(|name| tokenizer.pad(tokenizer.lookup(name)).into_iter().max())
            .max()
            .unwrap_or(0);
        tokenizer.num_classes = largest + 1;

        Ok(tokenizer)
    }

    /// Fit the vocabulary on the `name` column of a CSV file.
    pub fn from_csv_path(path: impl AsRef<Path>, max_len: usize) -> TokenizerResult<Self> {
        let path = path.as_ref();
        let io_error = |source: std::io::Error| TokenizerError::Io {
            path: path.display().to_string(),
            source,
        };
        let file = File::open(path).map_err(io_error)?;
        Self::from_csv_reader(BufReader::new(file), max_len).map_err(|err| match err {
            TokenizerError::Io { source, .. } => io_error(source),
            other => other,
        })
    }

    /// Fit the vocabulary on the `name` column of CSV text.
    pub fn from_csv_reader(reader: impl BufRead, max_len: usize) -> TokenizerResult<Self> {
        let mut lines = reader.lines();
        let header = match lines.next() {
            Some(line) => line.map_err(|source| TokenizerError::Io {
                path: String::new(),
                source,
            })?,
            None => return Err(TokenizerError::MissingNameColumn),
        };
        let column = split_record(header.trim_start_matches('\u{feff}'))
            .iter()
            .position(|field| field.trim() == NAME_COLUMN)
            .ok_or(TokenizerError::MissingNameColumn)?;

        let mut names = Vec::new();
        let mut record = String::new();
        for line in lines {
            let line = line.map_err(|source| TokenizerError::Io {
                path: String::new(),
                source,
            })?;
            if !record.is_empty() {
                record.push('\n');
            }
            record.push_str(&line);
            // A quoted field is still open: the record continues on the next line.
            if record.matches('"').count() % 2 == 1 {
                continue;
            }
            let complete = std::mem::take(&mut record);
            if complete.trim().is_empty() {
                continue;
            }
            if let Some(name) = split_record(&complete).into_iter().nth(column) {
                names.push(name);
            }
        }
        if !record.trim().is_empty() {
            names.extend(split_record(&record).into_iter().nth(column));
        }

        Self::fit(names, max_len)
    }

    /// Number of characters kept per name.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Width of a one-hot row, padding class included.
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Number of distinct characters in the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.index.len()
    }

    /// Class of `c`, if the corpus contained it.
    pub fn index_of(&self, c: char) -> Option<usize> {
        self.index.get(&c).copied()
    }

    /// Map a name to class indices, dropping characters outside the vocabulary.
    ///
    /// Characters that only ever appeared in corpus prefixes removed by truncation have an
    /// index past the one-hot width; they are dropped too.
    pub fn encode(&self, name: &str) -> Vec<usize> {
        self.lookup(name)
            .into_iter()
            .filter(|class| *class < self.num_classes)
            .collect()
    }

    fn lookup(&self, name: &str) -> Vec<usize> {
        name.to_lowercase()
            .chars()
            .filter_map(|c| self.index_of(c))
            .collect()
    }

    /// Keep the last `max_len` indices and left-pad with zeros to exactly `max_len`.
    pub fn pad(&self, sequence: Vec<usize>) -> Vec<usize> {
        let kept = &sequence[sequence.len().saturating_sub(self.max_len)..];
        let mut padded = vec![0; self.max_len - kept.len()];
        padded.extend_from_slice(kept);
        padded
    }

    /// One-hot tensor of shape `max_len x num_classes` for `name`.
    pub fn one_hot(&self, name: &str) -> Vec<Vec<f32>> {
        self.pad(self.encode(name))
            .into_iter()
            .map(|class| {
                let mut row = vec![0.0; self.num_classes];
                if let Some(slot) = row.get_mut(class) {
                    *slot = 1.0;
                }
                row
            })
            .collect()
    }
}

/// Split one CSV record, honouring double-quoted fields and `""` escapes.
///
/// The record may span several physical lines when a quoted field holds a line break.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, quoted) {
            ('"', true) if chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            ('"', _) => quoted = !quoted,
            (',', false) => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}
