use crate::core::line_reader::{LineReader, DEFAULT_MAX_LINE_BYTES};
use crate::domain::model::PatternConfig;
use crate::utils::error::{CounterError, Result};
use regex::bytes::Regex;
use std::borrow::Cow;
use std::io::{BufReader, Read};

const READ_BUFFER_BYTES: usize = 64 * 1024;

/// Compiled markers and exclusion rules for one counter.
#[derive(Debug, Clone)]
pub struct CounterConfig {
    start: Regex,
    end: Regex,
    exclusions: Vec<Regex>,
    max_line_bytes: usize,
}

impl CounterConfig {
    pub fn new(start: Regex, end: Regex) -> Self {
        Self {
            start,
            end,
            exclusions: Vec::new(),
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }

    pub fn with_exclusion(mut self, rule: Regex) -> Self {
        self.exclusions.push(rule);
        self
    }

    pub fn with_max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.max_line_bytes = max_line_bytes;
        self
    }

    /// Compiles every pattern, naming the offending field on failure.
    pub fn compile(patterns: &PatternConfig, max_line_bytes: usize) -> Result<Self> {
        let start = compile_pattern("markers.start", &patterns.start)?;
        let end = compile_pattern("markers.end", &patterns.end)?;

        let mut config = Self::new(start, end).with_max_line_bytes(max_line_bytes);
        for (index, pattern) in patterns.exclude.iter().enumerate() {
            let rule = compile_pattern(&format!("exclude.patterns[{}]", index), pattern)?;
            config = config.with_exclusion(rule);
        }
        Ok(config)
    }

    pub fn exclusions(&self) -> &[Regex] {
        &self.exclusions
    }

    pub fn max_line_bytes(&self) -> usize {
        self.max_line_bytes
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self::compile(&PatternConfig::default(), DEFAULT_MAX_LINE_BYTES)
            .expect("built-in patterns are valid")
    }
}

fn compile_pattern(field: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| CounterError::PatternError {
        field: field.to_string(),
        source,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    OutsideRegion,
    InsideRegion,
}

/// Counts the code points between the start and end markers of a document.
#[derive(Debug, Clone, Default)]
pub struct RegionCounter {
    config: CounterConfig,
}

impl RegionCounter {
    pub fn new(config: CounterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    /// Scans `reader` once and returns the filtered length of the region.
    ///
    /// Only the first region is counted: scanning stops at the first end
    /// marker after the start marker. A missing start marker yields 0 and a
    /// missing end marker counts up to end of stream. Any read failure
    /// discards the running total.
    pub fn count<R: Read>(&self, reader: R) -> Result<usize> {
        let buffered = BufReader::with_capacity(READ_BUFFER_BYTES, reader);
        let mut lines = LineReader::new(buffered, self.config.max_line_bytes);
        let mut state = ScanState::OutsideRegion;
        let mut total = 0usize;

        while let Some((number, line)) = lines.next_line()? {
            match state {
                ScanState::OutsideRegion => {
                    if self.config.start.is_match(line) {
                        tracing::trace!(line = number, "region opened");
                        state = ScanState::InsideRegion;
                    }
                }
                ScanState::InsideRegion => {
                    // a repeated start marker neither restarts nor counts
                    if self.config.start.is_match(line) {
                        continue;
                    }
                    if self.config.end.is_match(line) {
                        tracing::trace!(line = number, "region closed");
                        break;
                    }
                    total += self.measure(number, line)?;
                }
            }
        }

        Ok(total)
    }

    /// Applies the exclusion rules in order and returns the remaining code point count.
    fn measure(&self, number: usize, line: &[u8]) -> Result<usize> {
        let filtered = self.filter(line);
        std::str::from_utf8(&filtered)
            .map(|text| text.chars().count())
            .map_err(|_| CounterError::DecodeError { line: number })
    }

    /// Each rule is reapplied until the line stops shrinking, so a deletion
    /// that exposes a new match (an emptied outer command) is also removed.
    fn filter<'a>(&self, line: &'a [u8]) -> Cow<'a, [u8]> {
        self.config
            .exclusions
            .iter()
            .fold(Cow::Borrowed(line), |mut current, rule| {
                loop {
                    let replaced = match rule.replace_all(&current, &b""[..]) {
                        Cow::Owned(bytes) if bytes.len() < current.len() => Some(bytes),
                        _ => None,
                    };
                    match replaced {
                        Some(bytes) => current = Cow::Owned(bytes),
                        None => break current,
                    }
                }
            })
    }
}
