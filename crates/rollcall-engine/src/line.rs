//! Line-stream reconstruction
//!
//! Journal roll calls arrive as a flat ordered line stream: motion
//! text over several lines, a "No. <n>" identifier, a timestamp,
//! declared totals, then one column of single-character marks and one
//! column of names. Marks and names are two separately-ordered lists
//! and are zipped positionally at the end; they are never matched by
//! adjacency, because the source prints the whole mark column before
//! the first name.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use rollcall_types::{ReconstructError, VoteCategory};

use crate::adapters::LayoutAdapter;
use crate::patterns;

/// Raw (pre-normalization) result of line reconstruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineExtract {
    pub names_by_category: BTreeMap<VoteCategory, Vec<String>>,
    pub motion_text: String,
    pub timestamp: Option<NaiveDateTime>,
    pub vote_number: Option<u32>,
    /// First-reported totals printed inline with the motion, when the
    /// journal carries them ("(yeas 45 - nays 10)").
    pub inline_totals: Option<BTreeMap<VoteCategory, usize>>,
    /// Totals declared on their own lines ("45 yeas").
    pub declared_totals: BTreeMap<VoteCategory, usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    SeekingMotion,
    SeekingVoteNumber,
    SeekingTimestamp,
    SeekingTotals,
    CollectingBallots,
    Done,
}

/// Finite state machine over one roll call's line stream.
pub struct LineStateParser<'a> {
    adapter: &'a dyn LayoutAdapter,
    state: State,
    motion_parts: Vec<String>,
    motion: Option<String>,
    marks: Vec<char>,
    names: Vec<String>,
    timestamp: Option<NaiveDateTime>,
    vote_number: Option<u32>,
    inline_totals: Option<BTreeMap<VoteCategory, usize>>,
    declared_totals: BTreeMap<VoteCategory, usize>,
}

impl<'a> LineStateParser<'a> {
    pub fn new(adapter: &'a dyn LayoutAdapter) -> Self {
        Self {
            adapter,
            state: State::SeekingMotion,
            motion_parts: Vec::new(),
            motion: None,
            marks: Vec::new(),
            names: Vec::new(),
            timestamp: None,
            vote_number: None,
            inline_totals: None,
            declared_totals: BTreeMap::new(),
        }
    }

    pub fn read_line(&mut self, raw: &str) -> Result<(), ReconstructError> {
        let mut line = raw.trim().to_string();

        // Presiding-officer placeholders are removed from the text
        // before classification; they are not names.
        if let Some(pattern) = self.adapter.presiding_officer() {
            line = pattern.replace_all(&line, "").trim().to_string();
        }

        if self.adapter.is_boilerplate(&line) {
            return Ok(());
        }

        match self.state {
            State::SeekingMotion => self.seek_motion(&line),
            State::SeekingVoteNumber => {
                if let Some(number) = vote_number(&line) {
                    self.vote_number = Some(number);
                    self.state = State::SeekingTimestamp;
                }
                // Anything else between the motion and the identifier
                // is journal chatter.
                Ok(())
            }
            State::SeekingTimestamp | State::SeekingTotals | State::CollectingBallots => {
                self.read_metadata_or_ballot(&line)
            }
            State::Done => Ok(()),
        }
    }

    /// Every non-boilerplate line is motion text until the inline
    /// totals or the vote identifier close the buffer. The identifier
    /// doubles as the SeekingVoteNumber trigger, so that state is
    /// skipped in families whose motions carry no inline totals.
    fn seek_motion(&mut self, line: &str) -> Result<(), ReconstructError> {
        if let Some(caps) = patterns::INLINE_TOTALS.captures(line) {
            let prefix = line[..caps.get(0).map_or(0, |m| m.start())].trim();
            if !prefix.is_empty() {
                self.motion_parts.push(prefix.to_string());
            }
            let yes = caps[1].parse().unwrap_or(0);
            let no = caps[2].parse().unwrap_or(0);
            self.inline_totals = Some(BTreeMap::from([
                (VoteCategory::Yes, yes),
                (VoteCategory::No, no),
            ]));
            self.finalize_motion();
            self.state = State::SeekingVoteNumber;
        } else if let Some(number) = vote_number(line) {
            self.vote_number = Some(number);
            self.finalize_motion();
            self.state = State::SeekingTimestamp;
        } else {
            self.motion_parts.push(line.to_string());
        }
        Ok(())
    }

    fn finalize_motion(&mut self) {
        self.motion = Some(self.motion_parts.join(" "));
        self.motion_parts.clear();
    }

    /// Timestamp, totals, mark, and name lines may interleave; the
    /// machine tolerates out-of-order metadata rather than demanding
    /// the nominal sequence.
    fn read_metadata_or_ballot(&mut self, line: &str) -> Result<(), ReconstructError> {
        for (pattern, category) in self.adapter.totals_vocabulary() {
            if let Some(caps) = pattern.captures(line) {
                if let Ok(count) = caps[1].parse::<usize>() {
                    self.declared_totals.insert(*category, count);
                    if self.state == State::SeekingTimestamp {
                        self.state = State::SeekingTotals;
                    }
                    return Ok(());
                }
            }
        }

        if line.contains(':') {
            if let Ok(when) =
                NaiveDateTime::parse_from_str(line, self.adapter.timestamp_format())
            {
                self.timestamp = Some(when);
                if self.state == State::SeekingTimestamp {
                    self.state = State::SeekingTotals;
                }
                return Ok(());
            }
        }

        // A lone uppercase letter is a vote mark from the family's
        // alphabet; a lone letter outside the alphabet means the
        // document cannot be trusted.
        let mut chars = line.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_uppercase() {
                if self.adapter.mark_alphabet().iter().any(|&(mark, _)| mark == c) {
                    self.marks.push(c);
                    self.state = State::CollectingBallots;
                    return Ok(());
                }
                return Err(ReconstructError::UnknownVoteMark(c.to_string()));
            }
        }

        self.state = State::CollectingBallots;
        self.collect_name(line);
        Ok(())
    }

    fn collect_name(&mut self, line: &str) {
        if let Some(rest) = line.strip_prefix("--") {
            // The extractor sometimes joins two names into one line
            // when the first is dash-decorated: "--Jones-Smith" for
            // "--Jones--" and "Smith".
            self.names
                .extend(rest.split('-').filter(|p| !p.is_empty()).map(str::to_string));
        } else {
            self.names.push(line.replace("--", ""));
        }
    }

    /// Close the stream, zip marks with names, and hand back the raw
    /// extract. A length disagreement is unrecoverable for this
    /// document: there is no way to know which mark pairs with which
    /// name once the counts differ.
    pub fn finish(mut self) -> Result<LineExtract, ReconstructError> {
        if self.marks.len() != self.names.len() {
            return Err(ReconstructError::NameListLengthMismatch {
                marks: self.marks.len(),
                names: self.names.len(),
            });
        }
        self.state = State::Done;

        let mut names_by_category: BTreeMap<VoteCategory, Vec<String>> = BTreeMap::new();
        for (mark, name) in self.marks.iter().zip(self.names.iter()) {
            let category = self
                .adapter
                .mark_alphabet()
                .iter()
                .find(|&&(m, _)| m == *mark)
                .map(|&(_, category)| category)
                .ok_or_else(|| ReconstructError::UnknownVoteMark(mark.to_string()))?;
            names_by_category
                .entry(category)
                .or_default()
                .push(name.clone());
        }

        Ok(LineExtract {
            names_by_category,
            motion_text: self.motion.unwrap_or_else(|| self.motion_parts.join(" ")),
            timestamp: self.timestamp,
            vote_number: self.vote_number,
            inline_totals: self.inline_totals,
            declared_totals: self.declared_totals,
        })
    }
}

/// Parse the whole line stream for one roll call.
pub fn parse_lines(
    adapter: &dyn LayoutAdapter,
    lines: &[String],
) -> Result<LineExtract, ReconstructError> {
    let mut parser = LineStateParser::new(adapter);
    for line in lines {
        parser.read_line(line)?;
    }
    parser.finish()
}

fn vote_number(line: &str) -> Option<u32> {
    patterns::VOTE_NUMBER
        .captures(line)
        .and_then(|caps| caps[1].parse().ok())
}
