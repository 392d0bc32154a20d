//! Line-oriented prompts.
//!
//! Questions go to the writer (stderr in the binary) so stdout stays clean for `--print`.
//! Answers given on the command line are queued as presets and consumed before the terminal is
//! asked anything.

use problem_report::{Prompter, SaveFilter};
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// An answer supplied ahead of time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetAnswer {
    /// Index for the next `pick`.
    Pick(usize),
    /// Text for the next `input`.
    Input(String),
    /// Destination for the next save dialog.
    SavePath(PathBuf),
}

/// Prompts on a reader/writer pair.
pub struct TerminalPrompter<R, W> {
    reader: R,
    writer: W,
    presets: VecDeque<PresetAnswer>,
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    /// Create a prompter.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            presets: VecDeque::new(),
        }
    }

    /// Queue answers consumed, in order, by matching prompts.
    pub fn with_presets(mut self, presets: impl IntoIterator<Item = PresetAnswer>) -> Self {
        self.presets.extend(presets);
        self
    }

    /// The writer, e.g. to inspect what was asked.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    // EOF and I/O errors both read as a cancelled prompt.
    fn read_answer(&mut self) -> Option<String> {
        let _ = self.writer.flush();
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(err) => {
                log::warn!("prompt read failed: {err}");
                None
            }
        }
    }

    fn say(&mut self, text: &str) {
        if let Err(err) = writeln!(self.writer, "{text}") {
            log::warn!("prompt write failed: {err}");
        }
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn pick(&mut self, placeholder: &str, options: &[&str]) -> Option<usize> {
        if let Some(PresetAnswer::Pick(index)) = self.presets.front() {
            let index = *index;
            self.presets.pop_front();
            return (index < options.len()).then_some(index);
        }

        self.say(placeholder);
        for (i, option) in options.iter().enumerate() {
            self.say(&format!("  {}) {option}", i + 1));
        }
        let _ = write!(self.writer, "> ");
        let answer = self.read_answer()?;
        let number: usize = answer.trim().parse().ok()?;
        let index = number.checked_sub(1)?;
        (index < options.len()).then_some(index)
    }

    fn input(&mut self, prompt: &str, placeholder: &str) -> Option<String> {
        if matches!(self.presets.front(), Some(PresetAnswer::Input(_)))
            && let Some(PresetAnswer::Input(text)) = self.presets.pop_front()
        {
            return Some(text);
        }

        self.say(&format!("{prompt} ({placeholder})"));
        let _ = write!(self.writer, "> ");
        self.read_answer().map(|answer| answer.trim().to_string())
    }

    fn save_dialog(&mut self, title: &str, filters: &[SaveFilter]) -> Option<PathBuf> {
        if matches!(self.presets.front(), Some(PresetAnswer::SavePath(_)))
            && let Some(PresetAnswer::SavePath(path)) = self.presets.pop_front()
        {
            return Some(path);
        }

        let kinds: Vec<String> = filters
            .iter()
            .map(|filter| format!("{}: *.{}", filter.name, filter.extensions.join(", *.")))
            .collect();
        self.say(&format!("{title} [{}]", kinds.join("; ")));
        let _ = write!(self.writer, "path> ");
        let answer = self.read_answer()?;
        let answer = answer.trim();
        (!answer.is_empty()).then(|| PathBuf::from(answer))
    }
}
