//! Raw input sequencing
//!
//! The differs operate on atom slices. A [`Sequencer`] turns raw text into
//! such a slice for the `diff_text` entry points.

/// Converts raw text into an atom sequence.
pub trait Sequencer<T>: Send + Sync {
    fn to_sequence(&self, raw: &str) -> Vec<T>;
}

impl<T, F> Sequencer<T> for F
where
    F: Fn(&str) -> Vec<T> + Send + Sync,
{
    fn to_sequence(&self, raw: &str) -> Vec<T> {
        self(raw)
    }
}

/// One atom per line. `\n` and `\r\n` terminators are stripped; a trailing
/// terminator does not produce an empty last line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineSequencer;

impl Sequencer<String> for LineSequencer {
    fn to_sequence(&self, raw: &str) -> Vec<String> {
        raw.lines().map(str::to_owned).collect()
    }
}

/// One atom per `char`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharSequencer;

impl Sequencer<char> for CharSequencer {
    fn to_sequence(&self, raw: &str) -> Vec<char> {
        raw.chars().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_sequencer() {
        assert_eq!(LineSequencer.to_sequence("a\nb\r\nc\n"), vec!["a", "b", "c"]);
        assert_eq!(LineSequencer.to_sequence("a\n\nb"), vec!["a", "", "b"]);
        assert!(LineSequencer.to_sequence("").is_empty());
    }

    #[test]
    fn test_char_sequencer() {
        assert_eq!(CharSequencer.to_sequence("añb"), vec!['a', 'ñ', 'b']);
    }

    #[test]
    fn test_closure_sequencer() {
        let words = |raw: &str| raw.split_whitespace().map(str::to_owned).collect::<Vec<_>>();
        assert_eq!(words.to_sequence(" one  two "), vec!["one", "two"]);
    }
}
