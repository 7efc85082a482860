// Mon Jan 19 2026 - Alex

/// Smallest output budget accepted by [`Escaper::escape`].
pub const MIN_MAXLEN: usize = 32;
/// Budget used for attribute values and text lines.
pub const DEFAULT_MAXLEN: usize = 500;

const ELLIPSIS: &str = " ...";

fn entity(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&apos;"),
        _ => None,
    }
}

/// Escapes text for XML output into a reusable scratch buffer.
///
/// The returned slice borrows the buffer, so one escaper serves one call at
/// a time.
#[derive(Debug, Default)]
pub struct Escaper {
    scratch: String,
    largest_maxlen: usize,
}

impl Escaper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the five XML metacharacters with entities, keeps printable
    /// and whitespace characters, drops other control characters, and cuts
    /// the result to at most `maxlen` bytes with a trailing `" ..."`.
    pub fn escape(&mut self, text: &str, maxlen: usize) -> &str {
        let maxlen = maxlen.max(MIN_MAXLEN);
        if maxlen > self.largest_maxlen {
            self.scratch.reserve(maxlen + 1);
            self.largest_maxlen = maxlen;
        }
        self.scratch.clear();

        let limit = maxlen - ELLIPSIS.len();
        let mut keep = 0;

        for c in text.chars() {
            match entity(c) {
                Some(e) => self.scratch.push_str(e),
                None if !c.is_control() || c.is_whitespace() => self.scratch.push(c),
                None => continue,
            }

            if self.scratch.len() <= limit {
                keep = self.scratch.len();
            }
            if self.scratch.len() > maxlen {
                self.scratch.truncate(keep);
                self.scratch.push_str(ELLIPSIS);
                break;
            }
        }

        &self.scratch
    }

    pub fn capacity(&self) -> usize {
        self.scratch.capacity()
    }
}
