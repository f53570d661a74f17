//! Greedy word wrapping under a width limit and a line-count cap.
//!
//! Words are the pieces between single spaces, so runs of spaces produce
//! empty words. An empty word added to an empty line leaves the line empty,
//! which drops leading spaces and the spaces that would start a new line at a
//! wrap point. Joining the lines with single spaces only restores the text
//! when neither happened.
//!
//! A word that does not fit commits the current line even when it is still
//! empty, so an overlong first word yields a leading `""` line. Once
//! `max_lines` lines have been committed, the remaining words all go on the
//! last line whatever its width. The trailing line is always appended, so the
//! result can hold `max_lines + 1` lines.

/// Wrap `text` into lines no wider than `max_width` where possible.
///
/// `measure` returns the rendered width of a candidate line and must reflect
/// the font that will be used to paint it.
///
/// ```
/// use backdrop::layout::wrap_lines;
///
/// let lines = wrap_lines("hello world", |s| s.len() as f64 * 10.0, 60.0, 10);
/// assert_eq!(lines, vec!["hello", "world"]);
/// assert_eq!(wrap_lines("", |_| 0.0, 60.0, 10), vec![""]);
/// ```
pub fn wrap_lines<F>(text: &str, mut measure: F, max_width: f64, max_lines: usize) -> Vec<String>
where
    F: FnMut(&str) -> f64,
{
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if lines.len() >= max_lines {
            // Capped: everything left piles onto the last line
            current = candidate;
            continue;
        }

        if measure(&candidate) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    lines.push(current);
    lines
}

/// A line breaker bound to a width and line cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineBreaker {
    pub max_width: f64,
    pub max_lines: usize,
}

impl LineBreaker {
    pub fn new(max_width: f64, max_lines: usize) -> Self {
        Self {
            max_width,
            max_lines,
        }
    }

    pub fn wrap<F>(&self, text: &str, measure: F) -> Vec<String>
    where
        F: FnMut(&str) -> f64,
    {
        wrap_lines(text, measure, self.max_width, self.max_lines)
    }
}
