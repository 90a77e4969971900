/// Terminator that ended a line in the original text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// Last line of a text that does not end with a line break
    None,
    Cr,
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::None => "",
            LineEnding::Cr => "\r",
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// A line of text together with the terminator that ended it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    pub text: &'a str,
    pub ending: LineEnding,
}

/// Splits text into lines, keeping each line's terminator.
///
/// `\r\n` is a single terminator. A trailing terminator does not produce an
/// extra empty line, and empty input yields no lines.
pub fn split_lines(text: &str) -> Vec<Line<'_>> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let ending = match bytes[i] {
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => LineEnding::CrLf,
            b'\r' => LineEnding::Cr,
            b'\n' => LineEnding::Lf,
            _ => {
                i += 1;
                continue;
            }
        };

        lines.push(Line {
            text: &text[start..i],
            ending,
        });
        i += ending.as_str().len();
        start = i;
    }

    if start < text.len() {
        lines.push(Line {
            text: &text[start..],
            ending: LineEnding::None,
        });
    }

    lines
}

/// Reassembles lines produced by [`split_lines`] into the original text
pub fn join_lines(lines: &[Line<'_>]) -> String {
    lines
        .iter()
        .flat_map(|line| [line.text, line.ending.as_str()])
        .collect()
}
