//! Turning caption fragments into a single transcript string.

/// Marker separating the start and end timestamps of a VTT/SRT cue.
const TIME_RANGE_MARKER: &str = "-->";

/// A single caption fragment, in the order it appears in the video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionLine {
    pub text: String,
}

impl CaptionLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Whether a subtitle file line carries caption text rather than cue metadata.
pub fn is_caption_text(line: &str) -> bool {
    let line = line.trim();
    !(line.is_empty()
        || line.contains(TIME_RANGE_MARKER)
        || line.chars().all(|c| c.is_ascii_digit()))
}

/// Caption text lines of a subtitle file, trimmed, in file order.
pub fn caption_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| is_caption_text(line))
}

pub fn join_captions<'a, I>(lines: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    lines.into_iter().collect::<Vec<_>>().join(" ")
}

pub fn subtitle_to_transcript(content: &str) -> String {
    join_captions(caption_lines(content))
}

pub fn captions_to_transcript(captions: &[CaptionLine]) -> String {
    join_captions(captions.iter().map(|c| c.text.as_str()))
}
