/// Pre-parse paragraph rewrap: split the raw input on blank-line runs,
/// wrap each non-blank segment to `width`, and rejoin with the original
/// separators. Operates purely on text before any tree exists and never
/// changes the number or order of paragraph boundaries.
///
/// Only blank lines delimit segments: block constructs not separated by
/// one (a heading directly above its paragraph, say) reflow together.
/// Input meant for rewrapping needs blank lines between blocks.
pub fn rewrap(input: &str, width: usize) -> String {
    let mut out = String::new();
    let mut paragraph: Vec<&str> = Vec::new();

    let flush = |paragraph: &mut Vec<&str>, out: &mut String| {
        if paragraph.is_empty() {
            return;
        }
        let joined = paragraph.join(" ");
        out.push_str(&textwrap::fill(&joined, width));
        out.push('\n');
        paragraph.clear();
    };

    for line in input.lines() {
        if line.trim().is_empty() {
            flush(&mut paragraph, &mut out);
            // separator lines pass through untouched
            out.push_str(line);
            out.push('\n');
        } else {
            paragraph.push(line);
        }
    }
    flush(&mut paragraph, &mut out);

    out
}
