use crate::ast::SourceLine;

/// Normalize raw source text into numbered lines of code.
///
/// Every line is lower-cased and trimmed, comments starting with `;` are removed and lines
/// without any code left are dropped. Line numbers start at 1 and refer to the raw input.
#[tracing::instrument(skip(input))]
pub fn normalize(input: &str) -> Vec<SourceLine> {
    input
        .lines()
        .enumerate()
        .filter_map(|(ix, line)| {
            let line = line.to_lowercase();
            let code = match line.find(';') {
                Some(comment_start) => &line[..comment_start],
                None => line.as_str(),
            }
            .trim();
            if code.is_empty() {
                None
            } else {
                Some(SourceLine::new(ix + 1, code))
            }
        })
        .collect()
}
