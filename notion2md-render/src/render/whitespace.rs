/// Splits a line into `(leading whitespace, core, trailing whitespace)`.
///
/// A blank line is returned entirely as leading whitespace with an empty core.
pub fn split_whitespace(line: &str) -> (&str, &str, &str) {
    let core_start = line.len() - line.trim_start().len();
    let (leading, rest) = line.split_at(core_start);
    let core = rest.trim_end();
    (leading, core, &rest[core.len()..])
}
