/// Moves `index` past spaces and tabs. Returns the number of skipped characters.
pub(crate) fn skip_whitespace(line: &str, index: &mut usize) -> usize {
    let bytes = line.as_bytes();
    let start = *index;
    while let Some(b' ' | b'\t') = bytes.get(*index) {
        *index += 1;
    }
    *index - start
}

pub(crate) fn trim_whitespace_start(line: &str) -> &str {
    let mut index = 0;
    skip_whitespace(line, &mut index);
    &line[index..]
}
