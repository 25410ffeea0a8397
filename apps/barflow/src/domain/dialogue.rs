/// Drop blank lines and trim the rest.
///
/// Both the day intro and the post-serve sequences go through this before
/// their length is taken, so a sequence of only blank lines counts as empty.
pub fn filter_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| {
            let trimmed = line.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect()
}
