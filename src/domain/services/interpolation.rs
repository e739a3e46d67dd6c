//! Variable interpolation over file contents
//!
//! A single pass over the input: `$NAME` and `${NAME}` are replaced by the
//! value `lookup` returns. References `lookup` does not know are left
//! verbatim, so config files may carry `$` sequences meant for other tools.

/// Expand `$NAME` / `${NAME}` references in `src`
pub fn expand<F>(src: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(src.len());
    let mut rest = src;

    while let Some(dollar) = rest.find('$') {
        out.push_str(&rest[..dollar]);
        let after = &rest[dollar + 1..];

        let (name, consumed) = match reference(after) {
            Some(found) => found,
            None => {
                out.push('$');
                rest = after;
                continue;
            }
        };

        match lookup(name) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[dollar..dollar + 1 + consumed]),
        }
        rest = &after[consumed..];
    }

    out.push_str(rest);
    out
}

/// Variable name at the start of `s` and the number of bytes it spans
fn reference(s: &str) -> Option<(&str, usize)> {
    if let Some(braced) = s.strip_prefix('{') {
        let end = braced.find('}')?;
        let name = &braced[..end];
        return is_name(name).then_some((name, end + 2));
    }

    let end = s
        .char_indices()
        .find(|&(i, c)| !is_name_char(c, i == 0))
        .map(|(i, _)| i)
        .unwrap_or(s.len());

    (end > 0).then(|| (&s[..end], end))
}

fn is_name(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .enumerate()
            .all(|(i, c)| is_name_char(c, i == 0))
}

fn is_name_char(c: char, first: bool) -> bool {
    c == '_' || c.is_ascii_alphabetic() || (!first && c.is_ascii_digit())
}
