//! Glob matching for `KEYS`
//!
//! Supports `*` (any sequence), `?` (one byte), `[abc]` and `[a-z]`
//! classes, `[^abc]` negated classes and `\x` escapes. An unterminated
//! class treats its last byte as the terminator.

/// Whether `key` matches the glob `pattern`.
pub fn glob_match(pattern: &[u8], key: &[u8]) -> bool {
    let mut pi = 0;
    let mut ki = 0;
    let mut star: Option<(usize, usize)> = None;

    while ki < key.len() {
        if let Some(next) = step(pattern, pi, key[ki]) {
            match next {
                Step::Star => {
                    star = Some((pi, ki));
                    pi += 1;
                    continue;
                }
                Step::Advance(to) => {
                    pi = to;
                    ki += 1;
                    continue;
                }
            }
        }

        // Backtrack: let the last star absorb one more byte.
        match star {
            Some((star_pi, star_ki)) => {
                pi = star_pi + 1;
                ki = star_ki + 1;
                star = Some((star_pi, ki));
            }
            None => return false,
        }
    }

    while pi < pattern.len() && pattern[pi] == b'*' {
        pi += 1;
    }
    pi == pattern.len()
}

enum Step {
    Star,
    Advance(usize),
}

/// Try to consume `ch` at `pattern[pi]`.
fn step(pattern: &[u8], pi: usize, ch: u8) -> Option<Step> {
    let p = *pattern.get(pi)?;
    match p {
        b'\\' if pi + 1 < pattern.len() => (pattern[pi + 1] == ch).then_some(Step::Advance(pi + 2)),
        b'*' => Some(Step::Star),
        b'?' => Some(Step::Advance(pi + 1)),
        b'[' => {
            let (matched, end) = match_class(pattern, pi, ch);
            matched.then_some(Step::Advance(end))
        }
        _ => (p == ch).then_some(Step::Advance(pi + 1)),
    }
}

/// Match the class opening at `pattern[pi]`; returns the result and the
/// index after the class.
fn match_class(pattern: &[u8], pi: usize, ch: u8) -> (bool, usize) {
    let mut i = pi + 1;
    let negate = pattern.get(i) == Some(&b'^');
    if negate {
        i += 1;
    }

    let mut matched = false;
    loop {
        if i + 1 < pattern.len() && pattern[i] == b'\\' {
            matched |= pattern[i + 1] == ch;
            i += 2;
            continue;
        }
        if i >= pattern.len() {
            if i > pi + 1 {
                i -= 1;
            }
            break;
        }
        if pattern[i] == b']' {
            break;
        }
        if i + 2 < pattern.len() && pattern[i + 1] == b'-' {
            let (lo, hi) = if pattern[i] <= pattern[i + 2] {
                (pattern[i], pattern[i + 2])
            } else {
                (pattern[i + 2], pattern[i])
            };
            matched |= (lo..=hi).contains(&ch);
            i += 3;
            continue;
        }
        matched |= pattern[i] == ch;
        i += 1;
    }

    (matched != negate, (i + 1).min(pattern.len()))
}
