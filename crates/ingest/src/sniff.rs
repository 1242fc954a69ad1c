//! Delimiter sniffing for delimited text.

/// Delimiters considered by the sniffer, in tie-break preference order.
const CANDIDATES: &[u8] = b",;\t|:";

/// Guess the field delimiter of delimited text.
///
/// Looks at the first `sample_lines` non-blank lines and picks the candidate
/// whose (unquoted) count on the header line is repeated on the most sample
/// lines, preferring higher header counts and then candidate order.
/// Returns `None` when no candidate appears on the header line.
#[must_use]
pub fn sniff_delimiter(text: &str, sample_lines: usize) -> Option<u8> {
    let lines: Vec<&str> =
        text.lines().filter(|l| !l.trim().is_empty()).take(sample_lines.max(1)).collect();
    let header = lines.first()?;

    let mut best: Option<(u8, usize, usize)> = None;
    for &delim in CANDIDATES {
        let expected = count_unquoted(header, delim);
        if expected == 0 {
            continue;
        }
        let consistent = lines.iter().filter(|l| count_unquoted(l, delim) == expected).count();
        let better = best.is_none_or(|(_, best_consistent, best_expected)| {
            consistent > best_consistent
                || (consistent == best_consistent && expected > best_expected)
        });
        if better {
            best = Some((delim, consistent, expected));
        }
    }
    best.map(|(delim, _, _)| delim)
}

/// Occurrences of `delim` outside double-quoted sections.
fn count_unquoted(line: &str, delim: u8) -> usize {
    let mut quoted = false;
    let mut count = 0;
    for &b in line.as_bytes() {
        if b == b'"' {
            quoted = !quoted;
        } else if b == delim && !quoted {
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("date,market,price\n2020-01,Bo,10\n", Some(b','))]
    #[case("date;market;price\n2020-01;Bo;10,5\n", Some(b';'))]
    #[case("date\tmarket\n2020-01\tBo\n", Some(b'\t'))]
    #[case("date|price\n2020-01|3\n", Some(b'|'))]
    #[case("price\n10\n", None)]
    fn sniffs_common_delimiters(#[case] text: &str, #[case] expected: Option<u8>) {
        assert_eq!(sniff_delimiter(text, 20), expected);
    }

    #[test]
    fn quoted_delimiters_ignored() {
        let text = "name;price\n\"Rice, imported\";10\n\"Oil, palm\";12\n";
        assert_eq!(sniff_delimiter(text, 20), Some(b';'));
    }
}
