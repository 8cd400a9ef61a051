//! Candidate matching and ranking.
use itertools::Itertools as _;
use std::{cmp::Ordering, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchMode {
    /// Candidate starts with the partial word.
    Prefix,
    /// Every character of the partial word appears in the candidate, in order.
    Fuzzy,
}

/// How reference-list candidates (keywords, built-in functions) are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display)]
pub enum Casing {
    /// Follow the last typed character: lowercase if it is lowercase, else uppercase.
    #[default]
    #[display("auto")]
    Auto,
    #[display("upper")]
    Upper,
    #[display("lower")]
    Lower,
}

impl FromStr for Casing {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Casing::Auto),
            "upper" => Ok(Casing::Upper),
            "lower" => Ok(Casing::Lower),
            other => Err(format!("unknown casing {other:?}")),
        }
    }
}

impl Casing {
    fn resolve(self, partial: &str) -> Self {
        match self {
            Casing::Auto if partial.chars().last().is_some_and(char::is_lowercase) => Casing::Lower,
            Casing::Auto => Casing::Upper,
            fixed => fixed,
        }
    }

    fn apply(self, text: &str) -> String {
        match self {
            Casing::Upper => text.to_uppercase(),
            Casing::Lower | Casing::Auto => text.to_lowercase(),
        }
    }
}

/// Where a partial word matched inside a candidate, in characters.
/// Shorter spans rank first, then earlier starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rank {
    pub span: usize,
    pub start: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub text: String,
    pub rank: Rank,
}

impl Ord for Match {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.rank, &self.text).cmp(&(other.rank, &other.text))
    }
}

impl PartialOrd for Match {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Rank the candidates matching `partial`, case-insensitively.
///
/// Results are ordered by `(span, start, text)` with duplicate texts removed.
/// `casing` re-cases the returned texts; `None` keeps them verbatim.
pub fn find_matches<I>(partial: &str, candidates: I, mode: MatchMode, casing: Option<Casing>) -> Vec<Match>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let needle: Vec<char> = partial.to_lowercase().chars().collect();
    let casing = casing.map(|c| c.resolve(partial));
    candidates
        .into_iter()
        .filter_map(|candidate| {
            let candidate = candidate.as_ref();
            let haystack: Vec<char> = candidate.to_lowercase().chars().collect();
            let rank = match mode {
                MatchMode::Prefix => haystack.starts_with(&needle).then_some(Rank {
                    span: needle.len(),
                    start: 0,
                }),
                MatchMode::Fuzzy => fuzzy_rank(&needle, &haystack),
            }?;
            let text = casing.map_or_else(|| candidate.to_string(), |c| c.apply(candidate));
            Some(Match { text, rank })
        })
        .sorted()
        .dedup_by(|a, b| a.text == b.text)
        .collect()
}

/// Shortest window of `haystack` containing `needle` as a subsequence;
/// the earliest one wins ties.
fn fuzzy_rank(needle: &[char], haystack: &[char]) -> Option<Rank> {
    let Some(&first) = needle.first() else {
        return Some(Rank::default());
    };
    haystack
        .iter()
        .positions(|&c| c == first)
        .filter_map(|start| {
            let mut rest = needle[1..].iter().peekable();
            let mut end = start;
            for (i, c) in haystack.iter().enumerate().skip(start + 1) {
                let Some(&&want) = rest.peek() else {
                    break;
                };
                if *c == want {
                    rest.next();
                    end = i;
                }
            }
            rest.peek().is_none().then_some(Rank {
                span: end - start + 1,
                start,
            })
        })
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn texts(matches: Vec<Match>) -> Vec<String> {
        matches.into_iter().map(|m| m.text).collect()
    }

    #[rstest]
    #[case("sel", vec!["SELECT"])]
    #[case("", vec!["DELETE", "SELECT", "SET"])]
    #[case("se", vec!["SELECT", "SET"])]
    #[case("x", vec![])]
    fn prefix_matches_case_insensitively(#[case] partial: &str, #[case] expected: Vec<&str>) {
        let got = find_matches(partial, ["SET", "SELECT", "DELETE"], MatchMode::Prefix, None);
        assert_eq!(texts(got), expected);
    }

    #[test]
    fn fuzzy_prefers_short_then_early_spans() {
        let got = find_matches("tl", ["title", "total", "t_long_l", "tl"], MatchMode::Fuzzy, None);
        assert_eq!(texts(got), ["tl", "title", "t_long_l", "total"]);
    }

    #[rstest]
    #[case("ab", "xaxb", Some(Rank { span: 3, start: 1 }))]
    #[case("ab", "axxab", Some(Rank { span: 2, start: 3 }))]
    #[case("aa", "abca", Some(Rank { span: 4, start: 0 }))]
    #[case("ba", "ab", None)]
    #[case("", "anything", Some(Rank { span: 0, start: 0 }))]
    fn fuzzy_rank_finds_the_shortest_window(
        #[case] needle: &str,
        #[case] haystack: &str,
        #[case] expected: Option<Rank>,
    ) {
        let needle: Vec<char> = needle.chars().collect();
        let haystack: Vec<char> = haystack.chars().collect();
        assert_eq!(fuzzy_rank(&needle, &haystack), expected);
    }

    #[rstest]
    #[case("sel", Casing::Auto, "select")]
    #[case("SEL", Casing::Auto, "SELECT")]
    #[case("", Casing::Auto, "SELECT")]
    #[case("sel", Casing::Upper, "SELECT")]
    #[case("SEL", Casing::Lower, "select")]
    fn casing_policy(#[case] partial: &str, #[case] casing: Casing, #[case] expected: &str) {
        let got = find_matches(partial, ["SELECT"], MatchMode::Prefix, Some(casing));
        assert_eq!(texts(got), [expected]);
    }

    #[test]
    fn duplicates_collapse() {
        let got = find_matches("", ["a", "*", "a"], MatchMode::Fuzzy, None);
        assert_eq!(texts(got), ["*", "a"]);
    }

    #[test]
    fn casing_parses() {
        assert_eq!("UPPER".parse::<Casing>(), Ok(Casing::Upper));
        assert_eq!(" lower ".parse::<Casing>(), Ok(Casing::Lower));
        assert!("title".parse::<Casing>().is_err());
        assert_eq!(Casing::Auto.to_string(), "auto");
    }
}
