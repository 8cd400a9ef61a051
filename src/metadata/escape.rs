use regex::Regex;
use std::{borrow::Cow, collections::HashSet, sync::LazyLock};

static BARE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[_a-z][_a-z0-9$]*$").expect("valid regex"));

/// Back-tick quotes identifiers that cannot be typed bare.
///
/// A name is quoted when it is not a plain identifier, or when its uppercase
/// form is a reserved word or a built-in function.
#[derive(Debug, Clone, Default)]
pub struct NameEscaper {
    reserved: HashSet<String>,
}

impl NameEscaper {
    pub fn new<'a>(reserved: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            reserved: reserved.into_iter().map(str::to_uppercase).collect(),
        }
    }

    pub fn needs_quoting(&self, name: &str) -> bool {
        !name.is_empty()
            && (!BARE_NAME.is_match(name) || self.reserved.contains(&name.to_uppercase()))
    }

    pub fn escape<'a>(&self, name: &'a str) -> Cow<'a, str> {
        if is_quoted(name) || !self.needs_quoting(name) {
            Cow::Borrowed(name)
        } else {
            Cow::Owned(format!("`{name}`"))
        }
    }
}

fn is_quoted(name: &str) -> bool {
    name.len() >= 2 && name.starts_with('`') && name.ends_with('`')
}

/// Strip one layer of back-tick quoting.
pub fn unescape(name: &str) -> &str {
    if is_quoted(name) {
        &name[1..name.len() - 1]
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("orders", "orders")]
    #[case("Orders_2", "Orders_2")]
    #[case("price$", "price$")]
    #[case("user", "`user`")]
    #[case("USER", "`USER`")]
    #[case("count", "`count`")]
    #[case("my table", "`my table`")]
    #[case("2fa", "`2fa`")]
    #[case("`user`", "`user`")]
    #[case("", "")]
    fn escapes_names(#[case] name: &str, #[case] expected: &str) {
        let escaper = NameEscaper::new(["USER", "COUNT"]);
        assert_eq!(escaper.escape(name), expected);
    }

    #[test]
    fn unescape_strips_one_layer() {
        assert_eq!(unescape("`user`"), "user");
        assert_eq!(unescape("user"), "user");
        assert_eq!(unescape("`"), "`");
    }
}
