//! SQL keyword model used by the lenient tokenizer.
//!
//! Only the keywords that steer completion context get a variant here. Every
//! other reserved word is still recognised by the tokenizer (see
//! `TokenKind::Reserved`) but carries no dispatch meaning of its own.
//!
//! Design notes:
//! - Keywords are matched case‑insensitively via `from_lower` using a pre‑lower‑cased
//!   string slice.
//! - `ORDER BY` and `GROUP BY` are two-word keywords; the tokenizer merges them
//!   before classification so they reach `from_lower` as `"order by"`.
//! - `as_str` provides a canonical lowercase representation.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Select,
    From,
    Join,
    On,
    As,
    Where,
    Having,
    Set,
    OrderBy,
    GroupBy,
    Distinct,
    Show,
    To,
    User,
    For,
    Use,
    Database,
    Template,
    Connect,
    TableFormat,
    Copy,
    Update,
    Into,
    Describe,
    Truncate,
    Desc,
    Explain,
    Table,
    View,
    Function,
    Exists,
    Using,
    Values,
    Insert,
    Change,
    And,
    Or,
    Not,
    Between,
    Limit,
    Offset,
    Union,
    Except,
    Intersect,
    Returning,
}

impl Keyword {
    /// Keywords that close a `WHERE` clause.
    pub const WHERE_TERMINATORS: [Self; 9] = [
        Keyword::OrderBy,
        Keyword::GroupBy,
        Keyword::Limit,
        Keyword::Union,
        Keyword::Except,
        Keyword::Intersect,
        Keyword::Having,
        Keyword::Returning,
        Keyword::Into,
    ];

    /// Keywords after which a table name (optionally schema-qualified) is expected.
    pub const TABLE_CONTEXT: [Self; 11] = [
        Keyword::Copy,
        Keyword::From,
        Keyword::Update,
        Keyword::Into,
        Keyword::Describe,
        Keyword::Truncate,
        Keyword::Desc,
        Keyword::Explain,
        Keyword::Table,
        Keyword::View,
        Keyword::Exists,
    ];

    /// Keywords that start a table list for table extraction.
    pub const TABLE_LIST_START: [Self; 6] = [
        Keyword::Copy,
        Keyword::From,
        Keyword::Into,
        Keyword::Update,
        Keyword::Table,
        Keyword::Join,
    ];

    /// Attempt to classify a *lower‑cased* word slice into a `Keyword`.
    /// Returns `None` if the word is not a recognized keyword.
    pub fn from_lower(word: &str) -> Option<Self> {
        use Keyword::*;
        let kw = match word {
            "select" => Select,
            "from" => From,
            "join" => Join,
            "on" => On,
            "as" => As,
            "where" => Where,
            "having" => Having,
            "set" => Set,
            "order by" => OrderBy,
            "group by" => GroupBy,
            "distinct" => Distinct,
            "show" => Show,
            "to" => To,
            "user" => User,
            "for" => For,
            "use" => Use,
            "database" => Database,
            "template" => Template,
            "connect" => Connect,
            "tableformat" => TableFormat,
            "copy" => Copy,
            "update" => Update,
            "into" => Into,
            "describe" => Describe,
            "truncate" => Truncate,
            "desc" => Desc,
            "explain" => Explain,
            "table" => Table,
            "view" => View,
            "function" => Function,
            "exists" => Exists,
            "using" => Using,
            "values" => Values,
            "insert" => Insert,
            "change" => Change,
            "and" => And,
            "or" => Or,
            "not" => Not,
            "between" => Between,
            "limit" => Limit,
            "offset" => Offset,
            "union" => Union,
            "except" => Except,
            "intersect" => Intersect,
            "returning" => Returning,
            _ => return None,
        };
        Some(kw)
    }

    /// Canonical lowercase string form of the keyword.
    pub const fn as_str(self) -> &'static str {
        use Keyword::*;
        match self {
            Select => "select",
            From => "from",
            Join => "join",
            On => "on",
            As => "as",
            Where => "where",
            Having => "having",
            Set => "set",
            OrderBy => "order by",
            GroupBy => "group by",
            Distinct => "distinct",
            Show => "show",
            To => "to",
            User => "user",
            For => "for",
            Use => "use",
            Database => "database",
            Template => "template",
            Connect => "connect",
            TableFormat => "tableformat",
            Copy => "copy",
            Update => "update",
            Into => "into",
            Describe => "describe",
            Truncate => "truncate",
            Desc => "desc",
            Explain => "explain",
            Table => "table",
            View => "view",
            Function => "function",
            Exists => "exists",
            Using => "using",
            Values => "values",
            Insert => "insert",
            Change => "change",
            And => "and",
            Or => "or",
            Not => "not",
            Between => "between",
            Limit => "limit",
            Offset => "offset",
            Union => "union",
            Except => "except",
            Intersect => "intersect",
            Returning => "returning",
        }
    }

    /// Connectives skipped when looking back for the keyword that owns a clause.
    pub const fn is_connective(self) -> bool {
        matches!(
            self,
            Keyword::And | Keyword::Or | Keyword::Not | Keyword::Between
        )
    }

    pub fn is_table_context(self) -> bool {
        Self::TABLE_CONTEXT.contains(&self)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("select", Keyword::Select)]
    #[case("order by", Keyword::OrderBy)]
    #[case("group by", Keyword::GroupBy)]
    #[case("tableformat", Keyword::TableFormat)]
    #[case("returning", Keyword::Returning)]
    fn recognizes_known_keywords(#[case] word: &str, #[case] expected: Keyword) {
        assert_eq!(Keyword::from_lower(word), Some(expected));
        assert_eq!(expected.as_str(), word);
    }

    #[test]
    fn rejects_unknown_words() {
        for w in ["foo", "inner", "outer", "order", "SELECT", "left"] {
            assert!(
                Keyword::from_lower(w).is_none(),
                "{w} should NOT be recognized"
            );
        }
    }

    #[test]
    fn display_matches_as_str() {
        for kw in Keyword::TABLE_CONTEXT {
            assert_eq!(kw.to_string(), kw.as_str());
        }
    }

    #[test]
    fn connectives() {
        assert!(Keyword::And.is_connective());
        assert!(Keyword::Between.is_connective());
        assert!(!Keyword::Where.is_connective());
    }
}
