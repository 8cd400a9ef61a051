use super::*;
use crate::*;
use itertools::Itertools as _;
use std::path::Path;

/// The text being completed, seen two ways.
#[derive(Debug, Clone, Copy)]
pub(super) struct Partial<'a> {
    /// Back to the previous whitespace: `@@global.po`, `/tmp/da`, `d1.or`.
    pub word: &'a str,
    /// The piece a candidate replaces: `po`, `/tmp/da`, `or`.
    pub last: &'a str,
}

impl<'a> Partial<'a> {
    pub fn before(cursor_text: &'a str) -> Self {
        let word = last_word(cursor_text, WordBoundary::Whitespace);
        Self {
            word,
            last: last_word(word, WordBoundary::MostPunctuations),
        }
    }
}

/// Candidates answering one request, best first.
///
/// `live_columns` are extra columns fetched from the server for a table the
/// snapshot does not know about; they only matter for column requests.
pub(super) fn resolve(
    request: &SuggestionRequest,
    store: &SchemaMetadata,
    casing: Casing,
    partial: Partial<'_>,
    live_columns: &[String],
) -> Vec<Candidate> {
    let Some(category) = Category::of(request) else {
        return Vec::new();
    };
    let last = partial.last;
    let matches = match request {
        SuggestionRequest::Keyword => {
            find_matches(last, store.keywords(), MatchMode::Prefix, Some(casing))
        }
        SuggestionRequest::Special => {
            find_matches(last, store.special_commands(), MatchMode::Prefix, None)
        }
        SuggestionRequest::Column {
            tables,
            drop_unique,
        } => {
            let mut columns = store.scoped_columns(tables);
            columns.extend_from_slice(live_columns);
            if *drop_unique {
                columns = shared_columns(columns);
            }
            find_matches(last, columns, MatchMode::Fuzzy, None)
        }
        SuggestionRequest::Function { schema } => {
            let mut found = find_matches(
                last,
                store.objects_of(schema.as_deref(), ObjectKind::Function),
                MatchMode::Fuzzy,
                None,
            );
            if schema.is_none() {
                found.extend(find_matches(
                    last,
                    store.functions(),
                    MatchMode::Prefix,
                    Some(casing),
                ));
            }
            found
        }
        SuggestionRequest::Table { schema } => {
            let mut tables = store.objects_of(schema.as_deref(), ObjectKind::Table);
            if tables.is_empty()
                && let Some(schema) = schema
            {
                tables = store.tables_in_database(schema);
            }
            find_matches(last, tables, MatchMode::Fuzzy, None)
        }
        SuggestionRequest::View { schema } => find_matches(
            last,
            store.objects_of(schema.as_deref(), ObjectKind::View),
            MatchMode::Fuzzy,
            None,
        ),
        SuggestionRequest::Alias { aliases } => {
            find_matches(last, aliases, MatchMode::Fuzzy, None)
        }
        SuggestionRequest::Database { table_hint } => match table_hint {
            Some(table) => find_matches(
                last,
                store.databases_with_table(table),
                MatchMode::Fuzzy,
                None,
            ),
            None => find_matches(last, store.databases(), MatchMode::Fuzzy, None),
        },
        SuggestionRequest::Show => {
            find_matches(last, store.show_items(), MatchMode::Fuzzy, Some(casing))
        }
        SuggestionRequest::Change => {
            find_matches(last, store.change_items(), MatchMode::Fuzzy, None)
        }
        SuggestionRequest::User => find_matches(last, store.users(), MatchMode::Fuzzy, None),
        SuggestionRequest::Session { scope } => {
            let variables: Vec<&String> = match scope {
                SessionScope::Global => store.global_variables().iter().collect(),
                SessionScope::Session => store.session_variables().iter().collect(),
                SessionScope::Both => store
                    .global_variables()
                    .iter()
                    .chain(store.session_variables())
                    .unique()
                    .collect(),
            };
            let name = strip_variable_prefix(partial.word);
            find_matches(
                last_word(name, WordBoundary::MostPunctuations),
                variables,
                MatchMode::Fuzzy,
                None,
            )
        }
        SuggestionRequest::TableFormat => {
            find_matches(last, store.table_formats(), MatchMode::Prefix, Some(casing))
        }
        SuggestionRequest::FileName => file_names(partial.word),
        SuggestionRequest::ColumnHint { .. } => Vec::new(),
    };
    matches
        .into_iter()
        .map(|m| Candidate::from_match(m, category))
        .collect()
}

/// Columns named by two or more of the scoped tables, for `USING (`.
fn shared_columns(columns: Vec<String>) -> Vec<String> {
    columns
        .into_iter()
        .filter(|c| c != ALL_COLUMNS)
        .counts()
        .into_iter()
        .filter(|&(_, n)| n > 1)
        .map(|(c, _)| c)
        .collect()
}

/// `@@global.port` -> `port`; ASCII case is ignored on the prefixes.
fn strip_variable_prefix(word: &str) -> &str {
    let Some(name) = word.strip_prefix("@@") else {
        return word;
    };
    ["global.", "session."]
        .into_iter()
        .find_map(|scope| {
            name.get(..scope.len())
                .filter(|p| p.eq_ignore_ascii_case(scope))
                .map(|_| &name[scope.len()..])
        })
        .unwrap_or(name)
}

/// Entries of the directory named by `word` whose names start with its last
/// path segment. Directories get a trailing `/`.
fn file_names(word: &str) -> Vec<Match> {
    let (dir, prefix) = match word.rfind('/') {
        Some(0) => ("/", &word[1..]),
        Some(i) => (&word[..i], &word[i + 1..]),
        None => (".", word),
    };
    let entries = match std::fs::read_dir(Path::new(dir)) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Cannot list {dir:?} for file completion: {e}");
            return Vec::new();
        }
    };
    let names = entries.filter_map(|entry| {
        let entry = entry.ok()?;
        let mut name = entry.file_name().into_string().ok()?;
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            name.push('/');
        }
        Some(name)
    });
    find_matches(prefix, names, MatchMode::Prefix, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    fn texts(
        store: &SchemaMetadata,
        request: SuggestionRequest,
        cursor_text: &str,
    ) -> Vec<String> {
        resolve(
            &request,
            store,
            Casing::Auto,
            Partial::before(cursor_text),
            &[],
        )
        .into_iter()
        .map(|c| c.text)
        .collect()
    }

    #[test]
    fn partial_splits_on_whitespace_then_punctuation() {
        let partial = Partial::before("select d1.or");
        assert_eq!((partial.word, partial.last), ("d1.or", "or"));
        let partial = Partial::before("select ");
        assert_eq!((partial.word, partial.last), ("", ""));
    }

    #[test]
    fn columns_of_scoped_tables_with_sentinel_first() {
        let store = sample_store();
        let request = SuggestionRequest::columns(vec![TableReference::new(None, "t1", None)]);
        assert_eq!(texts(&store, request, "select "), ["*", "a", "b", "c"]);
    }

    #[test]
    fn using_keeps_only_shared_columns() {
        let store = sample_store();
        let request = SuggestionRequest::Column {
            tables: vec![
                TableReference::new(None, "t1", None),
                TableReference::new(None, "t2", None),
            ],
            drop_unique: true,
        };
        assert_eq!(texts(&store, request, "using ("), ["a"]);
    }

    #[test]
    fn live_columns_join_the_snapshot() {
        let store = sample_store();
        let request = SuggestionRequest::columns(vec![TableReference::new(
            Some("remote"),
            "events",
            None,
        )]);
        let got: Vec<String> = resolve(
            &request,
            &store,
            Casing::Auto,
            Partial::before("select na"),
            &["name".to_string(), "id".to_string()],
        )
        .into_iter()
        .map(|c| c.text)
        .collect();
        assert_eq!(got, ["name"]);
    }

    #[test]
    fn builtin_functions_follow_casing_after_user_functions() {
        let store = sample_store();
        let got = texts(&store, SuggestionRequest::Function { schema: None }, "select ta");
        assert_eq!(got.first().map(String::as_str), Some("tax"));
        assert!(got.iter().any(|f| f == "tan"));
        assert!(got.iter().all(|f| f != "TAN"));
    }

    #[test]
    fn qualified_functions_skip_builtins() {
        let store = sample_store();
        let got = texts(
            &store,
            SuggestionRequest::Function {
                schema: Some("d1".into()),
            },
            "select d1.",
        );
        assert_eq!(got, ["tax"]);
    }

    #[rstest]
    #[case(Some("d1"), "from d1.", vec!["orders", "t1", "t2"])]
    #[case(Some("d2"), "from d2.", vec!["haha1", "haha2"])]
    #[case(Some("d2"), "from d2.ha2", vec!["haha2"])]
    #[case(None, "from o", vec!["orders"])]
    fn tables_fall_back_to_the_inventory(
        #[case] schema: Option<&str>,
        #[case] cursor_text: &str,
        #[case] expected: Vec<&str>,
    ) {
        let store = sample_store();
        let request = SuggestionRequest::Table {
            schema: schema.map(str::to_string),
        };
        assert_eq!(texts(&store, request, cursor_text), expected);
    }

    #[rstest]
    #[case(None, vec!["d1", "d2", "mysql"])]
    #[case(Some("haha1"), vec!["d2"])]
    #[case(Some("nothing"), vec![])]
    fn databases_filtered_by_table_hint(#[case] hint: Option<&str>, #[case] expected: Vec<&str>) {
        let store = sample_store();
        let request = SuggestionRequest::Database {
            table_hint: hint.map(str::to_string),
        };
        assert_eq!(texts(&store, request, "insert into "), expected);
    }

    #[rstest]
    #[case(SessionScope::Global, "select @@global.", vec!["port", "report_host"])]
    #[case(SessionScope::Session, "select @@SESSION.", vec!["autocommit", "report_host"])]
    #[case(SessionScope::Both, "select @@", vec!["port", "autocommit", "report_host"])]
    #[case(SessionScope::Global, "select @@global.rep", vec!["report_host"])]
    fn session_variables_by_scope(
        #[case] scope: SessionScope,
        #[case] cursor_text: &str,
        #[case] expected: Vec<&str>,
    ) {
        let store = sample_store();
        let mut got = texts(&store, SuggestionRequest::Session { scope }, cursor_text);
        let mut expected = expected;
        got.sort();
        expected.sort();
        assert_eq!(got, expected);
    }

    #[rstest]
    #[case("sel", "select")]
    #[case("SEL", "SELECT")]
    fn keywords_are_prefix_matched_and_recased(#[case] typed: &str, #[case] expected: &str) {
        let store = sample_store();
        let got = texts(&store, SuggestionRequest::Keyword, typed);
        assert_eq!(got.first().map(String::as_str), Some(expected));
    }

    #[test]
    fn show_items_follow_casing() {
        let store = sample_store();
        let got = texts(&store, SuggestionRequest::Show, "show DATA");
        assert_eq!(got, ["DATABASES"]);
    }

    #[test]
    fn table_formats_are_prefix_matched() {
        let store = sample_store();
        assert_eq!(texts(&store, SuggestionRequest::TableFormat, "tableformat c"), ["csv"]);
        assert!(texts(&store, SuggestionRequest::TableFormat, "tableformat sv").is_empty());
    }

    #[test]
    fn special_commands_keep_their_percent() {
        let store = sample_store();
        assert_eq!(texts(&store, SuggestionRequest::Special, "%lo"), ["%load"]);
    }

    #[test]
    fn column_hints_produce_nothing() {
        let store = sample_store();
        let request = SuggestionRequest::ColumnHint {
            table: TableReference::new(None, "t1", None),
            columns: Vec::new(),
            value_index: 0,
        };
        assert!(texts(&store, request, "values (").is_empty());
    }

    #[test]
    fn file_names_list_the_typed_directory() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("data.csv"), "")?;
        std::fs::write(dir.path().join("data2.csv"), "")?;
        std::fs::write(dir.path().join("notes.txt"), "")?;
        std::fs::create_dir(dir.path().join("dump"))?;

        let word = format!("{}/d", dir.path().display());
        let got: Vec<String> = file_names(&word).into_iter().map(|m| m.text).collect();
        assert_eq!(got, ["data.csv", "data2.csv", "dump/"]);

        let word = format!("{}/missing/x", dir.path().display());
        assert!(file_names(&word).is_empty());
        Ok(())
    }

    #[rstest]
    #[case("@@global.port", "port")]
    #[case("@@GLOBAL.port", "port")]
    #[case("@@session.", "")]
    #[case("@@auto", "auto")]
    #[case("plain", "plain")]
    fn variable_prefixes_are_stripped(#[case] word: &str, #[case] expected: &str) {
        assert_eq!(strip_variable_prefix(word), expected);
    }
}
