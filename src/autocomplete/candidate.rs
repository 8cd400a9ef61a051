use crate::*;

/// What kind of object a [`Candidate`] names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Category {
    #[display("keyword")]
    Keyword,
    #[display("special")]
    Special,
    #[display("column")]
    Column,
    #[display("function")]
    Function,
    #[display("table")]
    Table,
    #[display("view")]
    View,
    #[display("alias")]
    Alias,
    #[display("database")]
    Database,
    #[display("show")]
    Show,
    #[display("change")]
    Change,
    #[display("user")]
    User,
    #[display("session")]
    Session,
    #[display("table_format")]
    TableFormat,
    #[display("file_name")]
    FileName,
    /// Produced by non-smart completion, where nothing is classified.
    #[display("any")]
    Any,
}

impl Category {
    /// The category of candidates answering `request`, if it yields any.
    pub fn of(request: &SuggestionRequest) -> Option<Self> {
        Some(match request {
            SuggestionRequest::Keyword => Category::Keyword,
            SuggestionRequest::Special => Category::Special,
            SuggestionRequest::Column { .. } => Category::Column,
            SuggestionRequest::Function { .. } => Category::Function,
            SuggestionRequest::Table { .. } => Category::Table,
            SuggestionRequest::View { .. } => Category::View,
            SuggestionRequest::Alias { .. } => Category::Alias,
            SuggestionRequest::Database { .. } => Category::Database,
            SuggestionRequest::Show => Category::Show,
            SuggestionRequest::Change => Category::Change,
            SuggestionRequest::User => Category::User,
            SuggestionRequest::Session { .. } => Category::Session,
            SuggestionRequest::TableFormat => Category::TableFormat,
            SuggestionRequest::FileName => Category::FileName,
            SuggestionRequest::ColumnHint { .. } => return None,
        })
    }
}

/// One completion offered at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub text: String,
    pub category: Category,
    pub rank: Rank,
}

impl Candidate {
    pub(crate) fn from_match(m: Match, category: Category) -> Self {
        Self {
            text: m.text,
            category,
            rank: m.rank,
        }
    }
}
