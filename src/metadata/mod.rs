//! What the completer knows about the server: reference word lists, the
//! cached schema snapshot and the queries that populate it.
crate::reexport!(reference);
crate::reexport!(escape);
crate::reexport!(table);
crate::reexport!(schema);
crate::reexport!(store);
crate::reexport!(executor);
crate::reexport!(catalog);
crate::reexport!(mysql);
crate::reexport!(refresh);
