//! Turning classified requests into ranked candidates.
crate::reexport!(candidate);
crate::reexport!(completer);
mod resolve;
