//! Routine symbol extraction from C# source using tree-sitter.
//!
//! Parses a file into a syntax tree, collects every member routine with its
//! line span and immediate owning type, and resolves changed line numbers to
//! their enclosing routine.

pub mod extractor;

use serde::Serialize;

/// A member routine extracted from a source file.
///
/// Spans are 1-based and inclusive, and start at the first line of the
/// declaration text (attribute lists and modifiers included). `owner` is the
/// simple name of the immediate lexically enclosing type, not qualified
/// across nested types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutineSymbol {
    pub owner: String,
    pub name: String,
    #[serde(rename = "startLine")]
    pub start_line: u32,
    #[serde(rename = "endLine")]
    pub end_line: u32,
}

impl RoutineSymbol {
    /// Qualified `Owner.Routine` key used for matching.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.owner, self.name)
    }

    fn contains_line(&self, line: u32) -> bool {
        line >= self.start_line && line <= self.end_line
    }
}

/// The routine symbols of one file, in document order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileRoutines {
    pub routines: Vec<RoutineSymbol>,
}

impl FileRoutines {
    /// Resolve a 1-based line number to its enclosing routine.
    ///
    /// Returns the first routine in document order whose span contains the
    /// line. Sibling spans do not overlap, so at most one routine can match;
    /// document order is the deterministic tie-break if that invariant is
    /// ever violated by unusual constructs.
    pub fn resolve(&self, line: u32) -> Option<&RoutineSymbol> {
        self.routines.iter().find(|r| r.contains_line(line))
    }
}
