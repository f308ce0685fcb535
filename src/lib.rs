//! patchdrift maps game source changes to the Harmony patches that target them.
//!
//! Given two git revisions of a decompiled game source tree and a directory of
//! Harmony mod sources, patchdrift reports which declared `[HarmonyPatch]`
//! attributes target a game routine whose body changed between the revisions.
//!
//! Three independent strategies contribute rows to the final report:
//!
//! 1. Parsed match: unified diff to changed lines, changed lines to enclosing
//!    methods via a C# syntax tree, then exact `Class.Method` equality against
//!    structured targets extracted from mod attribute syntax.
//! 2. Text match: a filename-convention heuristic over `HarmonyPatch` lines.
//! 3. Copy warning: a whole-word `copy` line scan over mod sources.

pub mod changes;
#[cfg(feature = "cli")]
pub mod cli;
pub mod diff;
pub mod error;
pub mod matcher;
pub mod patches;
pub mod report;
pub mod sources;
pub mod symbols;
pub mod textscan;
