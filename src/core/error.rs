//! Error types for gameplay actions and data loading.

use bevy::prelude::Entity;
use thiserror::Error;

use crate::stats::ResourceKind;

/// Local, non-fatal failures of a single gameplay action.
///
/// None of these abort the tick loop. Systems log them and move on to the
/// next entity; the action is simply not attempted again until its intent
/// recurs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameplayError {
    /// An attack or jump was denied because a pool could not cover its cost.
    #[error("not enough {kind:?}: needed {needed}, had {available}")]
    InsufficientResource {
        kind: ResourceKind,
        needed: f32,
        available: f32,
    },

    /// The entity is mid-attack or dead and cannot start another action.
    #[error("action rejected while {0}")]
    Busy(&'static str),

    /// A spawn template or collider reference required by an action is unset.
    #[error("missing collaborator: {0}")]
    MissingCollaborator(String),

    /// An enemy's target no longer resolves to a live character.
    #[error("target {0:?} no longer exists")]
    DanglingTargetReference(Entity),
}

/// Errors that can occur when loading enemy or damage data.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// A definition parsed but describes an impossible configuration.
    #[error("Invalid definition '{name}': {reason}")]
    InvalidDefinition { name: String, reason: String },
}
