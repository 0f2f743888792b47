//! Prelude module - common imports for gridcol users
//!
//! ```rust
//! use gridcol::prelude::*;
//! ```

pub use crate::{
    // Column model
    CollectionKey,
    Column,
    ColumnKind,
    Currency,

    // Store
    ColumnStore,
    // Builders
    CustomColumnBuilder,
    CustomColumnKind,
    Favorite,
    FormulaBuilder,

    // Formula configuration
    FormulaConfig,
    // Error types
    FormulaError,
    FormulaPart,
    JsonFileStore,
    MemoryStore,
    NumberLocale,
    Operator,
    OutputType,

    // Row contract
    RowValue,
    RowValues,
    SnapshotStore,

    StoreError,
    // Extension traits
    StoreEvaluateExt,
};
