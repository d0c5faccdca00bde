//! Schema validation orchestration and shared helpers.

pub mod naming;
mod reserved;

use crate::{
    error::ErrorTree,
    node::{Schema, VisitableNode},
    visit::ValidateVisitor,
};

/// Run node-local validation over the whole declaration batch.
///
/// Only shape checks live here. Cross-entity resolution and name collisions
/// are decided by the module assembler, which fails on the first of them.
pub(crate) fn validate_schema(schema: &Schema) -> Result<(), ErrorTree> {
    let mut visitor = ValidateVisitor::new();
    schema.accept(&mut visitor);

    visitor.errors.result()
}
