mod class;
mod r#enum;
mod field;
mod function;
mod header;
mod method;
mod schema;

pub use class::*;
pub use r#enum::*;
pub use field::*;
pub use function::*;
pub use header::*;
pub use method::*;
pub use schema::*;

use crate::{
    error::ErrorTree,
    visit::{Event, Visitor},
};

///
/// ValidateNode
/// Local, schema-independent checks for one declaration node.
///

pub trait ValidateNode {
    fn validate(&self) -> Result<(), ErrorTree> {
        Ok(())
    }
}

///
/// VisitableNode
///

pub trait VisitableNode: ValidateNode {
    // route_key
    fn route_key(&self) -> String {
        String::new()
    }

    // accept
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        visitor.visit(self, Event::Enter);
        self.drive(visitor);
        visitor.visit(self, Event::Exit);
    }

    // drive
    fn drive<V: Visitor>(&self, _: &mut V) {}
}
