use crate::{error::ErrorTree, node::VisitableNode};

///
/// Event
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Event {
    Enter,
    Exit,
}

///
/// Visitor
///

pub trait Visitor {
    fn visit<N: VisitableNode + ?Sized>(&mut self, node: &N, event: Event);
}

///
/// ValidateVisitor
///
/// Walks the declaration tree, running each node's local validation and
/// filing any errors under the node's route.
///

#[derive(Debug, Default)]
pub struct ValidateVisitor {
    pub errors: ErrorTree,
    route: Vec<String>,
}

impl ValidateVisitor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn current_route(&self) -> String {
        self.route.join(".")
    }
}

impl Visitor for ValidateVisitor {
    fn visit<N: VisitableNode + ?Sized>(&mut self, node: &N, event: Event) {
        let key = node.route_key();

        match event {
            Event::Enter => {
                if !key.is_empty() {
                    self.route.push(key);
                }

                if let Err(errs) = node.validate() {
                    let route = self.current_route();
                    if route.is_empty() {
                        self.errors.merge(errs);
                    } else {
                        self.errors.merge_for(route, errs);
                    }
                }
            }
            Event::Exit => {
                if !key.is_empty() {
                    self.route.pop();
                }
            }
        }
    }
}
