//! Executable model of a loaded module.
//!
//! Handles are `Rc`-based and deliberately not `Send`; a runtime lives on the
//! thread that created it.

mod object;


pub use object::{BackRef, Link, Object};

use crate::{
    enumeration::EnumType,
    error::RuntimeError,
    module::Module,
    native::{Arena, SymbolTable},
    value::Value,
};
use std::{cell::RefCell, rc::Rc};
use tracing::{debug, warn};

///
/// Shared
/// State every wrapper of one runtime points back to.
///

pub(crate) struct Shared {
    pub(crate) module: Module,
    pub(crate) symbols: SymbolTable,
    pub(crate) arena: RefCell<Arena>,
}

///
/// Runtime
///

#[derive(Clone)]
pub struct Runtime {
    shared: Rc<Shared>,
}

impl Runtime {
    /// Load `module` against a set of native implementations. Callables
    /// without an implementation still bind and fail when invoked.
    #[must_use]
    pub fn new(module: Module, symbols: SymbolTable) -> Self {
        for symbol in symbols.missing(&module) {
            warn!(symbol, "native symbol is not bound");
        }
        debug!(
            classes = module.classes().len(),
            enums = module.enums().len(),
            symbols = symbols.len(),
            "runtime loaded"
        );

        Self {
            shared: Rc::new(Shared {
                module,
                symbols,
                arena: RefCell::new(Arena::new()),
            }),
        }
    }

    #[must_use]
    pub fn module(&self) -> &Module {
        &self.shared.module
    }

    /// Default-construct an instance; the returned wrapper owns it.
    pub fn construct(&self, class: &str) -> Result<Object, RuntimeError> {
        let ty = self
            .module()
            .class_named(class)
            .ok_or_else(|| RuntimeError::unknown("module", class))?;
        let class_id = ty.id();

        let instance = {
            let mut arena = self.shared.arena.borrow_mut();
            self.shared.module.instantiate(&mut arena, class_id)
        };

        Ok(Object::bind(&self.shared, class_id, instance, Link::Owned))
    }

    pub fn enum_type(&self, name: &str) -> Result<&EnumType, RuntimeError> {
        self.module()
            .enum_named(name)
            .ok_or_else(|| RuntimeError::unknown("module", name))
    }

    pub fn enumerator(&self, enum_name: &str, name: &str) -> Result<Value, RuntimeError> {
        let ty = self.enum_type(enum_name)?;

        ty.get(name)
            .cloned()
            .map(Value::Enum)
            .ok_or_else(|| RuntimeError::unknown(enum_name, name))
    }

    /// Call a free function.
    pub fn call(&self, function: &str, args: &[Value]) -> Result<Value, RuntimeError> {
        let callable = self
            .module()
            .function(function)
            .ok_or_else(|| RuntimeError::unknown("module", function))?;

        callable.invoke(&self.shared, None, args)
    }

    /// Native instances currently alive.
    #[must_use]
    pub fn live_instances(&self) -> usize {
        self.shared.arena.borrow().len()
    }
}
