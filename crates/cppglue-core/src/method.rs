//! Host callables for methods and free functions.

use crate::{
    convert::{to_host, to_native},
    error::RuntimeError,
    mapper::ConversionStrategy,
    native::{InstanceId, NativeCall, NativeValue, method_symbol},
    runtime::{Link, Shared},
    value::Value,
};
use cppglue_schema::node::{FunctionDecl, MethodDecl};
use std::rc::Rc;

///
/// Signature
/// Mapped parameter and return strategies; `returns` is `None` for Void.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Signature {
    pub params: Vec<ConversionStrategy>,
    pub returns: Option<ConversionStrategy>,
}

///
/// Callable
///

#[derive(Clone, Debug)]
pub struct Callable {
    name: String,
    owner: Option<String>,
    path: String,
    symbol: String,
    signature: Signature,
}

impl Callable {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning class name; `None` for free functions.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Native path a free function is bound from.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub const fn signature(&self) -> &Signature {
        &self.signature
    }

    #[must_use]
    pub const fn arity(&self) -> usize {
        self.signature.params.len()
    }

    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.owner {
            Some(owner) => format!("{owner}.{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Arity check, argument conversion, native call, result conversion.
    /// Nothing reaches native code unless every argument converts. No arena
    /// borrow is held while native code runs.
    pub(crate) fn invoke(
        &self,
        shared: &Rc<Shared>,
        this: Option<InstanceId>,
        args: &[Value],
    ) -> Result<Value, RuntimeError> {
        if args.len() != self.arity() {
            return Err(RuntimeError::Arity {
                callable: self.qualified_name(),
                expected: self.arity(),
                found: args.len(),
            });
        }

        let native_args = args
            .iter()
            .zip(&self.signature.params)
            .enumerate()
            .map(|(i, (arg, strategy))| {
                to_native(arg, *strategy, shared).map_err(|m| {
                    m.into_error(format!("{}() argument {}", self.qualified_name(), i + 1))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let Some(f) = shared.symbols.get(&self.symbol).map(Rc::clone) else {
            return Err(RuntimeError::native(&self.symbol, "symbol is not bound"));
        };

        let mut call = NativeCall::new(&shared.arena, &shared.module, this, native_args);
        let result = f(&mut call);
        let created = call.into_created();

        let value = result
            .map_err(|e| RuntimeError::native(&self.symbol, e.message))
            .and_then(|native| self.convert_result(shared, native));

        let mut arena = shared.arena.borrow_mut();
        for id in created {
            arena.reclaim_if_unheld(id);
        }

        value
    }

    fn convert_result(&self, shared: &Rc<Shared>, native: NativeValue) -> Result<Value, RuntimeError> {
        let Some(strategy) = self.signature.returns else {
            return Ok(Value::None);
        };

        let link = match native.as_object() {
            Some(id) if shared.arena.borrow().strong_count(id) == 0 => Link::Owned,
            _ => Link::Borrowed(None),
        };

        to_host(native, strategy, shared, link).map_err(|msg| RuntimeError::native(&self.symbol, msg))
    }
}

/// Callable for a method of `owner`.
#[must_use]
pub fn synthesize(method: &MethodDecl, owner: &str, signature: Signature) -> Callable {
    Callable {
        name: method.name.clone(),
        owner: Some(owner.to_string()),
        path: method.name.clone(),
        symbol: method_symbol(owner, &method.name),
        signature,
    }
}

/// Callable for a free function.
#[must_use]
pub fn synthesize_function(function: &FunctionDecl, signature: Signature) -> Callable {
    Callable {
        name: function.name.clone(),
        owner: None,
        path: function.resolved_path().to_string(),
        symbol: function.name.clone(),
        signature,
    }
}
