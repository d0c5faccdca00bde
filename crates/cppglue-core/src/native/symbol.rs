use super::{Arena, InstanceId, NativeValue};
use crate::{error::NativeError, module::Module};
use cppglue_schema::types::EntityId;
use std::{cell::RefCell, collections::BTreeMap, fmt, rc::Rc};

/// A native method or free function implementation.
pub type NativeFn = Rc<dyn Fn(&mut NativeCall<'_>) -> Result<NativeValue, NativeError>>;

/// Symbol under which a method of `class` is bound.
#[must_use]
pub fn method_symbol(class: &str, method: &str) -> String {
    format!("{class}::{method}")
}

///
/// SymbolTable
///
/// Native implementations keyed by `Class::method` for methods and by the
/// bare name for free functions.
///

#[derive(Clone, Default)]
pub struct SymbolTable {
    symbols: BTreeMap<String, NativeFn>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind<F>(&mut self, symbol: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&mut NativeCall<'_>) -> Result<NativeValue, NativeError> + 'static,
    {
        self.symbols.insert(symbol.into(), Rc::new(f));
        self
    }

    #[must_use]
    pub fn with_method<F>(mut self, class: &str, method: &str, f: F) -> Self
    where
        F: Fn(&mut NativeCall<'_>) -> Result<NativeValue, NativeError> + 'static,
    {
        self.bind(method_symbol(class, method), f);
        self
    }

    #[must_use]
    pub fn with_function<F>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(&mut NativeCall<'_>) -> Result<NativeValue, NativeError> + 'static,
    {
        self.bind(name, f);
        self
    }

    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&NativeFn> {
        self.symbols.get(symbol)
    }

    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains_key(symbol)
    }

    /// Callables in `module` with no implementation in this table.
    #[must_use]
    pub fn missing<'m>(&self, module: &'m Module) -> Vec<&'m str> {
        module
            .callables()
            .map(|c| c.symbol())
            .filter(|symbol| !self.contains(symbol))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.symbols.keys()).finish()
    }
}

///
/// NativeCall
///
/// What a native implementation sees while it runs: the receiver, the
/// converted arguments and field access on any live instance. The arena is
/// borrowed per operation, so implementations may use host wrappers and the
/// runtime while they run.
///

pub struct NativeCall<'a> {
    arena: &'a RefCell<Arena>,
    module: &'a Module,
    this: Option<InstanceId>,
    args: Vec<NativeValue>,
    created: Vec<InstanceId>,
}

impl<'a> NativeCall<'a> {
    pub(crate) const fn new(
        arena: &'a RefCell<Arena>,
        module: &'a Module,
        this: Option<InstanceId>,
        args: Vec<NativeValue>,
    ) -> Self {
        Self {
            arena,
            module,
            this,
            args,
            created: Vec::new(),
        }
    }

    /// Instances constructed during the call, for reclamation afterwards.
    pub(crate) fn into_created(self) -> Vec<InstanceId> {
        self.created
    }

    #[must_use]
    pub const fn this(&self) -> Option<InstanceId> {
        self.this
    }

    #[must_use]
    pub fn args(&self) -> &[NativeValue] {
        &self.args
    }

    pub fn arg(&self, index: usize) -> Result<&NativeValue, NativeError> {
        self.args
            .get(index)
            .ok_or_else(|| NativeError::new(format!("no argument at position {index}")))
    }

    /// Field of the receiver.
    pub fn field(&self, name: &str) -> Result<NativeValue, NativeError> {
        let this = self.receiver()?;
        self.field_of(this, name)
    }

    pub fn set_field(&mut self, name: &str, value: NativeValue) -> Result<(), NativeError> {
        let this = self.receiver()?;
        self.set_field_of(this, name, value)
    }

    pub fn field_of(&self, instance: InstanceId, name: &str) -> Result<NativeValue, NativeError> {
        let slot = self.slot(instance, name)?;

        self.arena
            .borrow()
            .get(instance)
            .and_then(|i| i.fields.get(slot))
            .cloned()
            .ok_or_else(|| gone(instance))
    }

    /// Write a field; the value must have the representation the field stores.
    pub fn set_field_of(
        &mut self,
        instance: InstanceId,
        name: &str,
        value: NativeValue,
    ) -> Result<(), NativeError> {
        let slot = self.slot(instance, name)?;
        let class = self.class_of(instance)?;
        let strategy = self
            .module
            .class(class)
            .and_then(|c| c.properties().get(slot))
            .map(|p| p.strategy())
            .ok_or_else(|| NativeError::new(format!("no field '{name}' on {instance}")))?;

        let mut arena = self.arena.borrow_mut();
        let fits = value.fits(strategy)
            && match (strategy.object_class(), value.as_object()) {
                (Some(expected), Some(target)) => arena.class_of(target) == Some(expected),
                _ => true,
            };
        if !fits {
            return Err(NativeError::new(format!(
                "value {value:?} does not fit field '{name}' ({strategy})"
            )));
        }

        arena.write(instance, slot, value);

        Ok(())
    }

    /// Default-construct an instance of a bound class.
    pub fn construct(&mut self, class: &str) -> Result<InstanceId, NativeError> {
        let class_id = self
            .module
            .class_named(class)
            .map(|c| c.id())
            .ok_or_else(|| NativeError::new(format!("unknown class '{class}'")))?;
        let id = self
            .module
            .instantiate(&mut self.arena.borrow_mut(), class_id);
        self.created.push(id);

        Ok(id)
    }

    /// Class name of a live instance.
    pub fn class_name(&self, instance: InstanceId) -> Result<&str, NativeError> {
        let class = self.class_of(instance)?;

        self.module
            .class(class)
            .map(|c| c.name())
            .ok_or_else(|| NativeError::new(format!("unbound class {class}")))
    }

    fn receiver(&self) -> Result<InstanceId, NativeError> {
        self.this
            .ok_or_else(|| NativeError::new("free function has no receiver"))
    }

    fn class_of(&self, instance: InstanceId) -> Result<EntityId, NativeError> {
        self.arena
            .borrow()
            .class_of(instance)
            .ok_or_else(|| gone(instance))
    }

    fn slot(&self, instance: InstanceId, name: &str) -> Result<usize, NativeError> {
        let class = self.class_of(instance)?;

        self.module
            .class(class)
            .and_then(|c| c.property_slot(name))
            .ok_or_else(|| NativeError::new(format!("no field '{name}' on {instance}")))
    }
}

fn gone(instance: InstanceId) -> NativeError {
    NativeError::new(format!("instance {instance} is gone"))
}
