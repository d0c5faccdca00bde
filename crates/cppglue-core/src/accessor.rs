//! Property get/set pairs, one per declared field.

use crate::{
    convert::{to_host, to_native},
    error::RuntimeError,
    mapper::ConversionStrategy,
    native::InstanceId,
    runtime::{BackRef, Link, Shared},
    value::Value,
};
use cppglue_schema::node::FieldDecl;
use std::rc::Rc;

///
/// AccessorPair
///
/// Getter always, setter only for mutable fields. `slot` is the field's
/// position in the native instance layout.
///

#[derive(Clone, Debug)]
pub struct AccessorPair {
    name: String,
    getter: Getter,
    setter: Option<Setter>,
}

impl AccessorPair {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn getter(&self) -> &Getter {
        &self.getter
    }

    #[must_use]
    pub const fn setter(&self) -> Option<&Setter> {
        self.setter.as_ref()
    }

    #[must_use]
    pub const fn is_mutable(&self) -> bool {
        self.setter.is_some()
    }

    #[must_use]
    pub const fn strategy(&self) -> ConversionStrategy {
        self.getter.strategy
    }

    #[must_use]
    pub const fn slot(&self) -> usize {
        self.getter.slot
    }
}

///
/// Getter
///

#[derive(Clone, Copy, Debug)]
pub struct Getter {
    slot: usize,
    strategy: ConversionStrategy,
}

impl Getter {
    /// Read the field. Object fields yield a borrowed wrapper over the
    /// instance currently linked, so repeated reads alias.
    pub(crate) fn read(
        &self,
        shared: &Rc<Shared>,
        holder: InstanceId,
        owner: &str,
    ) -> Result<Value, RuntimeError> {
        let native = shared
            .arena
            .borrow()
            .get(holder)
            .and_then(|i| i.fields.get(self.slot))
            .cloned()
            .ok_or_else(|| RuntimeError::native(owner, format!("instance {holder} is gone")))?;

        let link = Link::Borrowed(Some(BackRef {
            holder,
            slot: self.slot,
        }));

        to_host(native, self.strategy, shared, link).map_err(|msg| RuntimeError::native(owner, msg))
    }
}

///
/// Setter
///

#[derive(Clone, Copy, Debug)]
pub struct Setter {
    slot: usize,
    strategy: ConversionStrategy,
}

impl Setter {
    /// Validate then overwrite in one step; a rejected value leaves the
    /// field untouched.
    pub(crate) fn write(
        &self,
        shared: &Shared,
        holder: InstanceId,
        value: &Value,
        context: &str,
    ) -> Result<(), RuntimeError> {
        let native =
            to_native(value, self.strategy, shared).map_err(|m| m.into_error(context))?;

        if shared.arena.borrow_mut().write(holder, self.slot, native) {
            Ok(())
        } else {
            Err(RuntimeError::native(context, format!("instance {holder} is gone")))
        }
    }
}

#[must_use]
pub fn synthesize(field: &FieldDecl, slot: usize, strategy: ConversionStrategy) -> AccessorPair {
    AccessorPair {
        name: field.name.clone(),
        getter: Getter { slot, strategy },
        setter: field.mutable.then_some(Setter { slot, strategy }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::Scalar;
    use cppglue_schema::types::{EntityId, Primitive};

    #[test]
    fn setter_only_for_mutable_fields() {
        let strategy = ConversionStrategy::ByValueCopy(Scalar::Primitive(Primitive::Int32));

        let rw = synthesize(&FieldDecl::new("x", Primitive::Int32), 0, strategy);
        let ro = synthesize(&FieldDecl::readonly("y", Primitive::Int32), 1, strategy);

        assert!(rw.is_mutable());
        assert!(!ro.is_mutable());
        assert_eq!(ro.slot(), 1);
        assert_eq!(ro.name(), "y");
    }

    #[test]
    fn pair_shares_one_strategy() {
        let strategy = ConversionStrategy::ByObjectReference(EntityId::new(4));
        let pair = synthesize(&FieldDecl::new("cw", EntityId::new(4)), 2, strategy);

        assert_eq!(pair.strategy(), strategy);
        assert_eq!(pair.setter().map(|s| s.strategy), Some(strategy));
    }
}
