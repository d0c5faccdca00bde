use super::Shared;
use crate::{
    error::RuntimeError,
    module::ClassType,
    native::InstanceId,
    value::Value,
};
use cppglue_schema::types::EntityId;
use std::{fmt, rc::Rc};

///
/// BackRef
/// The holder instance and field slot a borrowed wrapper was read from.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BackRef {
    pub holder: InstanceId,
    pub slot: usize,
}

///
/// Link
///
/// How a wrapper came to be. Either way it holds one strong count on its
/// instance; a borrowed wrapper is never the reason an instance exists.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Link {
    Owned,
    Borrowed(Option<BackRef>),
}

///
/// Object
///
/// Host wrapper over a native class instance. Cloning a wrapper shares the
/// instance; reads and writes go straight to native storage.
///

pub struct Object {
    shared: Rc<Shared>,
    class: EntityId,
    instance: InstanceId,
    link: Link,
}

impl Object {
    pub(crate) fn bind(shared: &Rc<Shared>, class: EntityId, instance: InstanceId, link: Link) -> Self {
        shared.arena.borrow_mut().retain(instance);

        Self {
            shared: Rc::clone(shared),
            class,
            instance,
            link,
        }
    }

    #[must_use]
    pub const fn class(&self) -> EntityId {
        self.class
    }

    #[must_use]
    pub fn class_name(&self) -> &str {
        self.class_type().map_or("<unbound>", ClassType::name)
    }

    #[must_use]
    pub const fn instance(&self) -> InstanceId {
        self.instance
    }

    #[must_use]
    pub const fn link(&self) -> Link {
        self.link
    }

    #[must_use]
    pub const fn is_owned(&self) -> bool {
        matches!(self.link, Link::Owned)
    }

    /// Whether both wrappers expose the same native instance.
    #[must_use]
    pub fn same_instance(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared) && self.instance == other.instance
    }

    pub(crate) fn belongs_to(&self, shared: &Shared) -> bool {
        std::ptr::eq(Rc::as_ptr(&self.shared), shared)
    }

    /// Property names in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.class_type()
            .into_iter()
            .flat_map(|c| c.properties().iter().map(|p| p.name()))
    }

    pub fn get(&self, name: &str) -> Result<Value, RuntimeError> {
        let class = self.require_class()?;
        let property = class
            .property(name)
            .ok_or_else(|| RuntimeError::unknown(class.name(), name))?;

        property
            .getter()
            .read(&self.shared, self.instance, &format!("{}.{name}", class.name()))
    }

    pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<(), RuntimeError> {
        let class = self.require_class()?;
        let property = class
            .property(name)
            .ok_or_else(|| RuntimeError::unknown(class.name(), name))?;
        let setter = property
            .setter()
            .ok_or_else(|| RuntimeError::ImmutableProperty {
                class: class.name().to_string(),
                property: name.to_string(),
            })?;

        let value = value.into();
        setter.write(
            &self.shared,
            self.instance,
            &value,
            &format!("{}.{name}", class.name()),
        )
    }

    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, RuntimeError> {
        let class = self.require_class()?;
        let method = class
            .method(name)
            .ok_or_else(|| RuntimeError::unknown(class.name(), name))?;

        method.invoke(&self.shared, Some(self.instance), args)
    }

    fn class_type(&self) -> Option<&ClassType> {
        self.shared.module.class(self.class)
    }

    fn require_class(&self) -> Result<&ClassType, RuntimeError> {
        self.class_type()
            .ok_or_else(|| RuntimeError::unknown("module", self.class.to_string()))
    }
}

impl Clone for Object {
    fn clone(&self) -> Self {
        Self::bind(&self.shared, self.class, self.instance, self.link)
    }
}

impl Drop for Object {
    fn drop(&mut self) {
        match self.shared.arena.try_borrow_mut() {
            Ok(mut arena) => arena.release(self.instance),
            Err(_) => tracing::error!(instance = %self.instance, "arena busy, wrapper leaked"),
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("class", &self.class_name())
            .field("instance", &self.instance)
            .field("link", &self.link)
            .finish()
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} object {}>", self.class_name(), self.instance)
    }
}
