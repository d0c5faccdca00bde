//! The assembled host module: one namespace of classes, enums and free
//! functions, named exactly as declared.

use crate::{
    accessor::AccessorPair,
    enumeration::EnumType,
    mapper::ConversionStrategy,
    method::Callable,
    native::{Arena, InstanceId, NativeInstance, NativeValue},
};
use cppglue_schema::types::EntityId;
use std::collections::BTreeMap;

///
/// ClassType
///

#[derive(Clone, Debug)]
pub struct ClassType {
    id: EntityId,
    name: String,
    path: String,
    properties: Vec<AccessorPair>,
    methods: Vec<Callable>,
}

impl ClassType {
    pub(crate) const fn new(
        id: EntityId,
        name: String,
        path: String,
        properties: Vec<AccessorPair>,
        methods: Vec<Callable>,
    ) -> Self {
        Self {
            id,
            name,
            path,
            properties,
            methods,
        }
    }

    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Properties in field declaration order.
    #[must_use]
    pub fn properties(&self) -> &[AccessorPair] {
        &self.properties
    }

    #[must_use]
    pub fn methods(&self) -> &[Callable] {
        &self.methods
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&AccessorPair> {
        self.properties.iter().find(|p| p.name() == name)
    }

    #[must_use]
    pub fn property_slot(&self, name: &str) -> Option<usize> {
        self.property(name).map(AccessorPair::slot)
    }

    #[must_use]
    pub fn method(&self, name: &str) -> Option<&Callable> {
        self.methods.iter().find(|m| m.name() == name)
    }
}

///
/// Binding
/// What a module-level name refers to.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Binding {
    Class(EntityId),
    Enum(EntityId),
    Function(usize),
}

///
/// Module
///

#[derive(Clone, Debug)]
pub struct Module {
    namespace: BTreeMap<String, Binding>,
    classes: Vec<ClassType>,
    enums: Vec<EnumType>,
    functions: Vec<Callable>,
    class_index: BTreeMap<EntityId, usize>,
    enum_index: BTreeMap<EntityId, usize>,
}

impl Module {
    pub(crate) fn new(classes: Vec<ClassType>, enums: Vec<EnumType>, functions: Vec<Callable>) -> Self {
        let mut namespace = BTreeMap::new();
        let mut class_index = BTreeMap::new();
        let mut enum_index = BTreeMap::new();

        for (i, class) in classes.iter().enumerate() {
            namespace.insert(class.name.clone(), Binding::Class(class.id));
            class_index.insert(class.id, i);
        }
        for (i, ty) in enums.iter().enumerate() {
            namespace.insert(ty.name().to_string(), Binding::Enum(ty.id()));
            enum_index.insert(ty.id(), i);
        }
        for (i, function) in functions.iter().enumerate() {
            namespace.insert(function.name().to_string(), Binding::Function(i));
        }

        Self {
            namespace,
            classes,
            enums,
            functions,
            class_index,
            enum_index,
        }
    }

    /// Public names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.namespace.keys().map(String::as_str)
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Binding> {
        self.namespace.get(name).copied()
    }

    /// Classes in declaration order.
    #[must_use]
    pub fn classes(&self) -> &[ClassType] {
        &self.classes
    }

    /// Enums in declaration order.
    #[must_use]
    pub fn enums(&self) -> &[EnumType] {
        &self.enums
    }

    #[must_use]
    pub fn functions(&self) -> &[Callable] {
        &self.functions
    }

    #[must_use]
    pub fn class(&self, id: EntityId) -> Option<&ClassType> {
        self.class_index.get(&id).map(|&i| &self.classes[i])
    }

    #[must_use]
    pub fn enum_type(&self, id: EntityId) -> Option<&EnumType> {
        self.enum_index.get(&id).map(|&i| &self.enums[i])
    }

    #[must_use]
    pub fn class_named(&self, name: &str) -> Option<&ClassType> {
        match self.lookup(name)? {
            Binding::Class(id) => self.class(id),
            _ => None,
        }
    }

    #[must_use]
    pub fn enum_named(&self, name: &str) -> Option<&EnumType> {
        match self.lookup(name)? {
            Binding::Enum(id) => self.enum_type(id),
            _ => None,
        }
    }

    #[must_use]
    pub fn function(&self, name: &str) -> Option<&Callable> {
        match self.lookup(name)? {
            Binding::Function(i) => self.functions.get(i),
            _ => None,
        }
    }

    /// Every method and free function.
    pub fn callables(&self) -> impl Iterator<Item = &Callable> {
        self.classes
            .iter()
            .flat_map(|c| c.methods.iter())
            .chain(self.functions.iter())
    }

    /// Whether any field or signature decomposes a complex value.
    #[must_use]
    pub fn uses_complex(&self) -> bool {
        let fields = self
            .classes
            .iter()
            .flat_map(|c| c.properties.iter().map(AccessorPair::strategy));
        let signatures = self.callables().flat_map(|c| {
            let sig = c.signature();
            sig.params.iter().copied().chain(sig.returns)
        });

        fields.chain(signatures).any(ConversionStrategy::is_complex)
    }

    /// Default-construct an instance with no holders. Reference fields get a
    /// freshly constructed, linked instance of their class.
    pub fn instantiate(&self, arena: &mut Arena, class: EntityId) -> InstanceId {
        let properties = self.class(class).map_or(&[][..], ClassType::properties);
        let mut fields = Vec::with_capacity(properties.len());

        for property in properties {
            let strategy = property.strategy();
            let value = match (NativeValue::zero(strategy), strategy.object_class()) {
                (Some(value), _) => value,
                (None, Some(child)) => {
                    let id = self.instantiate(arena, child);
                    arena.retain(id);
                    NativeValue::Object(id)
                }
                (None, None) => NativeValue::Void,
            };
            fields.push(value);
        }

        arena.insert(NativeInstance::new(class, fields))
    }
}
