use super::NativeValue;
use cppglue_schema::types::EntityId;
use derive_more::Display;

///
/// InstanceId
/// Stable address of a native instance; slots are reused after reclamation.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("@{_0}")]
pub struct InstanceId(usize);

impl InstanceId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

///
/// NativeInstance
/// Field storage of one native object, in declaration order.
///

#[derive(Clone, Debug, PartialEq)]
pub struct NativeInstance {
    pub class: EntityId,
    pub fields: Vec<NativeValue>,
}

impl NativeInstance {
    #[must_use]
    pub const fn new(class: EntityId, fields: Vec<NativeValue>) -> Self {
        Self { class, fields }
    }

    fn links(&self) -> impl Iterator<Item = InstanceId> + '_ {
        self.fields.iter().filter_map(NativeValue::as_object)
    }
}

#[derive(Debug)]
struct Slot {
    instance: Option<NativeInstance>,
    strong: u32,
}

///
/// Arena
///
/// Owns every native instance. Each owning wrapper, borrowed wrapper and
/// field link holds one strong count; an instance whose count drops to zero
/// is reclaimed together with whatever it alone kept alive.
///

#[derive(Debug, Default)]
pub struct Arena {
    slots: Vec<Slot>,
    free: Vec<usize>,
    live: usize,
}

impl Arena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an instance with no holders yet. Object fields must already
    /// carry their own link count.
    pub fn insert(&mut self, instance: NativeInstance) -> InstanceId {
        self.live += 1;

        if let Some(index) = self.free.pop() {
            self.slots[index] = Slot {
                instance: Some(instance),
                strong: 0,
            };
            return InstanceId(index);
        }

        let index = self.slots.len();
        self.slots.push(Slot {
            instance: Some(instance),
            strong: 0,
        });

        InstanceId(index)
    }

    #[must_use]
    pub fn get(&self, id: InstanceId) -> Option<&NativeInstance> {
        self.slots.get(id.index()).and_then(|s| s.instance.as_ref())
    }

    #[must_use]
    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut NativeInstance> {
        self.slots
            .get_mut(id.index())
            .and_then(|s| s.instance.as_mut())
    }

    #[must_use]
    pub fn contains(&self, id: InstanceId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn class_of(&self, id: InstanceId) -> Option<EntityId> {
        self.get(id).map(|i| i.class)
    }

    #[must_use]
    pub fn strong_count(&self, id: InstanceId) -> u32 {
        self.slots
            .get(id.index())
            .filter(|s| s.instance.is_some())
            .map_or(0, |s| s.strong)
    }

    pub fn retain(&mut self, id: InstanceId) {
        if let Some(slot) = self.slots.get_mut(id.index())
            && slot.instance.is_some()
        {
            slot.strong += 1;
        }
    }

    /// Drop one strong count, reclaiming the instance at zero.
    pub fn release(&mut self, id: InstanceId) {
        let mut pending = vec![id];

        while let Some(id) = pending.pop() {
            let Some(slot) = self.slots.get_mut(id.index()) else {
                continue;
            };
            if slot.instance.is_none() {
                continue;
            }

            slot.strong = slot.strong.saturating_sub(1);
            if slot.strong == 0
                && let Some(instance) = self.take(id)
            {
                pending.extend(instance.links());
            }
        }
    }

    /// Reclaim an instance nothing holds, e.g. a temporary built during a
    /// native call that was never returned or linked.
    pub fn reclaim_if_unheld(&mut self, id: InstanceId) {
        if self.contains(id) && self.strong_count(id) == 0 {
            self.retain(id);
            self.release(id);
        }
    }

    /// Overwrite one field, moving link counts from the old target to the new.
    pub fn write(&mut self, id: InstanceId, slot: usize, value: NativeValue) -> bool {
        if let Some(target) = value.as_object() {
            self.retain(target);
        }

        let old = match self.get_mut(id).and_then(|i| i.fields.get_mut(slot)) {
            Some(field) => std::mem::replace(field, value),
            None => {
                if let NativeValue::Object(target) = value {
                    self.release(target);
                }
                return false;
            }
        };

        if let NativeValue::Object(target) = old {
            self.release(target);
        }

        true
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.live
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.live == 0
    }

    fn take(&mut self, id: InstanceId) -> Option<NativeInstance> {
        let instance = self.slots.get_mut(id.index())?.instance.take()?;
        self.free.push(id.0);
        self.live -= 1;

        Some(instance)
    }
}
