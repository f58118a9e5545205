//! Baseline object model: property maps with prototype delegation.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use uuid::Uuid;

use crate::host::value::HostValue;

pub type HostObjectRef = Rc<RefCell<HostObject>>;

/// An ordinary host object. Identity is the object's uuid (and reference
/// identity for value equality); property reads delegate along the
/// prototype chain, writes always land on the receiver.
pub struct HostObject {
    id: Uuid,
    prototype: Option<HostObjectRef>,
    properties: HashMap<String, HostValue>,
}

impl HostObject {
    pub fn new(prototype: Option<HostObjectRef>) -> Self {
        HostObject {
            id: Uuid::new_v4(),
            prototype,
            properties: HashMap::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn prototype(&self) -> Option<HostObjectRef> {
        self.prototype.clone()
    }

    pub fn set_prototype(&mut self, prototype: Option<HostObjectRef>) {
        self.prototype = prototype;
    }

    pub fn has_own_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Look up a property, walking the prototype chain.
    pub fn get(&self, key: &str) -> Option<HostValue> {
        if let Some(v) = self.properties.get(key) {
            return Some(v.clone());
        }
        let mut proto = self.prototype.clone();
        while let Some(p) = proto {
            let p = p.borrow();
            if let Some(v) = p.properties.get(key) {
                return Some(v.clone());
            }
            proto = p.prototype.clone();
        }
        None
    }

    pub fn set(&mut self, key: impl Into<String>, value: HostValue) {
        self.properties.insert(key.into(), value);
    }

    pub fn own_property_keys(&self) -> Vec<String> {
        self.properties.keys().cloned().collect()
    }
}

/// Allocate a fresh object behind the shared reference type.
pub fn new_object_ref(prototype: Option<HostObjectRef>) -> HostObjectRef {
    Rc::new(RefCell::new(HostObject::new(prototype)))
}
