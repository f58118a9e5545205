//! The capability registry: the engine's public surface.
//!
//! Construction snapshots the install slot on the global context, occupies
//! it with a marker, and wraps every catalog entry in a memoized probe.
//! `restore()` puts the slot back exactly as it was found. The snapshot is
//! fixed at construction time; values written to the slot by third parties
//! afterwards are never re-captured.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use uuid::Uuid;

use crate::engine::catalog::{default_catalog, ProbeEntry, ProbeScope, ProbeSpec};
use crate::engine::error::ConfigError;
use crate::engine::gateway::EvaluationGateway;
use crate::engine::memo::{MemoProbe, ProbeResult};
use crate::host::context::SharedGlobalContext;
use crate::host::object::new_object_ref;
use crate::host::value::HostValue;

/// Name of the global binding the registry occupies while installed.
pub const INSTALL_SLOT: &str = "capabilities";

pub struct CapabilityRegistry {
    ctx: SharedGlobalContext,
    gateway: Rc<EvaluationGateway>,
    probes: HashMap<&'static str, MemoProbe>,
    names: Vec<&'static str>,
    instance_id: Uuid,
    previous: Option<HostValue>,
    was_occupied: bool,
    restored: Cell<bool>,
}

impl CapabilityRegistry {
    /// Build a registry over the default probe catalog.
    pub fn build(ctx: SharedGlobalContext) -> Self {
        Self::build_with_catalog(ctx, default_catalog())
    }

    /// Build a registry over a caller-supplied catalog. Snapshots the
    /// install slot, installs the registry marker, and wraps each probe
    /// so it runs at most once.
    pub fn build_with_catalog(ctx: SharedGlobalContext, catalog: &[ProbeEntry]) -> Self {
        let was_occupied = ctx.borrow().has_binding(INSTALL_SLOT);
        let previous = ctx.borrow().get_binding(INSTALL_SLOT);
        let instance_id = Uuid::new_v4();

        let marker = new_object_ref(None);
        marker.borrow_mut().set(
            "registry_id",
            HostValue::String(instance_id.to_hyphenated().to_string()),
        );
        ctx.borrow_mut()
            .define_binding(INSTALL_SLOT, HostValue::Object(marker));

        let gateway = Rc::new(EvaluationGateway::new(ctx.clone()));
        let mut probes = HashMap::new();
        let mut names = Vec::with_capacity(catalog.len());
        for entry in catalog {
            names.push(entry.name);
            probes.insert(entry.name, make_probe(entry, gateway.clone()));
        }

        CapabilityRegistry {
            ctx,
            gateway,
            probes,
            names,
            instance_id,
            previous,
            was_occupied,
            restored: Cell::new(false),
        }
    }

    /// Run (or recall) the named capability check.
    pub fn check(&self, name: &str) -> ProbeResult {
        match self.probes.get(name) {
            Some(probe) => probe.call(),
            None => Err(ConfigError::UnknownCapability(name.to_string())),
        }
    }

    /// The named check's result coerced to a plain boolean.
    pub fn supports(&self, name: &str) -> Result<bool, ConfigError> {
        self.check(name).map(|value| value.is_truthy())
    }

    /// Capability names in catalog order.
    pub fn capability_names(&self) -> &[&'static str] {
        &self.names
    }

    /// Reinstate the install slot's pre-construction state: the captured
    /// prior value, or no binding at all. Safe to call repeatedly; every
    /// call reinstates the same construction-time snapshot.
    pub fn restore(&self) -> &Self {
        let mut ctx = self.ctx.borrow_mut();
        if self.was_occupied {
            if let Some(previous) = &self.previous {
                ctx.define_binding(INSTALL_SLOT, previous.clone());
            }
        } else {
            ctx.remove_binding(INSTALL_SLOT);
        }
        self.restored.set(true);
        self
    }

    pub fn is_restored(&self) -> bool {
        self.restored.get()
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn context(&self) -> &SharedGlobalContext {
        &self.ctx
    }

    pub fn gateway(&self) -> &EvaluationGateway {
        &self.gateway
    }
}

fn make_probe(entry: &ProbeEntry, gateway: Rc<EvaluationGateway>) -> MemoProbe {
    let spec = entry.spec;
    MemoProbe::new(move || run_spec(spec, &gateway))
}

fn run_spec(spec: ProbeSpec, gateway: &EvaluationGateway) -> ProbeResult {
    match spec {
        ProbeSpec::Evaluates(source) => {
            gateway.can_evaluate(source).map(HostValue::Boolean)
        }
        ProbeSpec::EvaluatesTo(source) => gateway.truthy_evaluate(source),
        ProbeSpec::Structural(probe) => probe(&ProbeScope::new(gateway)),
    }
}
