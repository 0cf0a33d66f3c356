//! RAN function table
//!
//! Maps RAN function ids to their descriptor and owning service model. The
//! table is built before the agent starts and advertised in E2 Setup.

use std::collections::BTreeMap;

use tracing::{error, warn};

use e2node_e2ap::ies::RanFunctionItem;
use e2node_e2sm::ServiceModel;

/// One RAN function offered by the node
pub struct RanFunctionDescriptor {
    pub ran_function_id: u16,
    pub revision: u16,
    pub oid: String,
    pub short_name: String,
    pub description: String,
    pub service_model: Option<Box<dyn ServiceModel>>,
}

impl RanFunctionDescriptor {
    /// Builds a descriptor from the identity reported by `model`.
    pub fn new(ran_function_id: u16, model: Box<dyn ServiceModel>) -> Self {
        Self {
            ran_function_id,
            revision: model.revision(),
            oid: model.oid().to_string(),
            short_name: model.short_name().to_string(),
            description: model.description().to_string(),
            service_model: Some(model),
        }
    }

    /// Descriptor of a function whose service model is not loaded.
    pub fn without_model(
        ran_function_id: u16,
        revision: u16,
        oid: impl Into<String>,
        short_name: impl Into<String>,
    ) -> Self {
        Self {
            ran_function_id,
            revision,
            oid: oid.into(),
            short_name: short_name.into(),
            description: String::new(),
            service_model: None,
        }
    }
}

impl std::fmt::Debug for RanFunctionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RanFunctionDescriptor")
            .field("ran_function_id", &self.ran_function_id)
            .field("revision", &self.revision)
            .field("oid", &self.oid)
            .field("short_name", &self.short_name)
            .field("has_model", &self.service_model.is_some())
            .finish()
    }
}

/// RAN functions by id
#[derive(Debug, Default)]
pub struct RanFunctionTable {
    functions: BTreeMap<u16, RanFunctionDescriptor>,
}

impl RanFunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `model` under `ran_function_id`, replacing any previous entry.
    pub fn register(&mut self, ran_function_id: u16, model: Box<dyn ServiceModel>) {
        self.insert(RanFunctionDescriptor::new(ran_function_id, model));
    }

    pub fn insert(&mut self, descriptor: RanFunctionDescriptor) {
        if let Some(old) = self
            .functions
            .insert(descriptor.ran_function_id, descriptor)
        {
            warn!("RAN function {} ({}) replaced", old.ran_function_id, old.short_name);
        }
    }

    pub fn get(&self, ran_function_id: u16) -> Option<&RanFunctionDescriptor> {
        self.functions.get(&ran_function_id)
    }

    pub fn get_mut(&mut self, ran_function_id: u16) -> Option<&mut RanFunctionDescriptor> {
        self.functions.get_mut(&ran_function_id)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Builds the RAN function list of the E2 Setup Request.
    ///
    /// Functions without a service model, or whose definition cannot be
    /// encoded, are left out.
    pub fn setup_items(&self) -> Vec<RanFunctionItem> {
        let mut items = Vec::with_capacity(self.functions.len());
        for descriptor in self.functions.values() {
            let Some(model) = descriptor.service_model.as_ref() else {
                warn!(
                    "RAN function {} has no service model, not advertised",
                    descriptor.ran_function_id
                );
                continue;
            };
            match model.generate_ran_function_description() {
                Ok(definition) => items.push(RanFunctionItem {
                    ran_function_id: descriptor.ran_function_id,
                    definition,
                    revision: descriptor.revision,
                    oid: descriptor.oid.clone(),
                }),
                Err(e) => error!(
                    "Failed to encode RAN function {} definition: {}",
                    descriptor.ran_function_id, e
                ),
            }
        }
        items
    }
}
