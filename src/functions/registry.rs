use super::{
    catalog::FunctionSpec,
    primitives::{Add, Divide, IfLte, Multiply, Negate, Subtract},
    traits::Primitive,
};
use crate::types::TypeToken;
use std::{collections::HashMap, sync::Arc};

pub struct PrimitiveRegistry {
    primitives: HashMap<String, Arc<dyn Primitive>>,
}

impl PrimitiveRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            primitives: HashMap::new(),
        };
        registry.register_primitives();
        registry
    }

    pub fn get_primitive(&self, name: &str) -> Option<Arc<dyn Primitive>> {
        self.primitives.get(name).cloned()
    }

    pub fn register(&mut self, primitive: Arc<dyn Primitive>) {
        self.primitives
            .insert(primitive.alias().to_string(), primitive);
    }

    /// Catalog entry for a registered primitive whose arguments and result
    /// all share one type
    pub fn homogeneous_spec(&self, name: &str, ty: &TypeToken) -> Option<FunctionSpec> {
        self.get_primitive(name)
            .map(|p| FunctionSpec::new(ty.clone(), vec![ty.clone(); p.arity()]))
    }

    fn register_primitives(&mut self) {
        let primitives: Vec<Arc<dyn Primitive>> = vec![
            Arc::new(IfLte),
            Arc::new(Add),
            Arc::new(Subtract),
            Arc::new(Multiply),
            Arc::new(Divide),
            Arc::new(Negate),
        ];
        for primitive in primitives {
            self.register(primitive);
        }
    }
}

impl Default for PrimitiveRegistry {
    fn default() -> Self {
        Self::new()
    }
}
