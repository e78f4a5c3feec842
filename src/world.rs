pub type EntityId = usize;

/// Column-per-component entity store for the globe scene.
pub struct World {
    pub entities_count: usize,
    component_vecs: Vec<Box<dyn ComponentVec>>,
}

impl World {
    pub fn new() -> Self {
        Self {
            entities_count: 0,
            component_vecs: Vec::new(),
        }
    }

    pub fn new_entity(&mut self) -> EntityId {
        let entity_id = self.entities_count;
        for component_vec in self.component_vecs.iter_mut() {
            component_vec.push_none();
        }
        self.entities_count += 1;
        entity_id
    }

    pub fn add_component_to_entity<ComponentType: Send + Sync + 'static>(
        &mut self,
        entity: EntityId,
        component: ComponentType,
    ) {
        if let Some(component_vec) = self.borrow_component_vec_mut::<ComponentType>() {
            component_vec[entity] = Some(component);
            return;
        }

        // No storage for this type yet; every existing entity starts without it.
        let mut new_component_vec: Vec<Option<ComponentType>> =
            Vec::with_capacity(self.entities_count);
        new_component_vec.resize_with(self.entities_count, || None);
        new_component_vec[entity] = Some(component);
        self.component_vecs.push(Box::new(new_component_vec));
    }

    pub fn borrow_component_vec<ComponentType: 'static>(
        &self,
    ) -> Option<&Vec<Option<ComponentType>>> {
        self.component_vecs
            .iter()
            .find_map(|component_vec| component_vec.as_any().downcast_ref())
    }

    fn borrow_component_vec_mut<ComponentType: 'static>(
        &mut self,
    ) -> Option<&mut Vec<Option<ComponentType>>> {
        self.component_vecs
            .iter_mut()
            .find_map(|component_vec| component_vec.as_any_mut().downcast_mut())
    }

    pub fn get_component<ComponentType: 'static>(&self, entity: EntityId) -> Option<&ComponentType> {
        if entity >= self.entities_count {
            return None;
        }

        self.borrow_component_vec::<ComponentType>()
            .and_then(|vec| vec.get(entity))
            .and_then(|option| option.as_ref())
    }

    pub fn get_component_mut<ComponentType: 'static>(
        &mut self,
        entity: EntityId,
    ) -> Option<&mut ComponentType> {
        if entity >= self.entities_count {
            return None;
        }

        self.borrow_component_vec_mut::<ComponentType>()
            .and_then(|vec| vec.get_mut(entity))
            .and_then(|option| option.as_mut())
    }

    /// Entities carrying component `A`, in creation order.
    pub fn query_entities_with<A: 'static>(&self) -> Vec<EntityId> {
        match self.borrow_component_vec::<A>() {
            Some(vec) => vec
                .iter()
                .enumerate()
                .filter_map(|(entity_id, a)| a.as_ref().map(|_| entity_id))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn query_entities_with_both<A: 'static, B: 'static>(&self) -> Vec<EntityId> {
        match (
            self.borrow_component_vec::<A>(),
            self.borrow_component_vec::<B>(),
        ) {
            (Some(a_vec), Some(b_vec)) => a_vec
                .iter()
                .zip(b_vec.iter())
                .enumerate()
                .filter_map(|(entity_id, (a, b))| (a.is_some() && b.is_some()).then_some(entity_id))
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

trait ComponentVec: Send + Sync {
    fn as_any(&self) -> &dyn std::any::Any;
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
    fn push_none(&mut self);
}

impl<T: Send + Sync + 'static> ComponentVec for Vec<Option<T>> {
    fn as_any(&self) -> &dyn std::any::Any {
        self as &dyn std::any::Any
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self as &mut dyn std::any::Any
    }

    fn push_none(&mut self) {
        self.push(None)
    }
}
