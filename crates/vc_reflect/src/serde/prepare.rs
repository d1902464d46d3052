use crate::Reflect;
use crate::ops::ReflectMut;

/// Calls [`Reflect::prepare_save`] on every object of the graph.
///
/// The walk is pre-order, a parent is prepared before its children so it
/// can still replace them. Each object is visited exactly once.
pub fn prepare_graph(value: &mut dyn Reflect) {
    value.prepare_save();

    match value.reflect_mut() {
        ReflectMut::Struct(this) => {
            for index in 0..this.field_len() {
                if let Some(field) = this.field_at_mut(index) {
                    prepare_graph(field);
                }
            }
        }
        ReflectMut::List(list) => {
            for index in 0..list.len() {
                if let Some(item) = list.get_mut(index) {
                    prepare_graph(item);
                }
            }
        }
        ReflectMut::Map(map) => {
            for value in map.values_mut() {
                prepare_graph(value);
            }
        }
        ReflectMut::Option(Some(inner)) | ReflectMut::Dynamic(inner) => prepare_graph(inner),
        ReflectMut::Option(None) | ReflectMut::Scalar => {}
    }
}

#[cfg(test)]
mod tests {
    use super::prepare_graph;
    use crate::derive::Reflect;
    use crate::{Reflect, SaveHooks};

    #[derive(Reflect, Default)]
    #[reflect(hooks)]
    struct Leaf {
        pub prepared: u32,
    }

    impl SaveHooks for Leaf {
        fn prepare_save(&mut self) {
            self.prepared += 1;
        }
    }

    #[derive(Reflect, Default)]
    #[reflect(hooks)]
    struct Branch {
        pub prepared: u32,
        pub children: Vec<Leaf>,
        pub spare: Option<Leaf>,
        // Parents run first and may still grow the graph.
        pub grow: bool,
    }

    impl SaveHooks for Branch {
        fn prepare_save(&mut self) {
            self.prepared += 1;
            if self.grow {
                self.children.push(Leaf::default());
            }
        }
    }

    #[test]
    fn every_object_once() {
        let mut branch = Branch {
            children: vec![Leaf::default(), Leaf::default()],
            spare: Some(Leaf::default()),
            grow: true,
            ..Default::default()
        };

        prepare_graph(branch.as_reflect_mut());

        assert_eq!(branch.prepared, 1);
        assert_eq!(branch.children.len(), 3);
        assert!(branch.children.iter().all(|leaf| leaf.prepared == 1));
        assert_eq!(branch.spare.as_ref().map(|leaf| leaf.prepared), Some(1));
    }
}
