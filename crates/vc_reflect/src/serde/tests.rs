use std::collections::BTreeMap;

use serde_json::json;

use crate::derive::Reflect;
use crate::registry::{AmbiguityPolicy, ResolveError, TypeRegistry, TypeRegistryArc};
use crate::serde::{
    HintPolicy, SerdeContext, SerdeErrorKind, SerdeSettings, SerdeSettingsBuilder, UnresolvedPolicy,
};
use crate::{Reflect, impl_reflect_dyn};

// -----------------------------------------------------------------------------
// Fixtures

pub trait Animal: Reflect {
    fn speak(&self) -> String;
}

impl_reflect_dyn!(Animal);

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(type_path = "zoo::mammals::Dog", module = "zoo_data", implements(Animal))]
pub struct Dog {
    pub name: String,
    pub good: bool,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(type_path = "zoo::mammals::Cat", module = "zoo_data", implements(Animal))]
pub struct Cat {
    pub name: String,
    pub lives: u8,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(type_path = "zoo::birds::Parrot", module = "zoo_data", implements(Animal))]
pub struct Parrot {
    pub words: Vec<String>,
}

/// The plain base every other animal could be.
#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(type_path = "zoo::Creature", module = "zoo_data", implements(Animal))]
pub struct Creature {
    pub legs: u32,
}

impl Animal for Dog {
    fn speak(&self) -> String {
        format!("{} barks", self.name)
    }
}

impl Animal for Cat {
    fn speak(&self) -> String {
        format!("{} meows", self.name)
    }
}

impl Animal for Parrot {
    fn speak(&self) -> String {
        self.words.join(" ")
    }
}

impl Animal for Creature {
    fn speak(&self) -> String {
        String::from("...")
    }
}

#[derive(Reflect, Default)]
#[reflect(type_path = "zoo::Zoo", module = "zoo_data")]
pub struct Zoo {
    pub name: String,
    pub animals: Vec<Box<dyn Animal>>,
    pub star: Option<Box<dyn Animal>>,
    pub pens: BTreeMap<String, Box<dyn Animal>>,
}

#[derive(Reflect, Default, Debug, PartialEq)]
pub struct Stats {
    pub hp: i32,
    pub speed: f32,
    pub tags: Vec<String>,
    pub spawn: Option<u64>,
    pub grade: char,
    pub loot: BTreeMap<String, u16>,
    pub owner: Option<Dog>,
}

#[derive(Reflect, Default, Debug)]
pub struct Body {
    pub mass: f32,
    pub drag: f64,
    pub lift: Option<f64>,
}

#[derive(Reflect, Default, Debug, PartialEq)]
pub struct TreeNode {
    pub label: String,
    pub children: Vec<TreeNode>,
}

fn context_with(settings: SerdeSettingsBuilder) -> SerdeContext {
    let mut registry = TypeRegistry::new();
    registry.register::<Zoo>();
    registry.register::<Dog>();
    registry.register::<Cat>();
    registry.register::<Parrot>();
    registry.register::<Creature>();
    registry.register::<Stats>();
    registry.register::<TreeNode>();
    registry.register::<Body>();
    SerdeContext::new(TypeRegistryArc::new(registry), settings.build())
}

fn context() -> SerdeContext {
    context_with(SerdeSettings::builder())
}

fn is<T: Reflect>(animal: &dyn Animal) -> bool {
    let animal: &dyn Reflect = animal;
    animal.is::<T>()
}

// -----------------------------------------------------------------------------
// Round trips

#[test]
fn concrete_round_trip() {
    let ctx = context();
    let mut stats = Stats {
        hp: -12,
        speed: 1.5,
        tags: vec!["fast".into(), "loud".into()],
        spawn: None,
        grade: 'A',
        loot: BTreeMap::from([("gold".into(), 30), ("arrows".into(), 12)]),
        owner: Some(Dog {
            name: "Rex".into(),
            good: true,
        }),
    };

    let node = ctx.to_value(&mut stats).unwrap();
    assert_eq!(
        node,
        json!({
            "hp": -12,
            "speed": 1.5,
            "tags": ["fast", "loud"],
            "spawn": null,
            "grade": "A",
            "loot": { "arrows": 12, "gold": 30 },
            "owner": { "name": "Rex", "good": true },
        })
    );

    let back = ctx.from_value::<Stats>(&node).unwrap();
    assert_eq!(back, Some(stats));
}

#[test]
fn tree_round_trip() {
    fn node(label: &str, children: Vec<TreeNode>) -> TreeNode {
        TreeNode {
            label: label.into(),
            children,
        }
    }

    let ctx = context();
    let mut tree = node(
        "root",
        vec![
            node("a", vec![node("a1", vec![node("a1x", vec![])]), node("a2", vec![])]),
            node("b", vec![]),
        ],
    );

    let node_tree = ctx.to_value(&mut tree).unwrap();
    assert_eq!(node_tree["children"][0]["children"][0]["children"][0]["label"], "a1x");

    let back = ctx.from_value::<TreeNode>(&node_tree).unwrap();
    assert_eq!(back, Some(tree));
}

#[test]
fn polymorphic_list_keeps_order_and_types() {
    let ctx = context();
    let mut zoo = Zoo {
        name: "City".into(),
        animals: vec![
            Box::new(Dog { name: "Rex".into(), good: true }),
            Box::new(Cat { name: "Tom".into(), lives: 9 }),
            Box::new(Parrot { words: vec!["hello".into()] }),
            Box::new(Creature { legs: 6 }),
            Box::new(Cat { name: "Kit".into(), lives: 3 }),
            Box::new(Dog { name: "Ace".into(), good: false }),
            Box::new(Creature { legs: 0 }),
            Box::new(Parrot { words: vec![] }),
        ],
        star: Some(Box::new(Dog { name: "Star".into(), good: true })),
        pens: BTreeMap::from([(
            "pond".into(),
            Box::new(Parrot { words: vec!["quack".into()] }) as Box<dyn Animal>,
        )]),
    };

    let node = ctx.to_value(&mut zoo).unwrap();
    assert!(node.get("$type").is_none());
    assert_eq!(node["animals"][0]["$type"], "zoo::mammals::Dog, zoo_data");
    assert_eq!(node["animals"][2]["$type"], "zoo::birds::Parrot, zoo_data");

    let back = ctx.from_value::<Zoo>(&node).unwrap().unwrap();
    let spoken: Vec<_> = back.animals.iter().map(|animal| animal.speak()).collect();
    let expected: Vec<_> = zoo.animals.iter().map(|animal| animal.speak()).collect();
    assert_eq!(spoken, expected);

    let dog = <dyn Reflect>::downcast_ref::<Dog>(&*back.animals[5]).unwrap();
    assert_eq!(dog, &Dog { name: "Ace".into(), good: false });
    let creature = <dyn Reflect>::downcast_ref::<Creature>(&*back.animals[3]).unwrap();
    assert_eq!(creature.legs, 6);
    assert_eq!(node["pens"]["pond"]["$type"], "zoo::birds::Parrot, zoo_data");
    assert_eq!(back.pens["pond"].speak(), "quack");
    assert_eq!(back.star.map(|star| star.speak()).as_deref(), Some("Star barks"));
}

#[test]
fn dynamic_root_round_trip() {
    let ctx = context();
    let mut cat = Cat { name: "Tom".into(), lives: 9 };

    let node = ctx.to_value_dyn(&mut cat).unwrap();
    assert_eq!(node["$type"], "zoo::mammals::Cat, zoo_data");

    let back = ctx.from_value_dyn(&node).unwrap().unwrap();
    assert_eq!(back.take::<Cat>().unwrap(), cat);
}

#[test]
fn null_root_is_no_value() {
    let ctx = context();
    assert!(ctx.from_value::<Stats>(&json!(null)).unwrap().is_none());
    assert!(ctx.from_value_dyn(&json!(null)).unwrap().is_none());
}

// -----------------------------------------------------------------------------
// Hints

#[test]
fn always_policy_tags_every_struct() {
    let ctx = context_with(SerdeSettings::builder().hint_policy(HintPolicy::Always));
    let mut stats = Stats {
        owner: Some(Dog::default()),
        ..Default::default()
    };

    let node = ctx.to_value(&mut stats).unwrap();
    assert!(node["$type"].as_str().unwrap().ends_with("Stats, vc_reflect"));
    assert_eq!(node["owner"]["$type"], "zoo::mammals::Dog, zoo_data");

    assert_eq!(ctx.from_value::<Stats>(&node).unwrap(), Some(stats));
}

#[test]
fn custom_hint_key() {
    let ctx = context_with(SerdeSettings::builder().hint_key("@kind"));
    let mut cat = Cat::default();
    let node = ctx.to_value_dyn(&mut cat).unwrap();
    assert_eq!(node["@kind"], "zoo::mammals::Cat, zoo_data");
    assert!(ctx.from_value_dyn(&node).unwrap().unwrap().is::<Cat>());
}

#[test]
fn stale_hints_degrade() {
    let ctx = context();
    let node = json!({
        "name": "Old",
        "animals": [
            // Qualifier of a crate that no longer exists.
            { "$type": "zoo::mammals::Dog, legacy_zoo", "name": "A", "good": true },
            // No qualifier at all.
            { "$type": "zoo::mammals::Cat", "name": "B", "lives": 1 },
            // Module moved since the file was written.
            { "$type": "old::birds::Parrot, zoo_data", "words": ["hi"] },
        ],
        // A concrete slot ignores whatever the hint says.
        "star": null,
    });

    let zoo = ctx.from_value::<Zoo>(&node).unwrap().unwrap();
    assert!(is::<Dog>(&*zoo.animals[0]));
    assert!(is::<Cat>(&*zoo.animals[1]));
    assert!(is::<Parrot>(&*zoo.animals[2]));

    let wrong = json!({ "$type": "zoo::mammals::Cat, zoo_data", "name": "Rex", "good": true });
    let dog = ctx.from_value::<Dog>(&wrong).unwrap().unwrap();
    assert_eq!(dog.name, "Rex");
}

#[test]
fn unknown_hint_fails_with_path() {
    let ctx = context();
    let node = json!({
        "animals": [
            { "$type": "zoo::mammals::Dog", "name": "A", "good": true },
            { "$type": "zoo::Unicorn, zoo_data", "horns": 1 },
        ],
    });

    let err = ctx.from_value::<Zoo>(&node).err().unwrap();
    assert_eq!(err.path(), "animals[1]");
    assert_eq!(
        err.kind(),
        &SerdeErrorKind::Resolve(ResolveError::Unresolved {
            hint: "zoo::Unicorn, zoo_data".into()
        })
    );
}

#[test]
fn unknown_hint_skipped_when_configured() {
    let ctx = context_with(SerdeSettings::builder().unresolved_policy(UnresolvedPolicy::SkipElement));
    let node = json!({
        "animals": [
            { "$type": "zoo::Unicorn" },
            { "$type": "zoo::mammals::Dog", "name": "A", "good": true },
            {},
        ],
    });

    let zoo = ctx.from_value::<Zoo>(&node).unwrap().unwrap();
    assert_eq!(zoo.animals.len(), 1);
    assert!(is::<Dog>(&*zoo.animals[0]));
}

#[test]
fn unknown_hint_in_map_entry() {
    let node = json!({
        "pens": {
            "north": { "$type": "zoo::Unicorn" },
            "south": { "$type": "zoo::mammals::Cat", "name": "Tom", "lives": 9 },
        },
    });

    let err = context().from_value::<Zoo>(&node).unwrap_err();
    assert_eq!(err.path(), "pens.north");
    assert!(err.is_resolve());

    let ctx = context_with(SerdeSettings::builder().unresolved_policy(UnresolvedPolicy::SkipElement));
    let zoo = ctx.from_value::<Zoo>(&node).unwrap().unwrap();
    assert_eq!(zoo.pens.len(), 1);
    assert!(is::<Cat>(&*zoo.pens["south"]));
}

#[test]
fn hint_outside_the_slot_base_is_rejected() {
    let ctx = context();
    // `Stats` is registered but does not implement `Animal`.
    let hint = ctx
        .registry()
        .read()
        .get_type_info(core::any::TypeId::of::<Stats>())
        .unwrap()
        .ty()
        .hint();
    let node = json!({ "animals": [{ "$type": hint }] });

    let err = ctx.from_value::<Zoo>(&node).err().unwrap();
    assert!(err.is_resolve());
}

#[test]
fn ambiguous_simple_name() {
    mod farm {
        use crate::derive::Reflect;

        #[derive(Reflect, Default)]
        #[reflect(type_path = "farm::Dog", implements(super::Animal))]
        pub struct Dog {
            pub name: String,
        }

        impl super::Animal for Dog {
            fn speak(&self) -> String {
                format!("{} woofs", self.name)
            }
        }
    }

    let build = |policy| {
        let ctx = context_with(SerdeSettings::builder().ambiguity_policy(policy));
        ctx.registry().write().register::<farm::Dog>();
        ctx
    };
    let node = json!({ "animals": [{ "$type": "kennel::Dog", "name": "Rex", "good": true }] });

    let first = build(AmbiguityPolicy::FirstFound);
    let zoo = first.from_value::<Zoo>(&node).unwrap().unwrap();
    assert_eq!(zoo.animals[0].speak(), "Rex barks");

    let strict = build(AmbiguityPolicy::Fail);
    let err = strict.from_value::<Zoo>(&node).err().unwrap();
    assert!(matches!(
        err.kind(),
        SerdeErrorKind::Resolve(ResolveError::Ambiguous { .. })
    ));
}

// -----------------------------------------------------------------------------
// Members

#[test]
fn unknown_keys_ignored_missing_keys_default() {
    let ctx = context();
    let node = json!({ "hp": 5, "mana": 40, "tags": ["x"] });
    let stats = ctx.from_value::<Stats>(&node).unwrap().unwrap();
    assert_eq!(stats.hp, 5);
    assert_eq!(stats.tags, ["x"]);
    assert_eq!(stats.speed, 0.0);
    assert!(stats.loot.is_empty());
}

#[test]
fn invalid_node_reports_path() {
    let ctx = context();
    let node = json!({ "owner": { "name": ["Rex"] } });
    let err = ctx.from_value::<Stats>(&node).unwrap_err();
    assert_eq!(err.path(), "owner.name");
    assert_eq!(
        err.kind(),
        &SerdeErrorKind::InvalidNode {
            expected: "scalar",
            found: "array"
        }
    );
}

#[test]
fn out_of_range_scalar() {
    let ctx = context();
    let node = json!({ "name": "Tom", "lives": 300 });
    let err = ctx.from_value::<Cat>(&node).unwrap_err();
    assert_eq!(err.path(), "lives");
    assert!(matches!(err.kind(), SerdeErrorKind::InvalidScalar { .. }));
}

#[test]
fn non_finite_floats_round_trip() {
    let ctx = context();
    let mut body = Body {
        mass: f32::INFINITY,
        drag: f64::NEG_INFINITY,
        lift: Some(f64::NAN),
    };

    let node = ctx.to_value(&mut body).unwrap();
    assert_eq!(
        node,
        json!({ "mass": "Infinity", "drag": "-Infinity", "lift": "NaN" })
    );

    let back = ctx.from_value::<Body>(&node).unwrap().unwrap();
    assert_eq!(back.mass, f32::INFINITY);
    assert_eq!(back.drag, f64::NEG_INFINITY);
    assert!(back.lift.is_some_and(f64::is_nan));

    // `None` and a NaN stay apart.
    body.lift = None;
    assert_eq!(ctx.to_value(&mut body).unwrap()["lift"], json!(null));
}

#[test]
fn float_rejects_other_strings() {
    let ctx = context();
    let node = json!({ "mass": "heavy" });
    let err = ctx.from_value::<Body>(&node).unwrap_err();
    assert_eq!(err.path(), "mass");
    assert!(matches!(err.kind(), SerdeErrorKind::InvalidScalar { .. }));
}
