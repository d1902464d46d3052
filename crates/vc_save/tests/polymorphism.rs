mod common;

use vc_reflect::Reflect;

use common::{
    Animal, Cat, Creature, Dog, Group, Leaf, Part, Parrot, Zoo, downcast, group, leaf, system,
};

fn type_name_of(animal: &dyn Animal) -> &'static str {
    let animal: &dyn Reflect = animal;
    animal.reflect_type_path()
}

#[test]
fn polymorphic_list_fidelity() {
    let system = system();

    let dog = |name: &str| -> Box<dyn Animal> {
        Box::new(Dog {
            name: name.into(),
            good: name.len() % 2 == 0,
        })
    };
    let cat = |name: &str, lives| -> Box<dyn Animal> {
        Box::new(Cat {
            name: name.into(),
            lives,
        })
    };
    let parrot = |name: &str, words: &[&str]| -> Box<dyn Animal> {
        Box::new(Parrot {
            name: name.into(),
            words: words.iter().map(|w| (*w).to_owned()).collect(),
        })
    };
    let creature = |name: &str| -> Box<dyn Animal> { Box::new(Creature { name: name.into() }) };

    let mut zoo = Zoo {
        name: "Eight".into(),
        animals: vec![
            dog("Rex"),
            cat("Tom", 9),
            parrot("Polly", &["hello", "bye"]),
            creature("Blob"),
            cat("Kit", 3),
            dog("Fido"),
            creature("Ooze"),
            parrot("Kiwi", &[]),
        ],
    };

    let text = system.to_text(&mut zoo).unwrap();
    let back = system.from_text::<Zoo>(&text).unwrap().unwrap();

    assert_eq!(back.animals.len(), 8);
    let expected: Vec<_> = zoo.animals.iter().map(|a| (type_name_of(&**a), a.name().to_owned())).collect();
    let actual: Vec<_> = back.animals.iter().map(|a| (type_name_of(&**a), a.name().to_owned())).collect();
    assert_eq!(actual, expected);

    assert_eq!(downcast::<Cat>(&*back.animals[1]).unwrap().lives, 9);
    assert_eq!(downcast::<Parrot>(&*back.animals[2]).unwrap().words, ["hello", "bye"]);
    assert!(downcast::<Dog>(&*back.animals[5]).unwrap().good);
    assert!(downcast::<Parrot>(&*back.animals[7]).unwrap().words.is_empty());
}

#[test]
fn tree_fidelity() {
    let system = system();

    let mut root = Group {
        name: "root".into(),
        parts: vec![
            group(
                "left",
                vec![leaf("a", 1), group("deep", vec![leaf("b", 2), leaf("c", 3)])],
            ),
            leaf("d", 4),
            group("right", vec![]),
        ],
    };

    let text = system.to_text(&mut root).unwrap();
    let back = system.from_text::<Group>(&text).unwrap().unwrap();

    fn as_group(part: &dyn Part) -> &Group {
        let part: &dyn Reflect = part;
        part.downcast_ref::<Group>().unwrap()
    }
    fn as_leaf(part: &dyn Part) -> &Leaf {
        let part: &dyn Reflect = part;
        part.downcast_ref::<Leaf>().unwrap()
    }

    assert_eq!(back.parts.len(), 3);
    assert_eq!(back.weight(), 10);

    let left = as_group(&*back.parts[0]);
    assert_eq!(left.parts.len(), 2);
    assert_eq!(as_leaf(&*left.parts[0]).name, "a");

    let deep = as_group(&*left.parts[1]);
    assert_eq!(deep.name, "deep");
    assert_eq!(deep.parts.len(), 2);
    assert_eq!(
        as_leaf(&*deep.parts[1]),
        &Leaf {
            name: "c".into(),
            weight: 3
        }
    );

    assert_eq!(as_leaf(&*back.parts[1]).weight, 4);
    assert!(as_group(&*back.parts[2]).parts.is_empty());
}

#[test]
fn resolution_resilience() {
    let system = system();

    for hint in [
        "zoo::mammals::Dog, zoo_data",
        // no qualifier
        "zoo::mammals::Dog",
        // a qualifier of other registered types
        "zoo::mammals::Dog, zoo_extra",
        // a qualifier nothing uses
        "zoo::mammals::Dog, gone_crate",
        // the type moved to another module
        "old::pets::Dog, zoo_data",
    ] {
        let text = format!(
            r#"{{ "name": "z", "animals": [ {{ "$type": "{hint}", "name": "Rex", "good": true }} ] }}"#
        );
        let zoo = system.from_text::<Zoo>(&text).unwrap().unwrap();
        let dog = downcast::<Dog>(&*zoo.animals[0]);
        assert_eq!(
            dog,
            Some(&Dog {
                name: "Rex".into(),
                good: true
            }),
            "{hint}"
        );
    }

    // Keeper is registered but does not fill an animal slot.
    let text = r#"{ "animals": [ { "$type": "staff::Keeper, zoo_extra", "name": "Sam" } ] }"#;
    assert!(system.from_text::<Zoo>(text).is_err());
}

#[test]
fn dynamic_root() {
    let system = system();
    let mut cat = Cat {
        name: "Tom".into(),
        lives: 7,
    };

    let text = system.to_text_dyn(&mut cat).unwrap();
    assert!(text.contains("\"$type\": \"zoo::mammals::Cat, zoo_data\""));

    let back = system.from_text_dyn(&text).unwrap().unwrap();
    assert_eq!(back.downcast_ref::<Cat>(), Some(&cat));
}
